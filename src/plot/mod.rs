//! Render the ortholog Ks distributions of trios as SVG documents.
//!
//! A document holds the figures of one divergent pair, one figure per usable
//! outgroup. Each figure is a row of three [`Panel`]s: focal-sister,
//! focal-outgroup and sister-outgroup.

use crate::database::PeakRecord;
use color_eyre::eyre::{eyre, Report, Result};
use itertools::Itertools;
use orthoks_kde::{envelope, Histogram, KdeCurve};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::fmt::Debug;
use std::iter::once;
use std::path::Path;


pub const PANEL_WIDTH: u32 = 420;
pub const PANEL_HEIGHT: u32 = 360;

const HISTOGRAM_COLOR: RGBColor = RGBColor(150, 150, 150);
const KDE_COLOR: RGBColor = RGBColor(31, 119, 180);
const MODE_COLOR: RGBColor = RGBColor(214, 39, 40);
const MEDIAN_COLOR: RGBColor = RGBColor(80, 80, 80);

/// The Ks distribution of one species pair.
#[derive(Clone, Debug)]
pub struct Panel {
    pub title: String,
    pub histogram: Histogram,
    /// Bootstrap density curves, drawn with their envelope.
    pub curves: Vec<KdeCurve>,
    pub peak: Option<PeakRecord>,
}

impl Panel {
    /// Highest bar or curve point.
    pub fn y_max(&self) -> f64 {
        self.curves.iter().map(KdeCurve::max).fold(self.histogram.max() as f64, f64::max)
    }
}

/// The three panels of a trio.
#[derive(Clone, Debug)]
pub struct Figure {
    pub title: String,
    pub panels: [Panel; 3],
}

impl Figure {
    /// Shared upper limit of the y axis of the three panels.
    pub fn y_max(&self) -> f64 {
        let y_max = self.panels.iter().map(Panel::y_max).fold(0.0, f64::max);
        (y_max * 1.1).max(1.0)
    }
}

/// File name of the document of a divergent pair, from the display names.
///
/// ```rust
/// let name = orthoks::plot::document_name("E. guineensis", "O. sativa");
/// assert_eq!(name, "orthologs_E._guineensis_O._sativa.svg");
/// ```
pub fn document_name(focal: &str, sister: &str) -> String {
    let name = format!("orthologs_{focal}_{sister}.svg");
    name.split_whitespace().join("_")
}

/// Render `figures` into one SVG document, one row per figure.
pub fn render<P>(path: &P, figures: &[Figure], x_lim: f64) -> Result<(), Report>
where
    P: AsRef<Path> + Debug,
{
    if figures.is_empty() {
        return Err(eyre!("No figures to render in: {path:?}"));
    }
    crate::utils::create_parent_dir(path)?;

    let size = (3 * PANEL_WIDTH, figures.len() as u32 * PANEL_HEIGHT);
    let root = SVGBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE)?;

    for (area, figure) in root.split_evenly((figures.len(), 1)).iter().zip(figures) {
        draw_figure(area, figure, x_lim)?;
    }

    root.present()?;
    Ok(())
}

fn draw_figure(
    area: &DrawingArea<SVGBackend, Shift>,
    figure: &Figure,
    x_lim: f64,
) -> Result<(), Report> {
    let area = area.titled(&figure.title, ("sans-serif", 18))?;
    let y_max = figure.y_max();
    for (area, panel) in area.split_evenly((1, 3)).iter().zip(&figure.panels) {
        draw_panel(area, panel, x_lim, y_max)?;
    }
    Ok(())
}

fn draw_panel(
    area: &DrawingArea<SVGBackend, Shift>,
    panel: &Panel,
    x_lim: f64,
    y_max: f64,
) -> Result<(), Report> {
    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 14))
        .margin(10)
        .x_label_area_size(35)
        .y_label_area_size(45)
        .build_cartesian_2d(0.0..x_lim, 0.0..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Ortholog Ks")
        .y_desc("Number of orthologs")
        .draw()?;

    // histogram, bars past the x limit are cut
    let bin_width = panel.histogram.bin_width;
    chart.draw_series(panel.histogram.counts.iter().enumerate().filter_map(|(i, count)| {
        let left = i as f64 * bin_width;
        let right = (left + bin_width).min(x_lim);
        (*count > 0 && left < x_lim).then(|| {
            Rectangle::new([(left, 0.0), (right, *count as f64)], HISTOGRAM_COLOR.mix(0.6).filled())
        })
    }))?;

    // bootstrap envelope, then the individual curves
    if let Some(band) = envelope(&panel.curves) {
        let upper = band.x.iter().zip(&band.upper);
        let lower = band.x.iter().zip(&band.lower).rev();
        let outline = upper.chain(lower).map(|(x, y)| (*x, y.min(y_max))).collect::<Vec<_>>();
        chart.draw_series(once(Polygon::new(outline, KDE_COLOR.mix(0.2).filled())))?;
    }
    for curve in &panel.curves {
        let points = curve.x.iter().zip(&curve.y).map(|(x, y)| (*x, y.min(y_max)));
        chart.draw_series(LineSeries::new(points, KDE_COLOR.mix(0.4)))?;
    }

    // previously estimated peak: mode with its deviation, and the median
    if let Some(peak) = &panel.peak {
        if let (Some(mode), Some(sd)) = (peak.mode, peak.mode_sd) {
            let (lower, upper) = ((mode - sd).max(0.0), (mode + sd).min(x_lim));
            if lower < upper {
                chart.draw_series(once(Rectangle::new(
                    [(lower, 0.0), (upper, y_max)],
                    MODE_COLOR.mix(0.15).filled(),
                )))?;
            }
        }
        let lines = [(peak.mode, MODE_COLOR), (peak.median, MEDIAN_COLOR)];
        for (x, color) in lines {
            let Some(x) = x.filter(|x| (0.0..=x_lim).contains(x)) else { continue };
            chart.draw_series(once(PathElement::new(
                vec![(x, 0.0), (x, y_max)],
                color.stroke_width(2),
            )))?;
        }
    }

    Ok(())
}
