use crate::{check_domain, EstimationError, GRID_POINTS_PER_BIN};
use std::f64::consts::PI;

/// A density curve evaluated on a regular grid.
///
/// `y` is scaled to histogram counts (`density * n * bin_width`), so a curve
/// can be drawn on top of a [`Histogram`](crate::Histogram) of the same
/// observations and bin width.
#[derive(Clone, Debug, PartialEq)]
pub struct KdeCurve {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    /// Number of observations the curve was estimated from.
    pub sample_size: usize,
}

impl KdeCurve {
    /// Highest point of the curve, `0.0` for an empty curve.
    pub fn max(&self) -> f64 {
        self.y.iter().copied().fold(0.0, f64::max)
    }
}

/// Returns the evaluation grid for `[0, upper]`.
///
/// The step is a tenth of the bin width; both ends are included.
///
/// ```rust
/// let x = orthoks_kde::grid(1.0, 0.5)?;
/// assert_eq!(x.len(), 21);
/// assert_eq!(x.first(), Some(&0.0));
/// assert_eq!(x.last(), Some(&1.0));
/// # Ok::<(), orthoks_kde::EstimationError>(())
/// ```
pub fn grid(upper: f64, bin_width: f64) -> Result<Vec<f64>, EstimationError> {
    check_domain(upper, bin_width)?;
    let step = bin_width / GRID_POINTS_PER_BIN as f64;
    let intervals = ((upper / step).round() as usize).max(1);
    let x = (0..=intervals).map(|i| upper * i as f64 / intervals as f64).collect();
    Ok(x)
}

/// Scott's rule of thumb bandwidth, `sd * n^(-1/5)`.
///
/// Returns `None` when the observations have no spread (ex. a single value),
/// in which case no data-driven bandwidth exists.
pub fn scott_bandwidth(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let sd = variance.sqrt();
    (sd > 0.0 && sd.is_finite()).then(|| sd * (n as f64).powf(-0.2))
}

/// Gaussian kernel density estimate of `values` over `[0, upper]`.
///
/// Divergence values cannot be negative, so the estimate is reflected at
/// zero: each observation contributes a mirrored kernel at `-value`. When the
/// observations have no spread, the bandwidth falls back to `bin_width`.
///
/// ```rust
/// let curve = orthoks_kde::kde(&[1.0, 1.2, 1.4], 3.0, 0.1)?;
/// // the curve peaks at the middle observation
/// let peak = curve.y.iter().position(|y| *y == curve.max());
/// assert_eq!(peak, Some(120));
/// # Ok::<(), orthoks_kde::EstimationError>(())
/// ```
pub fn kde(values: &[f64], upper: f64, bin_width: f64) -> Result<KdeCurve, EstimationError> {
    if values.is_empty() {
        return Err(EstimationError::EmptySample);
    }
    if let Some(v) = values.iter().find(|v| !v.is_finite()) {
        return Err(EstimationError::NonFinite(*v));
    }
    let x = grid(upper, bin_width)?;
    let bandwidth = scott_bandwidth(values).unwrap_or(bin_width);

    // density * n * bin_width, the n cancels against the kernel normalization
    let scale = bin_width / (bandwidth * (2.0 * PI).sqrt());
    let y = x
        .iter()
        .map(|&xi| {
            let mass: f64 = values
                .iter()
                .map(|&v| gaussian((xi - v) / bandwidth) + gaussian((xi + v) / bandwidth))
                .sum();
            mass * scale
        })
        .collect();

    Ok(KdeCurve { x, y, sample_size: values.len() })
}

/// Unnormalized standard Gaussian kernel.
fn gaussian(u: f64) -> f64 {
    (-0.5 * u * u).exp()
}
