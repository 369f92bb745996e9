//! Plot the ortholog Ks distributions of trios, or check which trios can be plotted.

use crate::availability::{resolve, GroupAvailability, MissingPairs, Resolution};
use crate::config::Config;
use crate::database::{KsListDb, PeakDb};
use crate::plot::{document_name, render, Figure, Panel};
use crate::species::PairKey;
use crate::trio::{group_outgroups, Trio};
use crate::utils::get_argument_path;
use clap::Parser;
use color_eyre::eyre::{eyre, Report, Result, WrapErr};
use color_eyre::Help;
use log::{debug, info, warn};
use orthoks_kde::{bootstrap_kde, Histogram};
use orthoks_table::Table;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[cfg(test)]
mod tests;

/// Number of bootstrap density curves drawn for each species pair.
pub const BOOTSTRAP_ITERATIONS: usize = 20;

// ----------------------------------------------------------------------------
// Arguments
// ----------------------------------------------------------------------------

/// Plot the ortholog Ks distributions of every usable trio.
#[derive(Clone, Debug, Default, Deserialize, Parser, Serialize)]
#[clap(verbatim_doc_comment)]
pub struct PlotArgs {
    /// Configuration file (JSON).
    #[clap(short = 'c', long, required = true)]
    pub config: PathBuf,

    /// Trio table (TSV).
    ///
    /// Defaults to rate_adjustment/<species>/ortholog_trios_<species>.tsv
    #[clap(short = 't', long)]
    pub trios: Option<PathBuf>,

    /// Output directory of the figures.
    ///
    /// Defaults to rate_adjustment/<species>. Created if it does not exist.
    #[clap(short = 'o', long)]
    pub output_dir: Option<PathBuf>,

    /// Seed of the bootstrap resampling, overrides the configuration.
    #[clap(short = 's', long)]
    pub seed: Option<u64>,

    /// Fail if no figure could be produced.
    #[clap(long)]
    pub strict: bool,
}

/// Report which trios can be plotted, without plotting.
#[derive(Clone, Debug, Default, Deserialize, Parser, Serialize)]
pub struct CheckArgs {
    /// Configuration file (JSON).
    #[clap(short = 'c', long, required = true)]
    pub config: PathBuf,

    /// Trio table (TSV).
    #[clap(short = 't', long)]
    pub trios: Option<PathBuf>,
}

/// Outcome of a [`plot`] run.
#[derive(Clone, Debug, Default)]
pub struct Summary {
    /// Documents written, one per divergent pair with a usable outgroup.
    pub documents: Vec<PathBuf>,
    /// Divergent pairs without any usable outgroup.
    pub skipped: Vec<String>,
    pub missing: MissingPairs,
}

// ----------------------------------------------------------------------------
// Inputs
// ----------------------------------------------------------------------------

/// Configuration, databases and availability shared by both commands.
struct Inputs {
    config: Config,
    ks_db: KsListDb,
    peak_db: PeakDb,
    resolution: Resolution,
}

impl Inputs {
    fn load(config: &Path, trios: Option<&Path>) -> Result<Self, Report> {
        let config = Config::read(&config)?;

        let default = config.default_trios_path();
        let trios_path = get_argument_path(trios, &default, "Trios TSV file")
            .suggestion("Generate the trios first, or pass them with --trios.")?;
        info!("Reading trios: {trios_path:?}");
        let trios = Trio::read(&trios_path)?;
        debug!("Read {} trios.", trios.len());

        let ks_db = KsListDb::read(&config.ks_list_db)?;
        let peak_db = PeakDb::load(&config.peak_db);

        let groups = group_outgroups(&trios);
        let resolution = resolve(&groups, &config.latin_names, &ks_db, &peak_db)?;

        Ok(Inputs { config, ks_db, peak_db, resolution })
    }
}

// ----------------------------------------------------------------------------
// Plot
// ----------------------------------------------------------------------------

/// Plot one document per divergent pair with at least one usable outgroup.
pub fn plot(args: &PlotArgs) -> Result<Summary, Report> {
    let inputs = Inputs::load(&args.config, args.trios.as_deref())?;
    let config = &inputs.config;
    let output_dir = args.output_dir.clone().unwrap_or_else(|| config.species_dir());

    let mut rng = match args.seed.or(config.seed) {
        Some(seed) => {
            debug!("Bootstrap seed: {seed}");
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let mut summary = Summary { missing: inputs.resolution.missing.clone(), ..Default::default() };

    for group in &inputs.resolution.groups {
        let (focal, sister) = (&group.focal_name, &group.sister_name);
        info!("Plotting ortholog distributions for divergent pair [{focal}, {sister}]");

        if group.usable.is_empty() {
            warn!("Skipping all outspecies of [{focal}, {sister}]: no trio has all of its data available");
            summary.skipped.push(group.pair.to_string());
            continue;
        }
        for outgroup in &group.unusable {
            warn!("Skipping outspecies {}: not all of its species pairs are available", outgroup.name);
        }

        let path = output_dir.join(document_name(focal, sister));
        let figures = figures(group, &inputs, &mut rng)?;
        render(&path, &figures, config.x_lim_ortho)
            .wrap_err_with(|| format!("Failed to plot divergent pair [{focal}, {sister}]"))?;
        info!("- Saving figure: {path:?}");
        summary.documents.push(path);
    }

    summary.missing.report();

    if summary.documents.is_empty() {
        let message = "No ortholog distributions were plotted, no trio has all of its data available.";
        if args.strict {
            return Err(eyre!(message)).suggestion("Run the check command to list the missing species pairs.");
        }
        warn!("{message}");
    }

    info!("All done");
    Ok(summary)
}

/// One figure per usable outgroup of a divergent pair.
///
/// The focal-sister panel is estimated once and shared by every figure.
fn figures<R>(group: &GroupAvailability, inputs: &Inputs, rng: &mut R) -> Result<Vec<Figure>, Report>
where
    R: Rng + ?Sized,
{
    let focal_sister = panel(&group.focal_sister, inputs, rng)?;

    group
        .usable
        .iter()
        .map(|outgroup| -> Result<Figure, Report> {
            info!("Using outspecies {}", outgroup.name);
            let title = format!(
                "{} and {}, outgroup {}",
                group.focal_name, group.sister_name, outgroup.name
            );
            let panels = [
                focal_sister.clone(),
                panel(&outgroup.focal_out, inputs, rng)?,
                panel(&outgroup.sister_out, inputs, rng)?,
            ];
            Ok(Figure { title, panels })
        })
        .collect()
}

/// Histogram, bootstrap curves and peak of one species pair.
fn panel<R>(key: &PairKey, inputs: &Inputs, rng: &mut R) -> Result<Panel, Report>
where
    R: Rng + ?Sized,
{
    let config = &inputs.config;
    let values = inputs.ks_db.get(key)?;
    debug!("{key}: {} Ks values", values.len());

    let histogram = Histogram::new(&values, config.max_ks_ortho, config.bin_width_ortho)?;
    let curves = bootstrap_kde(
        &values,
        BOOTSTRAP_ITERATIONS,
        config.x_lim_ortho,
        config.bin_width_ortho,
        rng,
    )
    .wrap_err_with(|| format!("Failed to estimate the Ks distribution of species pair {key}"))?;

    let (a, b) = key.names();
    Ok(Panel {
        title: format!("{a} - {b}"),
        histogram,
        curves,
        peak: inputs.peak_db.get(key).copied(),
    })
}

// ----------------------------------------------------------------------------
// Check
// ----------------------------------------------------------------------------

/// Print the availability of every trio and the missing species pairs.
pub fn check(args: &CheckArgs) -> Result<Resolution, Report> {
    let inputs = Inputs::load(&args.config, args.trios.as_deref())?;
    let resolution = inputs.resolution;

    println!("{}", availability_table(&resolution)?.to_markdown());
    resolution.missing.summary().iter().for_each(|line| println!("{line}"));

    Ok(resolution)
}

/// Markdown-ready table of every (divergent pair, outgroup) and whether it can be plotted.
///
/// ## Examples
///
/// ```rust
/// use orthoks::availability::Resolution;
/// use orthoks::run::availability_table;
///
/// let table = availability_table(&Resolution::default())?;
/// assert_eq!(table.headers, ["Divergent Pair", "Outgroup", "Status"]);
/// assert!(table.rows.is_empty());
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
pub fn availability_table(resolution: &Resolution) -> Result<Table<String>, Report> {
    let mut table = Table::new();
    table.headers = ["Divergent Pair", "Outgroup", "Status"].map(String::from).to_vec();

    for group in &resolution.groups {
        let pair = format!("{} - {}", group.focal_name, group.sister_name);
        let usable = group.usable.iter().map(|o| (o, "usable"));
        let unusable = group.unusable.iter().map(|o| (o, "missing data"));
        for (outgroup, status) in usable.chain(unusable) {
            table.add_row([pair.clone(), outgroup.name.clone(), status.to_string()])?;
        }
    }

    Ok(table)
}
