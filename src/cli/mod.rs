//! [Command-line interface](Cli) (CLI) of the main binary.

use crate::run::{CheckArgs, PlotArgs};
use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

// ----------------------------------------------------------------------------
// CLI Entry Point
// ----------------------------------------------------------------------------

/// The command-line interface (CLI).
/// ---
/// The CLI parses user input in the main function, from [`std::env::args`](https://doc.rust-lang.org/std/env/fn.args.html).
/// ```no_run
/// use clap::Parser;
/// let args = orthoks::Cli::parse();
/// ```
/// The arguments can also be given manually:
/// ```rust
/// use clap::Parser;
/// use orthoks::cli::Command;
///
/// let input = ["orthoks", "plot", "--config", "config.json", "--seed", "7"];
/// let args = orthoks::Cli::parse_from(input);
/// match args.command {
///     Command::Plot(plot_args) => assert_eq!(plot_args.seed, Some(7)),
///     Command::Check(_) => unreachable!(),
/// }
/// serde_json::to_string_pretty(&args.verbosity)?;
/// # Ok::<(), color_eyre::eyre::Report>(())
/// ```
#[derive(Debug, Deserialize, Parser, Serialize)]
#[clap(name = "orthoks", author, version)]
#[clap(about = "orthoks plots the ortholog Ks distributions of species trios.")]
pub struct Cli {
    #[clap(subcommand)]
    /// Pass CLI arguments to a particular [Command].
    #[clap(help = "Set the command.")]
    pub command: Command,

    /// Set the output [Verbosity] level.
    #[clap(short = 'v', long)]
    #[clap(value_enum, default_value_t = Verbosity::default())]
    #[clap(hide_possible_values = false)]
    #[clap(global = true)]
    #[clap(help = "Set the output verbosity level.")]
    pub verbosity: Verbosity,
}

/// CLI [commands](#variants).
#[derive(Debug, Deserialize, Serialize, Subcommand)]
pub enum Command {
    #[clap(about = "Plot the ortholog Ks distributions of every trio with available data.")]
    Plot(PlotArgs),
    #[clap(about = "List which trios can be plotted and the missing species pairs.")]
    Check(CheckArgs),
}

// ----------------------------------------------------------------------------
// Verbosity
// ----------------------------------------------------------------------------

/// The output verbosity level.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize, ValueEnum)]
pub enum Verbosity {
    #[default]
    Info,
    Warn,
    Debug,
    Error,
}

impl std::fmt::Display for Verbosity {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        // lowercase for RUST_LOG
        let lowercase = format!("{self:?}").to_lowercase();
        write!(f, "{lowercase}")
    }
}
