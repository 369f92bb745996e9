//! `orthoks` plots the **ortho**log **Ks** distributions of species trios.
//!
//! A trio is a focal species, its sister species and an outgroup. For every
//! divergent (focal, sister) pair, `orthoks`:
//!
//! 1. Checks which outgroups have all three species pairs in the ortholog
//!    databases, and records the pairs that are missing.
//! 1. Draws a histogram of each pair's ortholog Ks values with bootstrapped
//!    kernel density curves and, when known, the distribution peak.
//! 1. Writes one SVG document per divergent pair, one row per usable outgroup.
//!
//! The density estimation lives in the [`orthoks_kde`] crate and the tables in
//! [`orthoks_table`].

pub mod availability;
pub mod cli;
pub mod config;
pub mod database;
pub mod plot;
pub mod run;
pub mod species;
pub mod trio;
pub mod utils;

#[doc(inline)]
pub use crate::cli::{Cli, Verbosity};
#[doc(inline)]
pub use crate::config::Config;
#[doc(inline)]
pub use crate::species::PairKey;
#[doc(inline)]
pub use crate::trio::Trio;
