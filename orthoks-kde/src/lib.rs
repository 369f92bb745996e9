//! Bootstrap kernel density estimation of divergence (Ks) distributions.
//!
//! ## Examples
//!
//! ```rust
//! use orthoks_kde::{bootstrap_kde, envelope, Histogram};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let ks = [0.4, 0.5, 0.55, 0.6, 0.62, 0.7, 1.1];
//! let mut rng = StdRng::seed_from_u64(0);
//!
//! let curves = bootstrap_kde(&ks, 20, 5.0, 0.1, &mut rng)?;
//! assert_eq!(curves.len(), 20);
//!
//! let band = envelope(&curves).expect("at least one curve");
//! assert!(band.lower.iter().zip(&band.upper).all(|(lo, hi)| lo <= hi));
//!
//! let histogram = Histogram::new(&ks, 5.0, 0.1)?;
//! assert_eq!(histogram.total(), ks.len());
//! # Ok::<(), orthoks_kde::EstimationError>(())
//! ```

mod bootstrap;
mod histogram;
mod kde;

#[cfg(test)]
mod tests;

#[doc(inline)]
pub use bootstrap::{bootstrap_kde, envelope, resample, Envelope};
#[doc(inline)]
pub use histogram::Histogram;
#[doc(inline)]
pub use kde::{grid, kde, scott_bandwidth, KdeCurve};

use thiserror::Error;

/// Grid points per histogram bin when evaluating a density.
pub const GRID_POINTS_PER_BIN: usize = 10;

/// Failures of the density estimation routines.
///
/// These indicate a caller broke the input contract (ex. an empty list of
/// observations reached the estimator).
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EstimationError {
    #[error("Cannot estimate a density from an empty list of observations.")]
    EmptySample,
    #[error("The number of bootstrap iterations must be positive.")]
    NoIterations,
    #[error("The upper bound of the value domain must be positive and finite: {0}")]
    InvalidUpperBound(f64),
    #[error("The bin width must be positive and finite: {0}")]
    InvalidBinWidth(f64),
    #[error("Observation is not a finite number: {0}")]
    NonFinite(f64),
}

/// Check the domain shared by the estimator and the histogram.
pub(crate) fn check_domain(upper: f64, bin_width: f64) -> Result<(), EstimationError> {
    if !upper.is_finite() || upper <= 0.0 {
        return Err(EstimationError::InvalidUpperBound(upper));
    }
    if !bin_width.is_finite() || bin_width <= 0.0 {
        return Err(EstimationError::InvalidBinWidth(bin_width));
    }
    Ok(())
}
