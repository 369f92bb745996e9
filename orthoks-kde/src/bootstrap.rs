use crate::{kde, EstimationError, KdeCurve};
use rand::Rng;

/// Draw a resample of the same size as `values`, uniformly with replacement.
///
/// ```rust
/// use rand::{rngs::StdRng, SeedableRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let sample = orthoks_kde::resample(&[0.1, 0.2, 0.3], &mut rng);
/// assert_eq!(sample.len(), 3);
/// assert!(sample.iter().all(|v| [0.1, 0.2, 0.3].contains(v)));
/// ```
pub fn resample<R>(values: &[f64], rng: &mut R) -> Vec<f64>
where
    R: Rng + ?Sized,
{
    let n = values.len();
    (0..n).map(|_| values[rng.gen_range(0..n)]).collect()
}

/// Bootstrap kernel density estimation.
///
/// Resamples `values` with replacement `iterations` times and estimates a
/// density of each resample over `[0, upper]`. The spread of the returned
/// curves conveys the uncertainty of the estimate.
///
/// ## Arguments
///
/// - `values` - Observations, must not be empty.
/// - `iterations` - Number of curves to return.
/// - `upper` - Upper bound of the value domain.
/// - `bin_width` - Histogram bin width, sets the grid resolution and scaling.
/// - `rng` - Source of randomness, seed it for reproducible curves.
pub fn bootstrap_kde<R>(
    values: &[f64],
    iterations: usize,
    upper: f64,
    bin_width: f64,
    rng: &mut R,
) -> Result<Vec<KdeCurve>, EstimationError>
where
    R: Rng + ?Sized,
{
    if values.is_empty() {
        return Err(EstimationError::EmptySample);
    }
    if iterations == 0 {
        return Err(EstimationError::NoIterations);
    }

    (0..iterations).map(|_| kde(&resample(values, rng), upper, bin_width)).collect()
}

/// Pointwise lower and upper bounds of a set of curves on the same grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Envelope {
    pub x: Vec<f64>,
    pub lower: Vec<f64>,
    pub upper: Vec<f64>,
}

/// Returns the [`Envelope`] of `curves`, [`None`] if there are no curves.
pub fn envelope(curves: &[KdeCurve]) -> Option<Envelope> {
    let first = curves.first()?;
    let mut lower = first.y.clone();
    let mut upper = first.y.clone();

    for curve in &curves[1..] {
        for (i, y) in curve.y.iter().enumerate().take(lower.len()) {
            lower[i] = lower[i].min(*y);
            upper[i] = upper[i].max(*y);
        }
    }

    Some(Envelope { x: first.x.clone(), lower, upper })
}
