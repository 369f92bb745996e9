use crate::{check_domain, EstimationError};

/// Counts of observations in bins of fixed width over `[0, max]`.
///
/// Observations outside the range are ignored. When `max` is not a multiple
/// of `bin_width` the last bin extends past `max`.
#[derive(Clone, Debug, PartialEq)]
pub struct Histogram {
    pub bin_width: f64,
    pub counts: Vec<usize>,
}

impl Histogram {
    /// ```rust
    /// let histogram = orthoks_kde::Histogram::new(&[0.05, 0.15, 0.19, 1.0, 7.0], 1.0, 0.5)?;
    /// assert_eq!(histogram.counts, [3, 1]);
    /// assert_eq!(histogram.edges(), [0.0, 0.5, 1.0]);
    /// # Ok::<(), orthoks_kde::EstimationError>(())
    /// ```
    pub fn new(values: &[f64], max: f64, bin_width: f64) -> Result<Self, EstimationError> {
        check_domain(max, bin_width)?;
        // tolerance keeps ex. 1.1 / 0.1 at 11 bins
        let n_bins = ((max / bin_width - 1e-9).ceil() as usize).max(1);
        let mut counts = vec![0; n_bins];

        values.iter().filter(|v| (0.0..=max).contains(*v)).for_each(|v| {
            let i = ((v / bin_width).floor() as usize).min(n_bins - 1);
            counts[i] += 1;
        });

        Ok(Histogram { bin_width, counts })
    }

    /// Bin edges, one more than the number of bins.
    pub fn edges(&self) -> Vec<f64> {
        (0..=self.counts.len()).map(|i| i as f64 * self.bin_width).collect()
    }

    /// Highest bin count.
    pub fn max(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or_default()
    }

    /// Number of observations inside the histogram range.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
