use crate::*;
use rand::{rngs::StdRng, SeedableRng};

const KS: [f64; 8] = [0.31, 0.42, 0.45, 0.5, 0.52, 0.61, 0.77, 1.4];

/// Trapezoidal area under a curve.
fn area(curve: &KdeCurve) -> f64 {
    curve
        .x
        .windows(2)
        .zip(curve.y.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) / 2.0)
        .sum()
}

#[test]
fn bootstrap_returns_requested_curves() -> Result<(), EstimationError> {
    let mut rng = StdRng::seed_from_u64(1);
    let curves = bootstrap_kde(&KS, 20, 5.0, 0.1, &mut rng)?;

    assert_eq!(curves.len(), 20);
    let x = grid(5.0, 0.1)?;
    for curve in &curves {
        assert_eq!(curve.sample_size, KS.len());
        assert_eq!(curve.x, x);
        assert_eq!(curve.y.len(), x.len());
    }
    Ok(())
}

#[test]
fn resample_keeps_size() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..20 {
        let sample = resample(&KS, &mut rng);
        assert_eq!(sample.len(), KS.len());
        assert!(sample.iter().all(|v| KS.contains(v)));
    }
}

#[test]
fn resample_single_value() -> Result<(), EstimationError> {
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(resample(&[0.8], &mut rng), [0.8]);

    // every curve comes from the same one-value resample
    let curves = bootstrap_kde(&[0.8], 20, 5.0, 0.1, &mut rng)?;
    assert_eq!(curves.len(), 20);
    assert!(curves.windows(2).all(|pair| pair[0] == pair[1]));
    Ok(())
}

#[test]
fn bootstrap_is_reproducible_with_seed() -> Result<(), EstimationError> {
    let first = bootstrap_kde(&KS, 20, 5.0, 0.1, &mut StdRng::seed_from_u64(42))?;
    let second = bootstrap_kde(&KS, 20, 5.0, 0.1, &mut StdRng::seed_from_u64(42))?;
    assert_eq!(first, second);

    let other = bootstrap_kde(&KS, 20, 5.0, 0.1, &mut StdRng::seed_from_u64(43))?;
    assert_ne!(first, other);
    Ok(())
}

#[test]
fn bootstrap_rejects_bad_input() {
    let mut rng = StdRng::seed_from_u64(4);
    assert_eq!(bootstrap_kde(&[], 20, 5.0, 0.1, &mut rng), Err(EstimationError::EmptySample));
    assert_eq!(bootstrap_kde(&KS, 0, 5.0, 0.1, &mut rng), Err(EstimationError::NoIterations));
    assert_eq!(
        bootstrap_kde(&KS, 20, 5.0, 0.0, &mut rng),
        Err(EstimationError::InvalidBinWidth(0.0))
    );
    assert_eq!(
        bootstrap_kde(&KS, 20, -1.0, 0.1, &mut rng),
        Err(EstimationError::InvalidUpperBound(-1.0))
    );
    assert!(kde(&[0.5, f64::NAN], 5.0, 0.1).is_err());
}

#[test]
fn kde_area_matches_histogram_scale() -> Result<(), EstimationError> {
    let values = [1.0, 1.5, 2.0, 2.5];
    let curve = kde(&values, 5.0, 0.1)?;
    // counts scale: the area is n * bin_width
    let expected = values.len() as f64 * 0.1;
    assert!((area(&curve) - expected).abs() / expected < 0.01);
    Ok(())
}

#[test]
fn kde_reflects_at_zero() -> Result<(), EstimationError> {
    // a single value at zero, bandwidth falls back to the bin width
    let curve = kde(&[0.0], 1.0, 0.1)?;
    let expected = 2.0 / (2.0 * std::f64::consts::PI).sqrt();
    assert!((curve.y[0] - expected).abs() < 1e-12);
    assert_eq!(curve.max(), curve.y[0]);
    Ok(())
}

#[test]
fn scott_bandwidth_needs_spread() {
    assert_eq!(scott_bandwidth(&[]), None);
    assert_eq!(scott_bandwidth(&[0.5]), None);
    assert_eq!(scott_bandwidth(&[0.5, 0.5, 0.5]), None);

    let h = scott_bandwidth(&[1.0, 3.0]).unwrap();
    let expected = 2.0_f64.sqrt() * 2.0_f64.powf(-0.2);
    assert!((h - expected).abs() < 1e-12);
}

#[test]
fn envelope_bounds_every_curve() -> Result<(), EstimationError> {
    assert_eq!(envelope(&[]), None);

    let curves = bootstrap_kde(&KS, 20, 2.0, 0.1, &mut StdRng::seed_from_u64(5))?;
    let band = envelope(&curves).unwrap();
    assert_eq!(band.x, curves[0].x);
    for curve in &curves {
        for (i, y) in curve.y.iter().enumerate() {
            assert!(band.lower[i] <= *y && *y <= band.upper[i]);
        }
    }
    Ok(())
}

#[test]
fn histogram_counts_in_range() -> Result<(), EstimationError> {
    let histogram = Histogram::new(&KS, 1.0, 0.25)?;
    assert_eq!(histogram.counts, [0, 3, 3, 1]);
    assert_eq!(histogram.max(), 3);
    // 1.4 lies outside the range
    assert_eq!(histogram.total(), 7);
    Ok(())
}

#[test]
fn histogram_last_bin_extends_past_max() -> Result<(), EstimationError> {
    let histogram = Histogram::new(&[4.95, 5.0], 5.0, 0.7)?;
    assert_eq!(histogram.counts, [0, 0, 0, 0, 0, 0, 0, 2]);
    let edges = histogram.edges();
    assert!(edges[7] <= 4.95 && edges[8] >= 5.0);

    assert_eq!(Histogram::new(&[1.05], 1.1, 0.1)?.counts.len(), 11);
    Ok(())
}
