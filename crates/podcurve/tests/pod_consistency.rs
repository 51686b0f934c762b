#![cfg(feature = "dev")]
//! Property-based consistency checks for the estimation pipeline.
//!
//! Random regression problems with known structure are pushed through the
//! public API; each property must hold for every generated instance:
//! - POD values are probabilities and never decrease with defect size
//! - The analytical lower bound never exceeds the curve it bounds
//! - Seeded bootstrap runs reproduce bit for bit
//! - Empirical quantiles stay inside the sample range

use podcurve::internals::math::quantile::empirical_quantile;
use podcurve::prelude::*;
use proptest::prelude::*;

/// Estimator run on a random noisy line, detection threshold placed near the
/// middle of the observed size range.
fn run_on_line(
    slope: f64,
    intercept: f64,
    noise: &[f64],
    detection_offset: f64,
) -> PodEstimator {
    let sizes: Vec<f64> = (1..=noise.len()).map(|i| i as f64).collect();
    // Structural jitter keeps the residuals non-degenerate even when the
    // generated noise collapses to a constant.
    const JITTER: [f64; 4] = [0.3, -0.3, -0.3, 0.3];
    let signals: Vec<f64> = sizes
        .iter()
        .zip(noise)
        .enumerate()
        .map(|(i, (&a, &e))| intercept + slope * a + e + JITTER[i % 4])
        .collect();

    let mid = 0.5 * (sizes[0] + sizes[sizes.len() - 1]);
    let detection = intercept + slope * mid + detection_offset;

    let mut estimator = Pod::new()
        .detection(detection)
        .adapter(Estimator)
        .build()
        .unwrap();
    estimator.run(&sizes, &signals).unwrap();
    estimator
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// POD is a probability and never decreases with defect size.
    #[test]
    fn prop_pod_monotone_probability(
        slope in 0.5f64..3.0,
        intercept in -2.0f64..2.0,
        noise in prop::collection::vec(-0.4f64..0.4, 12),
        detection_offset in -1.0f64..1.0,
    ) {
        let estimator = run_on_line(slope, intercept, &noise, detection_offset);

        let mut last = 0.0;
        for i in 0..=24 {
            let a = 1.0 + i as f64 * 0.5;
            let p = estimator.pod(a).unwrap();
            prop_assert!((0.0..=1.0).contains(&p));
            prop_assert!(p >= last - 1e-12, "POD fell from {} to {} at {}", last, p, a);
            last = p;
        }
    }

    /// The analytical lower bound never exceeds the mean curve.
    #[test]
    fn prop_wald_bound_below_curve(
        slope in 0.5f64..3.0,
        intercept in -2.0f64..2.0,
        noise in prop::collection::vec(-0.4f64..0.4, 12),
        confidence in 0.51f64..0.99,
    ) {
        let estimator = run_on_line(slope, intercept, &noise, 0.0);

        for i in 0..12 {
            let a = 1.0 + i as f64;
            let pod = estimator.pod(a).unwrap();
            let bound = estimator.pod_at_confidence(a, confidence).unwrap();
            prop_assert!((0.0..=1.0).contains(&bound));
            prop_assert!(bound <= pod + 1e-12, "bound {} above POD {} at {}", bound, pod, a);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    /// Seeded bootstrap runs reproduce bit for bit.
    #[test]
    fn prop_seeded_bootstrap_reproducible(seed in any::<u64>()) {
        let sizes: Vec<f64> = (1..=12).map(f64::from).collect();
        let signals: Vec<f64> = sizes
            .iter()
            .map(|&a| 1.2 * a + (a * 1.7).sin() * 0.5)
            .collect();

        let build = || {
            Pod::new()
                .detection(8.0)
                .confidence_method(Bootstrap)
                .simulation_size(10)
                .seed(seed)
                .adapter(Estimator)
                .build()
                .unwrap()
        };
        let mut first = build();
        let mut second = build();
        first.run(&sizes, &signals).unwrap();
        second.run(&sizes, &signals).unwrap();

        prop_assert_eq!(
            first.pod_at_confidence(6.0, 0.95).unwrap(),
            second.pod_at_confidence(6.0, 0.95).unwrap()
        );
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Quantiles stay inside the sample range.
    #[test]
    fn prop_quantile_in_range(
        mut values in prop::collection::vec(-1e6f64..1e6, 1..40),
        q in 0.0f64..=1.0,
    ) {
        let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let slack = 1e-9 * (hi - lo).max(1.0);

        let quantile = empirical_quantile(&mut values, q);
        prop_assert!(quantile >= lo - slack && quantile <= hi + slack);
    }
}
