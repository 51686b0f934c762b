#![cfg(feature = "dev")]
//! Tests for the fit pipeline and the fitted model.
//!
//! These tests run the full regression pipeline on constructed data with
//! known coefficients:
//! - Exact recovery of slope and intercept from balanced noise
//! - Box-Cox interaction with the fit and the thresholds
//! - POD evaluation, capping, and the analytical bound
//! - Failure classification for deficient inputs
//!
//! ## Test Organization
//!
//! 1. **Recovery** - Coefficients recovered from designed data
//! 2. **Transforms** - Fixed and searched Box-Cox exponents
//! 3. **POD** - Curve evaluation, caps, and confidence bounds
//! 4. **Diagnostics** - Battery results on a known-good fit
//! 5. **Failures** - Insufficient data and degenerate residuals

use approx::{assert_abs_diff_eq, assert_relative_eq};
use podcurve::internals::algorithms::boxcox::BoxCox;
use podcurve::internals::engine::executor::{
    diagnose, fit_pipeline, AnalysisConfig, FittedModel, MIN_DISTINCT_SIZES,
};
use podcurve::internals::primitives::data::ObservationSet;
use podcurve::internals::primitives::errors::PodError;

// ============================================================================
// Helpers
// ============================================================================

/// Balanced noise with zero sum and zero size-covariance over every block of
/// four consecutive integer sizes. Least squares then recovers the underlying
/// line exactly in floating point.
fn balanced_noise(n: usize) -> Vec<f64> {
    const PATTERN: [f64; 4] = [0.5, -0.5, -0.5, 0.5];
    (0..n).map(|i| PATTERN[i % 4]).collect()
}

/// Twenty observations of signal = 2·size + balanced noise, untransformed.
fn linear_model() -> FittedModel {
    let sizes: Vec<f64> = (1..=20).map(f64::from).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .zip(balanced_noise(20))
        .map(|(&a, n)| 2.0 * a + n)
        .collect();
    let obs = ObservationSet::partition(&sizes, &signals, None, None);
    fit_pipeline(&obs, &AnalysisConfig::default()).expect("designed data fits")
}

// ============================================================================
// Recovery Tests
// ============================================================================

/// Test exact coefficient recovery.
///
/// Verifies the balanced noise cancels out of the least-squares sums.
#[test]
fn test_recovers_exact_line() {
    let model = linear_model();

    assert_relative_eq!(model.slope, 2.0, epsilon = 1e-12);
    assert_abs_diff_eq!(model.intercept, 0.0, epsilon = 1e-12);
    assert_eq!(model.n, 20);
    assert_relative_eq!(model.x_mean, 10.5, epsilon = 1e-12);
    assert_relative_eq!(model.sxx, 665.0, epsilon = 1e-12);

    // RSS is the noise energy: 20 · 0.25 = 5.
    assert_relative_eq!(model.std_error, (5.0 / 18.0_f64).sqrt(), epsilon = 1e-12);
    assert_relative_eq!(model.r_squared, 1.0 - 5.0 / 2665.0, epsilon = 1e-12);
    assert!(model.lambda.is_none());
}

/// Test residual bookkeeping.
///
/// Verifies residuals come back in size order and equal the injected noise.
#[test]
fn test_residuals_in_size_order() {
    let model = linear_model();
    let noise = balanced_noise(20);

    assert_eq!(model.residuals.len(), 20);
    for (r, n) in model.residuals.iter().zip(&noise) {
        assert_abs_diff_eq!(r, n, epsilon = 1e-12);
    }
    assert!(model.sizes.windows(2).all(|w| w[0] <= w[1]));
}

/// Test input order independence.
///
/// Verifies reversed input yields the same line with sorted internal sizes.
#[test]
fn test_unsorted_input() {
    let sizes: Vec<f64> = (1..=20).rev().map(f64::from).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .zip(balanced_noise(20))
        .map(|(&a, n)| 2.0 * a + n)
        .collect();
    let obs = ObservationSet::partition(&sizes, &signals, None, None);

    let model = fit_pipeline(&obs, &AnalysisConfig::default()).unwrap();

    assert_relative_eq!(model.slope, 2.0, epsilon = 1e-9);
    assert!(model.sizes.windows(2).all(|w| w[0] <= w[1]));
}

/// Test model geometry accessors.
///
/// Verifies leverage and degrees of freedom against hand values.
#[test]
fn test_model_geometry() {
    let model = linear_model();

    // At the design mean the leverage collapses to 1/n.
    assert_relative_eq!(model.leverage(10.5), 1.0 / 20.0, epsilon = 1e-12);
    assert!(model.leverage(1.0) > model.leverage(10.5));
    assert_relative_eq!(model.degrees_of_freedom(), 18.0);
    assert!(model.noise_t.is_none());
    assert!(model.saturation_t.is_none());
}

// ============================================================================
// Transform Tests
// ============================================================================

/// Test a fixed unit exponent.
///
/// Verifies λ = 1 shifts the response by −1 and leaves the slope alone.
#[test]
fn test_fixed_lambda_shifts_intercept() {
    let sizes: Vec<f64> = (1..=20).map(f64::from).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .zip(balanced_noise(20))
        .map(|(&a, n)| 2.0 * a + n)
        .collect();
    let obs = ObservationSet::partition(&sizes, &signals, None, None);
    let config = AnalysisConfig {
        box_cox: BoxCox::Fixed(1.0),
        ..AnalysisConfig::default()
    };

    let model = fit_pipeline(&obs, &config).unwrap();

    assert_eq!(model.lambda, Some(1.0));
    assert_relative_eq!(model.slope, 2.0, epsilon = 1e-12);
    assert_relative_eq!(model.intercept, -1.0, epsilon = 1e-12);
}

/// Test the automatic exponent search.
///
/// Verifies a squared response pulls the search toward λ = 1/2 and the
/// transformed fit explains the data.
#[test]
fn test_auto_lambda_on_squared_response() {
    let sizes: Vec<f64> = (1..=20).map(f64::from).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .zip(balanced_noise(20))
        .map(|(&a, n)| (1.0 + 0.3 * a + n) * (1.0 + 0.3 * a + n))
        .collect();
    let obs = ObservationSet::partition(&sizes, &signals, None, None);
    let config = AnalysisConfig {
        box_cox: BoxCox::Auto,
        ..AnalysisConfig::default()
    };

    let model = fit_pipeline(&obs, &config).unwrap();

    let lambda = model.lambda.expect("auto search selects an exponent");
    assert_abs_diff_eq!(lambda, 0.5, epsilon = 0.05);
    assert!(model.slope > 0.4 && model.slope < 0.8);
    assert!(model.r_squared > 0.9);
}

/// Test prediction in original units.
///
/// Verifies a fixed square-root transform inverts back through the line.
#[test]
fn test_predict_roundtrip() {
    let sizes: Vec<f64> = (1..=20).map(f64::from).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .zip(balanced_noise(20))
        .map(|(&a, n)| (1.0 + 0.3 * a + n) * (1.0 + 0.3 * a + n))
        .collect();
    let obs = ObservationSet::partition(&sizes, &signals, None, None);
    let config = AnalysisConfig {
        box_cox: BoxCox::Fixed(0.5),
        ..AnalysisConfig::default()
    };

    let model = fit_pipeline(&obs, &config).unwrap();

    // Transformed response is 0.6·size + 2·noise, so the line predicts
    // z(5) = 3 and the inverse transform maps it to (1 + 1.5)² = 6.25.
    assert_relative_eq!(model.predict_transformed(5.0), 3.0, epsilon = 1e-9);
    assert_relative_eq!(model.predict(5.0), 6.25, epsilon = 1e-9);
    assert_relative_eq!(
        model.inverse_transform(model.transform(3.7)),
        3.7,
        epsilon = 1e-9
    );
}

// ============================================================================
// POD Tests
// ============================================================================

/// Test POD at the even-odds size.
///
/// Verifies the size whose prediction equals the threshold detects half the
/// time.
#[test]
fn test_pod_at_even_odds() {
    let model = linear_model();

    // Prediction at size 5 is exactly the threshold 10.
    assert_relative_eq!(model.pod(5.0, 10.0), 0.5, epsilon = 1e-12);
    assert!(model.pod(4.0, 10.0) < 0.5);
    assert!(model.pod(6.0, 10.0) > 0.5);
}

/// Test POD monotonicity.
///
/// Verifies larger defects never detect less often.
#[test]
fn test_pod_monotone_in_size() {
    let model = linear_model();

    let mut last = 0.0;
    for i in 0..=40 {
        let a = 1.0 + i as f64 * 0.475;
        let p = model.pod(a, 10.0);
        assert!((0.0..=1.0).contains(&p));
        assert!(p >= last - 1e-12, "POD fell from {last} to {p} at size {a}");
        last = p;
    }
}

/// Test the censoring caps.
///
/// Verifies predictions outside the measurable band pin POD to 0 or 1.
#[test]
fn test_pod_caps() {
    let sizes: Vec<f64> = (1..=20).map(f64::from).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .zip(balanced_noise(20))
        .map(|(&a, n)| 2.0 * a + n)
        .collect();
    let obs = ObservationSet::partition(&sizes, &signals, Some(4.0), Some(18.0));
    let config = AnalysisConfig {
        noise_threshold: Some(4.0),
        saturation_threshold: Some(18.0),
        ..AnalysisConfig::default()
    };

    let model = fit_pipeline(&obs, &config).unwrap();

    // Predicted signal 3 sits below the noise floor; 20 sits above saturation.
    assert_eq!(model.pod(1.5, 10.0), 0.0);
    assert_eq!(model.pod(10.0, 10.0), 1.0);
    assert_eq!(model.wald_bound(1.5, 10.0, 0.95), 0.0);
    assert_eq!(model.wald_bound(10.0, 10.0, 0.95), 1.0);

    // Between the caps the curve is the usual exceedance probability.
    assert!(model.pod(5.0, 10.0) > 0.0 && model.pod(5.0, 10.0) < 1.0);
}

/// Test the analytical bound against the mean curve.
///
/// Verifies the lower bound never exceeds the POD it bounds and tightens as
/// confidence drops.
#[test]
fn test_wald_bound_below_pod() {
    let model = linear_model();

    for i in 0..=10 {
        let a = 3.0 + 0.5 * i as f64;
        let pod = model.pod(a, 10.0);
        let bound = model.wald_bound(a, 10.0, 0.95);
        assert!(
            bound <= pod + 1e-12,
            "bound {bound} above POD {pod} at size {a}"
        );
    }

    let b90 = model.wald_bound(6.0, 10.0, 0.90);
    let b95 = model.wald_bound(6.0, 10.0, 0.95);
    let b99 = model.wald_bound(6.0, 10.0, 0.99);
    assert!(b90 > b95 && b95 > b99);
}

// ============================================================================
// Diagnostic Tests
// ============================================================================

/// Test the battery on the designed fit.
///
/// Verifies the structural tests report a clean model and every entry is a
/// probability.
#[test]
fn test_diagnose_designed_fit() {
    let model = linear_model();
    let diag = diagnose(&model);

    // Balanced noise has no autocorrelation, constant spread, zero mean.
    assert_relative_eq!(diag.durbin_watson, 1.0, epsilon = 1e-12);
    assert_relative_eq!(diag.breusch_pagan, 1.0, epsilon = 1e-12);
    assert_relative_eq!(diag.harrison_mccabe, 1.0, epsilon = 1e-12);
    assert_relative_eq!(diag.zero_mean, 1.0, epsilon = 1e-12);

    // The two-point noise is decidedly not Normal; the normality entries
    // still must be probabilities.
    for p in [
        diag.anderson_darling,
        diag.cramer_von_mises,
        diag.kolmogorov,
    ] {
        assert!(p.is_finite() && (0.0..=1.0).contains(&p));
    }
}

// ============================================================================
// Failure Tests
// ============================================================================

/// Test the sufficiency check.
///
/// Verifies duplicate sizes do not count toward the distinct minimum.
#[test]
fn test_insufficient_distinct_sizes() {
    let obs = ObservationSet::partition(
        &[1.0, 1.0, 2.0, 2.0],
        &[3.0, 3.1, 5.0, 5.2],
        None,
        None,
    );

    let err = fit_pipeline(&obs, &AnalysisConfig::default()).unwrap_err();
    assert_eq!(
        err,
        PodError::InsufficientData {
            got: 2,
            min: MIN_DISTINCT_SIZES
        }
    );
}

/// Test the Box-Cox domain check.
///
/// Verifies the error reports the caller's original index.
#[test]
fn test_nonpositive_signal_reports_input_index() {
    let obs = ObservationSet::partition(
        &[1.0, 2.0, 3.0, 4.0],
        &[1.0, 2.0, -1.0, 3.0],
        None,
        None,
    );
    let config = AnalysisConfig {
        box_cox: BoxCox::Auto,
        ..AnalysisConfig::default()
    };

    let err = fit_pipeline(&obs, &config).unwrap_err();
    assert_eq!(err, PodError::NonPositiveSignal { index: 2, value: -1.0 });
}

/// Test censoring rescuing a non-positive signal.
///
/// Verifies a noise threshold removes the offending point before the
/// transform sees it.
#[test]
fn test_censoring_rescues_nonpositive_signal() {
    let sizes = [1.0, 2.0, 3.0, 4.0, 5.0];
    let signals = [2.0, 3.1, -1.0, 5.2, 6.1];
    let obs = ObservationSet::partition(&sizes, &signals, Some(0.5), None);
    let config = AnalysisConfig {
        box_cox: BoxCox::Fixed(0.0),
        noise_threshold: Some(0.5),
        ..AnalysisConfig::default()
    };

    let model = fit_pipeline(&obs, &config).unwrap();
    assert_eq!(model.n, 4);
}

/// Test degenerate residuals.
///
/// Verifies an exact linear response fails the residual fit rather than
/// producing a zero-width distribution.
#[test]
fn test_exact_line_degenerate_residuals() {
    let sizes: Vec<f64> = (1..=5).map(f64::from).collect();
    let signals: Vec<f64> = sizes.iter().map(|&a| 2.0 * a + 1.0).collect();
    let obs = ObservationSet::partition(&sizes, &signals, None, None);

    let err = fit_pipeline(&obs, &AnalysisConfig::default()).unwrap_err();
    assert!(matches!(err, PodError::DistributionFit(_)));
}
