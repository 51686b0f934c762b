#![cfg(feature = "dev")]
//! Tests for the regression diagnostic battery.
//!
//! These tests verify the seven diagnostic p-values reported with every
//! analysis:
//! - Normality (Anderson-Darling, Cramér-von Mises)
//! - Goodness of fit (Kolmogorov against the fitted distribution)
//! - Autocorrelation (Durbin-Watson)
//! - Heteroscedasticity (Breusch-Pagan, Harrison-McCabe)
//! - Location (zero-mean t-test)
//!
//! ## Test Organization
//!
//! 1. **Normality** - Clean and pathological samples
//! 2. **Goodness of Fit** - Kolmogorov against the fitted model
//! 3. **Autocorrelation** - Alternating and trending residuals
//! 4. **Heteroscedasticity** - Constant and growing spread
//! 5. **Location** - Centered and offset residuals
//! 6. **Sample Minima** - NaN reporting below each test's minimum n
//! 7. **Battery** - `compute_diagnostics` assembly and lookup

use approx::assert_relative_eq;
use statrs::distribution::{ContinuousCDF, Normal};

use podcurve::internals::algorithms::distributions::{fit_residuals, ResidualModel};
use podcurve::internals::evaluation::diagnostics::{
    anderson_darling_p, breusch_pagan_p, compute_diagnostics, cramer_von_mises_p,
    durbin_watson_p, harrison_mccabe_p, kolmogorov_p, zero_mean_p, DiagnosticTest,
};

/// Normal scores: the expected order statistics of a standard normal sample.
fn normal_scores(n: usize) -> Vec<f64> {
    let phi = Normal::new(0.0, 1.0).unwrap();
    (0..n)
        .map(|i| phi.inverse_cdf((i as f64 + 1.0 - 0.375) / (n as f64 + 0.25)))
        .collect()
}

/// Ten points split evenly between -1 and +1; as far from normal as a
/// standardized sample gets.
fn bimodal(n_half: usize) -> Vec<f64> {
    let mut v = vec![-1.0; n_half];
    v.extend(std::iter::repeat(1.0).take(n_half));
    v
}

// ============================================================================
// Normality Tests
// ============================================================================

/// Test Anderson-Darling on clean data.
///
/// Verifies a large p-value on the best-fitting normal sample possible.
#[test]
fn test_anderson_darling_clean() {
    let p = anderson_darling_p(&normal_scores(20)).expect("n = 20 suffices");
    assert!(p > 0.5, "normal scores should not reject, got p = {p}");
}

/// Test Anderson-Darling on bimodal data.
///
/// Verifies a strong rejection of a two-point sample.
#[test]
fn test_anderson_darling_bimodal() {
    let p = anderson_darling_p(&bimodal(10)).expect("n = 20 suffices");
    assert!(p < 0.01, "bimodal sample should reject, got p = {p}");
}

/// Test Cramér-von Mises on clean data.
///
/// Verifies a large p-value on normal scores.
#[test]
fn test_cramer_von_mises_clean() {
    let p = cramer_von_mises_p(&normal_scores(20)).expect("n = 20 suffices");
    assert!(p > 0.5, "normal scores should not reject, got p = {p}");
}

/// Test Cramér-von Mises on bimodal data.
///
/// Verifies a strong rejection of a two-point sample.
#[test]
fn test_cramer_von_mises_bimodal() {
    let p = cramer_von_mises_p(&bimodal(10)).expect("n = 20 suffices");
    assert!(p < 0.01, "bimodal sample should reject, got p = {p}");
}

// ============================================================================
// Goodness of Fit Tests
// ============================================================================

/// Test Kolmogorov with a matching fit.
///
/// Verifies a large p-value when the fitted normal tracks the sample.
#[test]
fn test_kolmogorov_matching_fit() {
    let residuals = normal_scores(20);
    let fitted = fit_residuals(&ResidualModel::Normal, &residuals).unwrap();

    let p = kolmogorov_p(&residuals, &fitted).expect("n = 20 suffices");
    assert!(p > 0.5, "matching fit should not reject, got p = {p}");
}

/// Test Kolmogorov with a poor fit.
///
/// Verifies rejection when a normal is fitted to a bimodal sample.
#[test]
fn test_kolmogorov_poor_fit() {
    let residuals = bimodal(10);
    let fitted = fit_residuals(&ResidualModel::Normal, &residuals).unwrap();

    let p = kolmogorov_p(&residuals, &fitted).expect("n = 20 suffices");
    assert!(p < 0.05, "bimodal sample should reject, got p = {p}");
}

// ============================================================================
// Autocorrelation Tests
// ============================================================================

/// Test Durbin-Watson on alternating residuals.
///
/// Verifies detection of strong negative lag-1 correlation.
#[test]
fn test_durbin_watson_alternating() {
    let residuals: Vec<f64> = (0..10).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

    let p = durbin_watson_p(&residuals).expect("n = 10 suffices");
    assert!(p < 0.05, "alternating residuals should reject, got p = {p}");
}

/// Test Durbin-Watson on trending residuals.
///
/// Verifies detection of strong positive lag-1 correlation.
#[test]
fn test_durbin_watson_trending() {
    let residuals: Vec<f64> = (1..=10).map(|i| f64::from(i) - 5.5).collect();

    let p = durbin_watson_p(&residuals).expect("n = 10 suffices");
    assert!(p < 0.01, "trending residuals should reject, got p = {p}");
}

// ============================================================================
// Heteroscedasticity Tests
// ============================================================================

/// Test Breusch-Pagan on homoscedastic residuals.
///
/// Verifies p = 1 when every squared residual is identical.
#[test]
fn test_breusch_pagan_constant_spread() {
    let sizes: Vec<f64> = (1..=10).map(f64::from).collect();
    let residuals: Vec<f64> = (0..10).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

    let p = breusch_pagan_p(&sizes, &residuals).expect("n = 10 suffices");
    assert_relative_eq!(p, 1.0, epsilon = 1e-12);
}

/// Test Breusch-Pagan on size-proportional residuals.
///
/// Verifies rejection when the spread grows with defect size.
#[test]
fn test_breusch_pagan_growing_spread() {
    let sizes: Vec<f64> = (1..=10).map(f64::from).collect();
    let residuals: Vec<f64> = sizes
        .iter()
        .enumerate()
        .map(|(i, &a)| if i % 2 == 0 { a } else { -a })
        .collect();

    let p = breusch_pagan_p(&sizes, &residuals).expect("n = 10 suffices");
    assert!(p < 0.01, "growing spread should reject, got p = {p}");
}

/// Test Harrison-McCabe on balanced residuals.
///
/// Verifies p = 1 when both halves carry equal variance.
#[test]
fn test_harrison_mccabe_balanced() {
    let residuals: Vec<f64> = (0..10).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

    let p = harrison_mccabe_p(&residuals).expect("n = 10 suffices");
    assert_relative_eq!(p, 1.0, epsilon = 1e-12);
}

/// Test Harrison-McCabe on unbalanced residuals.
///
/// Verifies rejection when variance concentrates in the second half.
#[test]
fn test_harrison_mccabe_unbalanced() {
    let mut residuals = vec![0.1; 5];
    residuals.extend(std::iter::repeat(1.0).take(5));

    let p = harrison_mccabe_p(&residuals).expect("n = 10 suffices");
    assert!(p < 0.05, "unbalanced spread should reject, got p = {p}");
}

// ============================================================================
// Location Tests
// ============================================================================

/// Test the zero-mean t-test on centered residuals.
///
/// Verifies p = 1 for an exactly symmetric sample.
#[test]
fn test_zero_mean_centered() {
    let residuals: Vec<f64> = (0..10).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();

    let p = zero_mean_p(&residuals).expect("n = 10 suffices");
    assert_relative_eq!(p, 1.0, epsilon = 1e-12);
}

/// Test the zero-mean t-test on offset residuals.
///
/// Verifies rejection when the sample mean is far from zero.
#[test]
fn test_zero_mean_offset() {
    let residuals = [5.0, 5.1, 4.9, 5.05, 4.95];

    let p = zero_mean_p(&residuals).expect("n = 5 suffices");
    assert!(p < 0.001, "offset residuals should reject, got p = {p}");
}

/// Test the zero-mean t-test on constant residuals.
///
/// Verifies that zero spread cannot be tested.
#[test]
fn test_zero_mean_degenerate() {
    assert!(zero_mean_p(&[2.0, 2.0, 2.0, 2.0]).is_none());
}

// ============================================================================
// Sample Minima Tests
// ============================================================================

/// Test every per-test minimum sample size.
///
/// Verifies `None` one observation below each test's minimum.
#[test]
fn test_sample_minima() {
    let seven = normal_scores(7);
    assert!(anderson_darling_p(&seven).is_none());
    assert!(cramer_von_mises_p(&seven).is_none());

    let fitted = fit_residuals(&ResidualModel::Normal, &normal_scores(10)).unwrap();
    assert!(kolmogorov_p(&[0.1, -0.1], &fitted).is_none());

    assert!(durbin_watson_p(&[0.1, -0.2, 0.3]).is_none());

    let four = [0.1, -0.2, 0.3, -0.1];
    assert!(breusch_pagan_p(&[1.0, 2.0, 3.0, 4.0], &four).is_none());
    assert!(harrison_mccabe_p(&four).is_none());

    assert!(zero_mean_p(&[0.1, -0.1]).is_none());
}

// ============================================================================
// Battery Tests
// ============================================================================

/// Test battery assembly on a full-size sample.
///
/// Verifies every p-value is populated and retrievable by test.
#[test]
fn test_battery_full_sample() {
    let sizes: Vec<f64> = (1..=20).map(f64::from).collect();
    let residuals = normal_scores(20);
    let fitted = fit_residuals(&ResidualModel::Normal, &residuals).unwrap();

    let diagnostics = compute_diagnostics(&sizes, &residuals, &fitted);

    for test in DiagnosticTest::ALL {
        let p = diagnostics.p_value(test);
        assert!(
            p.is_finite() && (0.0..=1.0).contains(&p),
            "{} should be a probability, got {p}",
            test.name()
        );
    }
}

/// Test battery assembly on an undersized sample.
///
/// Verifies NaN for the tests below their minimum while the rest run.
#[test]
fn test_battery_small_sample() {
    let sizes = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let residuals = vec![0.3, -0.5, 0.2, 0.4, -0.4];
    let fitted = fit_residuals(&ResidualModel::Normal, &residuals).unwrap();

    let diagnostics = compute_diagnostics(&sizes, &residuals, &fitted);

    assert!(diagnostics.p_value(DiagnosticTest::AndersonDarling).is_nan());
    assert!(diagnostics.p_value(DiagnosticTest::CramerVonMises).is_nan());
    assert!(diagnostics.p_value(DiagnosticTest::Kolmogorov).is_finite());
    assert!(diagnostics.p_value(DiagnosticTest::DurbinWatson).is_finite());
    assert!(diagnostics.p_value(DiagnosticTest::BreuschPagan).is_finite());
    assert!(diagnostics.p_value(DiagnosticTest::HarrisonMcCabe).is_finite());
    assert!(diagnostics.p_value(DiagnosticTest::ZeroMean).is_finite());
}

/// Test the battery catalogue.
///
/// Verifies the seven tests carry distinct display names.
#[test]
fn test_battery_names() {
    let mut names: Vec<&str> = DiagnosticTest::ALL.iter().map(|t| t.name()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 7);
}
