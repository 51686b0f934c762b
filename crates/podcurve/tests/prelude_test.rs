#![cfg(feature = "dev")]
//! Tests for the prelude module.
//!
//! These tests verify that the prelude exports all necessary types and
//! variants for convenient usage of the POD API. The prelude should provide
//! a one-stop import for common estimation workflows.
//!
//! ## Test Organization
//!
//! 1. **Import Verification** - All prelude exports are accessible
//! 2. **Type Usage** - Variants can be used without qualification
//! 3. **Builder Pattern** - Complete workflows work with prelude imports

use podcurve::prelude::*;

// ============================================================================
// Import Verification Tests
// ============================================================================

/// Test that all prelude imports work correctly.
///
/// Verifies that the prelude exports all necessary types for POD usage.
#[test]
fn test_prelude_imports() {
    let sizes = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let signals = vec![2.1, 3.9, 6.2, 8.1, 9.8];

    // Verify Pod (PodBuilder), Adapter markers, and Result are useable
    let result = Pod::new()
        .adapter(Analysis)
        .build()
        .unwrap()
        .fit(&sizes, &signals);

    assert!(result.is_ok(), "Basic fit should work with prelude imports");
}

/// Test BoxCox variants are available.
///
/// Verifies that the transform modes are exported.
#[test]
fn test_prelude_box_cox() {
    let _ = Pod::new().box_cox(Off);
    let _ = Pod::new().box_cox(Auto);
    let _ = Pod::new().box_cox(Fixed(0.5));
}

/// Test ResidualModel variants are available.
///
/// Verifies that the residual families are exported.
#[test]
fn test_prelude_residual_model() {
    let _ = Pod::new().residual_model(Normal);
    let _ = Pod::new().residual_model(Weibull);
    let _ = Pod::new().residual_model(KernelSmoothing);
}

/// Test ConfidenceMethod variants are available.
///
/// Verifies that the bound strategies are exported.
#[test]
fn test_prelude_confidence_method() {
    let _ = Pod::new().confidence_method(Analytical);
    let _ = Pod::new().confidence_method(Bootstrap);
    let _ = Pod::new().confidence_method(KernelBootstrap);
}

/// Test adapter markers are available.
///
/// Verifies that both adapters are exported.
#[test]
fn test_prelude_adapters() {
    let sizes = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    let signals = vec![2.1, 3.9, 6.2, 8.1, 9.8];

    // Analysis adapter
    let _ = Pod::new()
        .adapter(Analysis)
        .build()
        .unwrap()
        .fit(&sizes, &signals);

    // Estimator adapter
    let _ = Pod::new().detection(5.0).adapter(Estimator).build();
}

/// Test the cancellation flag is available.
///
/// Verifies that CancelFlag is exported and attachable.
#[test]
fn test_prelude_cancel_flag() {
    let flag = CancelFlag::new();
    let _ = Pod::new()
        .detection(5.0)
        .cancel_flag(flag.clone())
        .adapter(Estimator)
        .build()
        .unwrap();

    assert!(!flag.is_cancelled());
}

/// Test complete workflow with prelude.
///
/// Verifies that a complete estimation workflow works with only prelude
/// imports.
#[test]
fn test_prelude_complete_workflow() {
    let sizes: Vec<f64> = (1..=12).map(f64::from).collect();
    let signals: Vec<f64> = sizes.iter().map(|&a| 1.5 * a + (a * 0.9).sin()).collect();

    let mut estimator = Pod::new()
        .detection(9.0)
        .box_cox(Off)
        .residual_model(Normal)
        .confidence_method(Bootstrap)
        .simulation_size(50)
        .seed(42)
        .adapter(Estimator)
        .build()
        .unwrap();

    estimator
        .run(&sizes, &signals)
        .expect("Complete workflow should succeed");

    // Verify all queries are answerable
    let pod = estimator.pod(6.0).unwrap();
    assert!((0.0..=1.0).contains(&pod));

    let bound = estimator.pod_at_confidence(6.0, 0.95).unwrap();
    assert!(bound <= pod + 1e-12);

    let table = estimator.pod_table(&sizes, Some(0.95)).unwrap();
    assert_eq!(table.len(), sizes.len());

    let report = estimator.analysis().unwrap();
    assert_eq!(report.n_uncensored(), sizes.len());
}

/// Test error types are available.
///
/// Verifies that error handling works with prelude imports.
#[test]
fn test_prelude_error_handling() {
    let sizes: Vec<f64> = vec![];
    let signals: Vec<f64> = vec![];

    let result = Pod::new()
        .adapter(Analysis)
        .build()
        .unwrap()
        .fit(&sizes, &signals);

    // Should be able to match on error types from prelude
    assert!(matches!(result, Err(PodError::EmptyInput)));
}
