//! podcurve POD Estimation Examples
//!
//! This example demonstrates the core podcurve workflows:
//! - Signal-response regression analysis
//! - Box-Cox transformation of skewed signals
//! - Censored inspection data
//! - POD curves and the a90/95 detectability size
//! - Bootstrap confidence bounds

use podcurve::prelude::*;
use std::time::Instant;

fn main() -> Result<(), PodError> {
    println!("{}", "=".repeat(80));
    println!("podcurve POD Estimation Examples");
    println!("{}", "=".repeat(80));
    println!();

    example_1_basic_analysis()?;
    example_2_box_cox_search()?;
    example_3_censored_data()?;
    example_4_pod_curve()?;
    example_5_bootstrap_confidence()?;

    Ok(())
}

/// Example 1: Basic Signal-Response Analysis
/// Fits the linear signal model and prints the full report
fn example_1_basic_analysis() -> Result<(), PodError> {
    println!("Example 1: Basic Signal-Response Analysis");
    println!("{}", "-".repeat(80));

    // Synthetic eddy-current amplitudes over 20 crack sizes
    let sizes: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .map(|&a| 1.2 + 1.8 * a + 0.6 * (a * 1.3).sin())
        .collect();

    let report = Pod::new()
        .adapter(Analysis)
        .build()?
        .fit(&sizes, &signals)?;

    println!("Slope:     {:.4}", report.slope);
    println!("Intercept: {:.4}", report.intercept);
    println!("R-squared: {:.4}", report.r_squared);
    println!();
    println!("{}", report);

    println!();
    Ok(())
}

/// Example 2: Box-Cox Profile Search
/// Automatic selection of the variance-stabilizing exponent
fn example_2_box_cox_search() -> Result<(), PodError> {
    println!("Example 2: Box-Cox Profile Search");
    println!("{}", "-".repeat(80));

    // Quadratic response, the textbook case for lambda near 0.5
    let sizes: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .map(|&a| {
            let base = 0.5 + 0.9 * a;
            base * base * (1.0 + 0.08 * (a * 2.1).sin())
        })
        .collect();

    let report = Pod::new()
        .box_cox(Auto)
        .adapter(Analysis)
        .build()?
        .fit(&sizes, &signals)?;

    if let Some(lambda) = report.box_cox_lambda {
        println!("Selected lambda: {:.4}", lambda);
    }
    println!("R-squared after transform: {:.4}", report.r_squared);
    println!("Residual model: {}", report.residual_model);

    println!();
    Ok(())
}

/// Example 3: Censored Inspection Data
/// Noise floor and saturation thresholds partition the observations
fn example_3_censored_data() -> Result<(), PodError> {
    println!("Example 3: Censored Inspection Data");
    println!("{}", "-".repeat(80));

    let sizes: Vec<f64> = (1..=20).map(|i| i as f64 * 0.25).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .map(|&a| 1.1 * a + 0.4 * (a * 3.0).sin())
        .collect();

    let report = Pod::new()
        .box_cox(Off)
        .noise_threshold(0.9)
        .saturation_threshold(4.5)
        .adapter(Analysis)
        .build()?
        .fit(&sizes, &signals)?;

    println!("Observations:        {}", report.sizes.len());
    println!("Below noise floor:   {}", report.censored_low);
    println!("Above saturation:    {}", report.censored_high);
    println!("Used in regression:  {}", report.n_uncensored());

    println!();
    Ok(())
}

/// Example 4: POD Curve and a90/95
/// Detection probability versus defect size, with the analytical bound
fn example_4_pod_curve() -> Result<(), PodError> {
    println!("Example 4: POD Curve and a90/95");
    println!("{}", "-".repeat(80));

    let sizes: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .map(|&a| 1.2 + 1.8 * a + 0.6 * (a * 1.3).sin())
        .collect();

    let mut estimator = Pod::new()
        .detection(10.0)
        .adapter(Estimator)
        .build()?;
    estimator.run(&sizes, &signals)?;

    println!("   Size      POD    95% lower");
    println!("{}", "-".repeat(30));
    let grid: Vec<f64> = (1..=9).map(|i| i as f64).collect();
    for point in estimator.pod_table(&grid, Some(0.95))? {
        println!(
            "  {:5.2}  {:.5}      {:.5}",
            point.size,
            point.pod,
            point.lower_bound.unwrap_or(f64::NAN)
        );
    }

    let a90_95 = estimator.detection_size(0.90, 0.95)?;
    println!();
    println!("a90/95 = {:.3} (extrapolated: {})", a90_95.size, a90_95.extrapolated);

    println!();
    Ok(())
}

/// Example 5: Bootstrap Confidence Bounds
/// Seeded resampling for distribution-free lower bounds
fn example_5_bootstrap_confidence() -> Result<(), PodError> {
    println!("Example 5: Bootstrap Confidence Bounds");
    println!("{}", "-".repeat(80));

    let sizes: Vec<f64> = (1..=20).map(|i| i as f64 * 0.5).collect();
    let signals: Vec<f64> = sizes
        .iter()
        .map(|&a| 1.2 + 1.8 * a + 0.6 * (a * 1.3).sin())
        .collect();

    let start = Instant::now();
    let mut estimator = Pod::new()
        .detection(10.0)
        .confidence_method(Bootstrap)
        .simulation_size(500)
        .seed(42)
        .adapter(Estimator)
        .build()?;
    estimator.run(&sizes, &signals)?;
    let duration = start.elapsed();

    println!("500 bootstrap replicates in {:?}", duration);
    println!("POD at a = 5.0:             {:.5}", estimator.pod(5.0)?);
    println!("95% lower bound at a = 5.0: {:.5}", estimator.pod_at_confidence(5.0, 0.95)?);
    // Same seed, same bound: the resampler is fully deterministic
    println!("Run seed: {:?}", estimator.run_seed());

    println!();
    Ok(())
}
