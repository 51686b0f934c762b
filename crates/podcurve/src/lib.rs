//! # podcurve — Probability of Detection curves for Rust
//!
//! A fast, validated Probability of Detection (POD) estimator for
//! nondestructive testing reliability studies, built on the signal-response
//! ("â versus a") regression model.
//!
//! ## What is POD?
//!
//! Nondestructive inspection systems do not find every defect. A POD curve
//! quantifies that reliability: it gives the probability that a defect of a
//! given size is detected, as a function of size. The signal-response model
//! regresses the (optionally Box-Cox transformed) instrument signal on
//! defect size; a defect is detected when its signal clears a decision
//! threshold, so the POD at any size follows from the regression line and
//! the residual distribution. Lower confidence bounds on the curve, and the
//! size at which the bound reaches a target probability (such as `a90/95`),
//! are what certification workflows actually consume.
//!
//! ## Quick Start
//!
//! ### Typical Use
//!
//! ```rust
//! use podcurve::prelude::*;
//!
//! let sizes = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0];
//! let signals = vec![2.3, 3.8, 6.4, 7.9, 10.2, 12.1, 13.8, 16.2, 18.1, 19.7];
//!
//! // Build the estimator
//! let mut estimator = Pod::new()
//!     .detection(8.0)         // Signals above 8.0 count as detections
//!     .adapter(Estimator)
//!     .build()?;
//!
//! // Run the analysis, then query the curve
//! estimator.run(&sizes, &signals)?;
//!
//! let pod = estimator.pod(5.0)?;
//! let a90_95 = estimator.detection_size(0.90, 0.95)?;
//!
//! println!("POD(5.0) = {pod:.4}");
//! println!("{a90_95}");
//! # Result::<(), PodError>::Ok(())
//! ```
//!
//! ```text
//! POD(5.0) = 1.0000
//! a90/95 = 4.272135
//! ```
//!
//! ### Full Features
//!
//! ```rust
//! use podcurve::prelude::*;
//!
//! let sizes = vec![0.5, 1.0, 1.5, 2.0, 2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0];
//! let signals = vec![0.4, 2.3, 3.1, 4.2, 4.9, 6.3, 7.0, 8.4, 8.9, 10.2, 11.3, 11.9];
//!
//! // Build an estimator with all features enabled
//! let mut estimator = Pod::new()
//!     .detection(5.0)                  // Decision threshold in signal units
//!     .box_cox(Auto)                   // Variance-stabilizing transform
//!     .residual_model(Normal)          // Residual distribution family
//!     .noise_threshold(0.6)            // Censor signals below the noise floor
//!     .saturation_threshold(60.0)      // Censor saturated signals
//!     .confidence_method(Bootstrap)    // Pointwise bootstrap bounds
//!     .simulation_size(500)            // Bootstrap resamples
//!     .seed(42)                        // Reproducible resampling
//!     .adapter(Estimator)
//!     .build()?;
//!
//! estimator.run(&sizes, &signals)?;
//!
//! let report = estimator.analysis()?;
//! println!("{report}");
//!
//! let bound = estimator.pod_at_confidence(3.0, 0.95)?;
//! println!("POD(3.0) at 95% confidence = {bound:.4}");
//! # Result::<(), PodError>::Ok(())
//! ```
//!
//! ```text
//! POD Regression Analysis:
//!   Observations:   12 (uncensored 11, censored low 1, high 0)
//!   Box-Cox lambda: 0.9482
//!   Intercept:      0.733412
//!   Slope:          1.602584
//!   Std. error:     0.160220
//!   R-squared:      0.997350
//!   Residual model: Normal(mean = 0.0000, std dev = 0.1602)
//!
//! Diagnostics (two-sided p-values):
//!   Anderson-Darling:  0.8312
//!   Cramer-von Mises:  0.7845
//!   Kolmogorov:        0.9176
//!   Durbin-Watson:     0.5420
//!   Breusch-Pagan:     0.6671
//!   Harrison-McCabe:   0.7718
//!   Zero-mean:         0.9989
//!
//! POD(3.0) at 95% confidence = 0.6689
//! ```
//!
//! ### Result and Error Handling
//!
//! Fallible operations return `Result<_, PodError>`, and the `?` operator is
//! idiomatic:
//!
//! ```rust
//! use podcurve::prelude::*;
//! # let sizes = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! # let signals = vec![2.0, 4.1, 5.9, 8.2, 9.8];
//!
//! let mut estimator = Pod::new().detection(6.0).adapter(Estimator).build()?;
//!
//! estimator.run(&sizes, &signals)?;
//! # Result::<(), PodError>::Ok(())
//! ```
//!
//! But you can also handle failures explicitly; every degenerate outcome has
//! its own variant:
//!
//! ```rust
//! use podcurve::prelude::*;
//! # let sizes = vec![1.0, 2.0, 3.0, 4.0, 5.0];
//! # let signals = vec![2.0, 4.1, 5.9, 8.2, 9.8];
//! # let mut estimator = Pod::new().detection(6.0).adapter(Estimator).build()?;
//! # estimator.run(&sizes, &signals)?;
//!
//! match estimator.detection_size(0.90, 0.95) {
//!     Ok(result) => println!("{result}"),
//!     Err(PodError::NoSolution { reached, .. }) => {
//!         eprintln!("bound never clears the target; best is {reached:.4}");
//!     }
//!     Err(e) => eprintln!("estimation failed: {e}"),
//! }
//! # Result::<(), PodError>::Ok(())
//! ```
//!
//! ## References
//!
//! - Berens, A. P. (1988). "NDE Reliability Data Analysis", ASM Handbook,
//!   Vol. 17, Nondestructive Evaluation and Quality Control
//! - MIL-HDBK-1823A (2009). "Nondestructive Evaluation System Reliability
//!   Assessment", US Department of Defense
//!
//! ## License
//!
//! See the repository for license information and contribution guidelines.

// Layer 1: Primitives - data structures and basic utilities.
mod primitives;

// Layer 2: Math - pure mathematical functions.
mod math;

// Layer 3: Algorithms - transforms, regression, and residual distributions.
mod algorithms;

// Layer 4: Evaluation - confidence bounds and diagnostics.
mod evaluation;

// Layer 5: Engine - orchestration and execution control.
mod engine;

// Layer 6: Adapters - analysis and estimation adapters.
mod adapters;

// High-level fluent API for POD estimation.
mod api;

// Standard POD prelude.
pub mod prelude {
    pub use crate::api::{
        Adapter::{Analysis, Estimator},
        AnalysisReport,
        BoxCox::{Auto, Fixed, Off},
        CancelFlag,
        ConfidenceMethod::{Analytical, Bootstrap, KernelBootstrap},
        CustomResidual, DetectionSize, DiagnosticTest, Diagnostics, FittedResidual,
        PodBuilder as Pod, PodError, PodEstimator, PodPoint, RegressionAnalysis, ResidualFit,
        ResidualModel::{Custom, KernelSmoothing, Normal, Weibull},
    };
}

// Internal modules for development and testing.
//
// This module re-exports internal modules for development and testing purposes.
// It is only available with the `dev` feature enabled.
#[cfg(feature = "dev")]
pub mod internals {
    pub mod primitives {
        pub use crate::primitives::*;
    }
    pub mod math {
        pub use crate::math::*;
    }
    pub mod algorithms {
        pub use crate::algorithms::*;
    }
    pub mod evaluation {
        pub use crate::evaluation::*;
    }
    pub mod engine {
        pub use crate::engine::*;
    }
    pub mod adapters {
        pub use crate::adapters::*;
    }
    pub mod api {
        pub use crate::api::*;
    }
}
