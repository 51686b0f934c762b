//! Error types for POD estimation.
//!
//! ## Purpose
//!
//! This module defines error conditions that can occur during POD analysis
//! and estimation, including input validation, configuration constraints,
//! fitting failures, and query-ordering violations.
//!
//! ## Design notes
//!
//! * **Contextual**: Errors include relevant values (e.g., actual vs. required counts).
//! * **Deferred**: Errors are often caught and stored during builder configuration.
//! * **Local failures stay local**: a diagnostic test that cannot run reports a
//!   `NaN` p-value instead of an error; only pipeline-level failures surface here.
//!
//! ## Key concepts
//!
//! 1. **Input validation**: Empty arrays, mismatched lengths, non-finite values.
//! 2. **Configuration**: Invalid simulation size, probability/confidence levels,
//!    threshold ordering, duplicate builder parameters.
//! 3. **Fitting**: Box-Cox domain violations, residual distribution failures.
//! 4. **Query ordering**: Estimator queries before `run()`, unreachable inversions.
//!
//! ## Invariants
//!
//! * All variants provide sufficient context for diagnosis.
//! * Error messages are consistent in tone and formatting.
//! * Numeric values in errors use the same types as the public API.
//!
//! ## Non-goals
//!
//! * This module does not perform the validation logic itself.
//! * This module does not provide error recovery or fallback strategies.

use std::error::Error;
use std::fmt::{Display, Formatter, Result};

// ============================================================================
// Error Type
// ============================================================================

/// Error type for POD analysis and estimation.
#[derive(Debug, Clone, PartialEq)]
pub enum PodError {
    /// Input arrays are empty.
    EmptyInput,

    /// `sizes` and `signals` arrays must have the same number of elements.
    MismatchedInputs {
        /// Number of elements in the `sizes` array.
        sizes_len: usize,
        /// Number of elements in the `signals` array.
        signals_len: usize,
    },

    /// Input data contains NaN or infinite values.
    InvalidNumericValue(String),

    /// Too few distinct uncensored defect sizes for the regression.
    InsufficientData {
        /// Number of distinct uncensored sizes available.
        got: usize,
        /// Minimum required distinct sizes.
        min: usize,
    },

    /// Box-Cox transform requested on a non-positive signal value.
    NonPositiveSignal {
        /// Index of the offending observation.
        index: usize,
        /// The non-positive signal value.
        value: f64,
    },

    /// Residual distribution fit failed to converge or the residuals are degenerate.
    DistributionFit(String),

    /// Estimator query issued before `run()` completed.
    NotRun,

    /// Detection-size inversion has no root in the observed size range.
    NoSolution {
        /// Requested detection probability.
        probability: f64,
        /// Requested confidence level.
        confidence: f64,
        /// Highest POD the bound reaches within the observed range.
        reached: f64,
    },

    /// Simulation size must be a positive integer.
    InvalidSimulationSize(usize),

    /// Probability or confidence level outside the open interval (0, 1).
    InvalidLevel {
        /// Name of the offending parameter.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },

    /// Noise threshold must be strictly below the saturation threshold.
    InvalidThresholds {
        /// The noise threshold provided.
        noise: f64,
        /// The saturation threshold provided.
        saturation: f64,
    },

    /// The analytical confidence method requires the Normal residual model.
    AnalyticalRequiresNormal,

    /// Parameter was set multiple times in the builder.
    DuplicateParameter {
        /// Name of the parameter that was set multiple times.
        parameter: &'static str,
    },

    /// A required builder parameter was never set.
    MissingParameter {
        /// Name of the missing parameter.
        parameter: &'static str,
    },

    /// `run()` was cancelled cooperatively; partial results were discarded.
    Cancelled,
}

// ============================================================================
// Display Implementation
// ============================================================================

impl Display for PodError {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        match self {
            Self::EmptyInput => write!(f, "Input arrays are empty"),
            Self::MismatchedInputs {
                sizes_len,
                signals_len,
            } => {
                write!(
                    f,
                    "Length mismatch: sizes has {sizes_len} points, signals has {signals_len}"
                )
            }
            Self::InvalidNumericValue(s) => write!(f, "Invalid numeric value: {s}"),
            Self::InsufficientData { got, min } => {
                write!(
                    f,
                    "Too few distinct uncensored sizes: got {got}, need at least {min}"
                )
            }
            Self::NonPositiveSignal { index, value } => {
                write!(
                    f,
                    "Box-Cox requires positive signals: signals[{index}]={value}"
                )
            }
            Self::DistributionFit(msg) => {
                write!(f, "Residual distribution fit failed: {msg}")
            }
            Self::NotRun => write!(f, "Estimator has not been run; call run() first"),
            Self::NoSolution {
                probability,
                confidence,
                reached,
            } => {
                write!(
                    f,
                    "POD bound at confidence {confidence} never reaches {probability} \
                     within the observed size range (maximum {reached})"
                )
            }
            Self::InvalidSimulationSize(n) => {
                write!(f, "Invalid simulation size: {n} (must be at least 1)")
            }
            Self::InvalidLevel { name, value } => {
                write!(f, "Invalid {name}: {value} (must be > 0 and < 1)")
            }
            Self::InvalidThresholds { noise, saturation } => {
                write!(
                    f,
                    "Invalid thresholds: noise {noise} must be below saturation {saturation}"
                )
            }
            Self::AnalyticalRequiresNormal => {
                write!(
                    f,
                    "Analytical confidence bounds require the Normal residual model"
                )
            }
            Self::DuplicateParameter { parameter } => {
                write!(
                    f,
                    "Parameter '{parameter}' was set multiple times. Each parameter can only be configured once."
                )
            }
            Self::MissingParameter { parameter } => {
                write!(f, "Required parameter '{parameter}' was not set")
            }
            Self::Cancelled => write!(f, "Run cancelled; partial results discarded"),
        }
    }
}

// ============================================================================
// Standard Error Trait
// ============================================================================

impl Error for PodError {}
