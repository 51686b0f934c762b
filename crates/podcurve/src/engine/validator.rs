//! Input and configuration validation.
//!
//! ## Purpose
//!
//! This module centralizes the fail-fast checks performed when a builder is
//! finalized and when data enters a fit or a run. Validation is static and
//! stateless: each check either passes or returns the specific error.
//!
//! ## Design notes
//!
//! * **Fail-fast**: The first violated check aborts with its error; nothing
//!   is partially configured.
//! * **Build-time over run-time**: everything knowable from configuration
//!   alone (levels, thresholds, method/model compatibility) is rejected at
//!   `build()`, leaving only data-dependent failures for fit time.

use crate::algorithms::boxcox::BoxCox;
use crate::algorithms::distributions::ResidualModel;
use crate::evaluation::confidence::ConfidenceMethod;
use crate::primitives::errors::PodError;

// ============================================================================
// Validator
// ============================================================================

/// Static validation entry points.
pub struct Validator;

impl Validator {
    // ========================================================================
    // Core Input Validation
    // ========================================================================

    /// Validate the raw size/signal input arrays.
    pub fn validate_inputs(sizes: &[f64], signals: &[f64]) -> Result<(), PodError> {
        // Check 1: Non-empty arrays
        if sizes.is_empty() || signals.is_empty() {
            return Err(PodError::EmptyInput);
        }

        // Check 2: Matching lengths
        if sizes.len() != signals.len() {
            return Err(PodError::MismatchedInputs {
                sizes_len: sizes.len(),
                signals_len: signals.len(),
            });
        }

        // Check 3: All values finite
        for (i, &v) in sizes.iter().enumerate() {
            if !v.is_finite() {
                return Err(PodError::InvalidNumericValue(format!("sizes[{i}] = {v}")));
            }
        }
        for (i, &v) in signals.iter().enumerate() {
            if !v.is_finite() {
                return Err(PodError::InvalidNumericValue(format!("signals[{i}] = {v}")));
            }
        }

        Ok(())
    }

    // ========================================================================
    // Configuration Validation
    // ========================================================================

    /// Reject builders where a parameter was set more than once.
    pub fn validate_no_duplicates(
        duplicate_param: Option<&'static str>,
    ) -> Result<(), PodError> {
        if let Some(param) = duplicate_param {
            return Err(PodError::DuplicateParameter { parameter: param });
        }
        Ok(())
    }

    /// Validate a probability or confidence level: open interval (0, 1).
    pub fn validate_level(name: &'static str, value: f64) -> Result<(), PodError> {
        if !value.is_finite() || value <= 0.0 || value >= 1.0 {
            return Err(PodError::InvalidLevel { name, value });
        }
        Ok(())
    }

    /// Validate the resampling simulation size: at least 1.
    pub fn validate_simulation_size(n: usize) -> Result<(), PodError> {
        if n == 0 {
            return Err(PodError::InvalidSimulationSize(n));
        }
        Ok(())
    }

    /// Validate the censoring thresholds: finite, and noise < saturation
    /// when both are present.
    pub fn validate_censoring_thresholds(
        noise: Option<f64>,
        saturation: Option<f64>,
    ) -> Result<(), PodError> {
        // Check 1: Each threshold finite
        if let Some(v) = noise {
            if !v.is_finite() {
                return Err(PodError::InvalidNumericValue(format!(
                    "noise threshold = {v}"
                )));
            }
        }
        if let Some(v) = saturation {
            if !v.is_finite() {
                return Err(PodError::InvalidNumericValue(format!(
                    "saturation threshold = {v}"
                )));
            }
        }

        // Check 2: Ordering when both are present
        if let (Some(lo), Some(hi)) = (noise, saturation) {
            if lo >= hi {
                return Err(PodError::InvalidThresholds {
                    noise: lo,
                    saturation: hi,
                });
            }
        }

        Ok(())
    }

    /// Validate the detection threshold: present and finite.
    pub fn validate_detection_threshold(detection: Option<f64>) -> Result<f64, PodError> {
        let value = detection.ok_or(PodError::MissingParameter {
            parameter: "detection",
        })?;
        if !value.is_finite() {
            return Err(PodError::InvalidNumericValue(format!(
                "detection threshold = {value}"
            )));
        }
        Ok(value)
    }

    /// Validate the Box-Cox mode: a fixed exponent must be finite, and any
    /// threshold that will be transformed must be strictly positive.
    pub fn validate_box_cox(
        box_cox: &BoxCox,
        thresholds: &[(&'static str, Option<f64>)],
    ) -> Result<(), PodError> {
        // Check 1: Fixed exponent finite
        if let BoxCox::Fixed(lambda) = box_cox {
            if !lambda.is_finite() {
                return Err(PodError::InvalidNumericValue(format!(
                    "Box-Cox exponent = {lambda}"
                )));
            }
        }

        // Check 2: Transformed thresholds inside the transform domain
        if !matches!(box_cox, BoxCox::Off) {
            for &(name, value) in thresholds {
                if let Some(v) = value {
                    if !(v > 0.0) {
                        return Err(PodError::InvalidNumericValue(format!(
                            "{name} threshold = {v} is outside the Box-Cox domain (must be > 0)"
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Validate that the confidence method can serve the residual model.
    pub fn validate_method(
        method: ConfidenceMethod,
        residual_model: &ResidualModel,
    ) -> Result<(), PodError> {
        if method == ConfidenceMethod::Analytical
            && !matches!(residual_model, ResidualModel::Normal)
        {
            return Err(PodError::AnalyticalRequiresNormal);
        }
        Ok(())
    }
}
