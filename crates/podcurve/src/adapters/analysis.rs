//! Regression analysis adapter.
//!
//! ## Purpose
//!
//! This adapter runs the fit-and-diagnose stage on its own: it fits the
//! (optionally Box-Cox transformed) linear model, fits the residual
//! distribution, runs the diagnostic battery, and returns the
//! [`AnalysisReport`]. No POD queries; use the estimator adapter for those.
//!
//! ## Design notes
//!
//! * **Stateless runner**: `fit` borrows the configuration and can be
//!   called repeatedly on different samples.
//! * **Validation at build**: configuration errors surface from `build()`;
//!   only data-dependent failures come out of `fit`.

use crate::algorithms::boxcox::BoxCox;
use crate::algorithms::distributions::ResidualModel;
use crate::engine::executor::{diagnose, fit_pipeline, AnalysisConfig};
use crate::engine::output::AnalysisReport;
use crate::engine::validator::Validator;
use crate::primitives::data::ObservationSet;
use crate::primitives::errors::PodError;

// ============================================================================
// Analysis Builder
// ============================================================================

/// Builder for the regression analysis runner.
#[derive(Debug, Clone)]
pub struct AnalysisBuilder {
    /// Signal transform applied before the linear fit.
    pub box_cox: BoxCox,

    /// Residual distribution family.
    pub residual_model: ResidualModel,

    /// Signals strictly below this value are censored-low.
    pub noise_threshold: Option<f64>,

    /// Signals strictly above this value are censored-high.
    pub saturation_threshold: Option<f64>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl Default for AnalysisBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            box_cox: BoxCox::Off,
            residual_model: ResidualModel::Normal,
            noise_threshold: None,
            saturation_threshold: None,
            duplicate_param: None,
        }
    }

    /// Set the Box-Cox transform mode.
    pub fn box_cox(mut self, mode: BoxCox) -> Self {
        self.box_cox = mode;
        self
    }

    /// Set the residual distribution family.
    pub fn residual_model(mut self, model: ResidualModel) -> Self {
        self.residual_model = model;
        self
    }

    /// Set the noise (censoring-low) threshold.
    pub fn noise_threshold(mut self, value: f64) -> Self {
        self.noise_threshold = Some(value);
        self
    }

    /// Set the saturation (censoring-high) threshold.
    pub fn saturation_threshold(mut self, value: f64) -> Self {
        self.saturation_threshold = Some(value);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the analysis runner.
    pub fn build(self) -> Result<RegressionAnalysis, PodError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Validate censoring thresholds
        Validator::validate_censoring_thresholds(self.noise_threshold, self.saturation_threshold)?;

        // Validate the transform mode and its domain
        Validator::validate_box_cox(
            &self.box_cox,
            &[
                ("noise", self.noise_threshold),
                ("saturation", self.saturation_threshold),
            ],
        )?;

        Ok(RegressionAnalysis {
            config: AnalysisConfig {
                box_cox: self.box_cox,
                residual_model: self.residual_model,
                noise_threshold: self.noise_threshold,
                saturation_threshold: self.saturation_threshold,
            },
        })
    }
}

// ============================================================================
// Regression Analysis Runner
// ============================================================================

/// Configured regression analysis.
#[derive(Debug, Clone)]
pub struct RegressionAnalysis {
    config: AnalysisConfig,
}

impl RegressionAnalysis {
    /// Fit the pipeline on the supplied observations and report.
    pub fn fit(&self, sizes: &[f64], signals: &[f64]) -> Result<AnalysisReport, PodError> {
        Validator::validate_inputs(sizes, signals)?;

        let obs = ObservationSet::partition(
            sizes,
            signals,
            self.config.noise_threshold,
            self.config.saturation_threshold,
        );
        let model = fit_pipeline(&obs, &self.config)?;
        let diagnostics = diagnose(&model);
        Ok(AnalysisReport::from_fit(&model, diagnostics, &obs, &self.config))
    }
}
