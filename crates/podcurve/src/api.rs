//! High-level API for POD estimation.
//!
//! ## Purpose
//!
//! This module provides the primary user-facing entry point for POD curve
//! estimation. It implements a fluent builder pattern for configuring the
//! signal-response model and choosing an adapter (Analysis or Estimator).
//!
//! ## Design notes
//!
//! * **Ergonomic**: Fluent builder with sensible defaults for all parameters.
//! * **Polymorphic**: Uses marker types to transition to specialized adapter builders.
//! * **Validated**: Core parameters are validated during adapter construction.
//!
//! ## Key concepts
//!
//! * **Adapters**: Analysis (regression only) and Estimator (full POD) modes.
//! * **Configuration Flow**: Builder pattern ending in `.adapter(Adapter::Type)`.
//! * **Validation**: Parameters are validated when `.build()` is called on the adapter.
//!
//! ### Configuration Flow
//!
//! 1. Create a [`PodBuilder`] via `Pod::new()`.
//! 2. Chain configuration methods (`.detection()`, `.box_cox()`, etc.).
//! 3. Select an adapter via `.adapter(Adapter::Estimator)` to get a concrete builder.

// Internal dependencies
use crate::adapters::analysis::AnalysisBuilder;
use crate::adapters::estimator::EstimatorBuilder;

// Publicly re-exported types
pub use crate::adapters::analysis::RegressionAnalysis;
pub use crate::adapters::estimator::PodEstimator;
pub use crate::algorithms::boxcox::BoxCox;
pub use crate::algorithms::distributions::{
    CustomResidual, FittedResidual, ResidualFit, ResidualModel,
};
pub use crate::engine::output::{AnalysisReport, DetectionSize, PodPoint};
pub use crate::evaluation::confidence::ConfidenceMethod;
pub use crate::evaluation::diagnostics::{DiagnosticTest, Diagnostics};
pub use crate::primitives::cancel::CancelFlag;
pub use crate::primitives::errors::PodError;

/// Marker types for selecting adapters.
#[allow(non_snake_case)]
pub mod Adapter {
    pub use super::{Analysis, Estimator};
}

/// Fluent builder for configuring POD estimation parameters and modes.
#[derive(Debug, Clone, Default)]
pub struct PodBuilder {
    /// Detection threshold in signal units (required for the Estimator adapter).
    pub detection: Option<f64>,

    /// Box-Cox transform mode for the signal response.
    pub box_cox: Option<BoxCox>,

    /// Residual distribution family.
    pub residual_model: Option<ResidualModel>,

    /// Censoring-low threshold: signals strictly below are excluded from the fit.
    pub noise_threshold: Option<f64>,

    /// Censoring-high threshold: signals strictly above are excluded from the fit.
    pub saturation_threshold: Option<f64>,

    /// Confidence bound strategy.
    pub confidence_method: Option<ConfidenceMethod>,

    /// Number of bootstrap resamples.
    pub simulation_size: Option<usize>,

    /// Pinned RNG seed for reproducible resampling.
    pub seed: Option<u64>,

    /// Cooperative cancellation flag for long runs.
    pub cancel_flag: Option<CancelFlag>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub duplicate_param: Option<&'static str>,
}

impl PodBuilder {
    /// Select an adapter to transition to a concrete builder.
    pub fn adapter<A>(self, _adapter: A) -> A::Output
    where
        A: PodAdapter,
    {
        A::convert(self)
    }

    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the detection threshold in signal units.
    pub fn detection(mut self, threshold: f64) -> Self {
        if self.detection.is_some() {
            self.duplicate_param = Some("detection");
        }
        self.detection = Some(threshold);
        self
    }

    /// Set the Box-Cox transform mode.
    pub fn box_cox(mut self, mode: BoxCox) -> Self {
        if self.box_cox.is_some() {
            self.duplicate_param = Some("box_cox");
        }
        self.box_cox = Some(mode);
        self
    }

    /// Set the residual distribution family.
    pub fn residual_model(mut self, model: ResidualModel) -> Self {
        if self.residual_model.is_some() {
            self.duplicate_param = Some("residual_model");
        }
        self.residual_model = Some(model);
        self
    }

    /// Set the censoring-low (noise) threshold.
    pub fn noise_threshold(mut self, value: f64) -> Self {
        if self.noise_threshold.is_some() {
            self.duplicate_param = Some("noise_threshold");
        }
        self.noise_threshold = Some(value);
        self
    }

    /// Set the censoring-high (saturation) threshold.
    pub fn saturation_threshold(mut self, value: f64) -> Self {
        if self.saturation_threshold.is_some() {
            self.duplicate_param = Some("saturation_threshold");
        }
        self.saturation_threshold = Some(value);
        self
    }

    /// Set the confidence bound strategy.
    pub fn confidence_method(mut self, method: ConfidenceMethod) -> Self {
        if self.confidence_method.is_some() {
            self.duplicate_param = Some("confidence_method");
        }
        self.confidence_method = Some(method);
        self
    }

    /// Set the number of bootstrap resamples.
    pub fn simulation_size(mut self, n: usize) -> Self {
        if self.simulation_size.is_some() {
            self.duplicate_param = Some("simulation_size");
        }
        self.simulation_size = Some(n);
        self
    }

    /// Pin the RNG seed for reproducible bootstrap runs.
    pub fn seed(mut self, seed: u64) -> Self {
        if self.seed.is_some() {
            self.duplicate_param = Some("seed");
        }
        self.seed = Some(seed);
        self
    }

    /// Attach a cancellation flag checked between bootstrap resamples.
    pub fn cancel_flag(mut self, flag: CancelFlag) -> Self {
        if self.cancel_flag.is_some() {
            self.duplicate_param = Some("cancel_flag");
        }
        self.cancel_flag = Some(flag);
        self
    }
}

/// Trait for transitioning from the generic builder to a concrete builder.
pub trait PodAdapter {
    /// The output concrete builder.
    type Output;

    /// Convert a generic [`PodBuilder`] into a specialized concrete builder.
    fn convert(builder: PodBuilder) -> Self::Output;
}

/// Marker for standalone regression analysis.
#[derive(Debug, Clone, Copy)]
pub struct Analysis;

impl PodAdapter for Analysis {
    type Output = AnalysisBuilder;

    fn convert(builder: PodBuilder) -> Self::Output {
        let mut result = AnalysisBuilder::default();

        if let Some(mode) = builder.box_cox {
            result.box_cox = mode;
        }
        if let Some(model) = builder.residual_model {
            result.residual_model = model;
        }
        result.noise_threshold = builder.noise_threshold;
        result.saturation_threshold = builder.saturation_threshold;

        result.duplicate_param = builder.duplicate_param;

        result
    }
}

/// Marker for full POD estimation with confidence bounds.
#[derive(Debug, Clone, Copy)]
pub struct Estimator;

impl PodAdapter for Estimator {
    type Output = EstimatorBuilder;

    fn convert(builder: PodBuilder) -> Self::Output {
        let mut result = EstimatorBuilder::default();

        result.detection = builder.detection;
        if let Some(mode) = builder.box_cox {
            result.box_cox = mode;
        }
        if let Some(model) = builder.residual_model {
            result.residual_model = model;
        }
        result.noise_threshold = builder.noise_threshold;
        result.saturation_threshold = builder.saturation_threshold;
        if let Some(method) = builder.confidence_method {
            result.confidence_method = method;
        }
        if let Some(n) = builder.simulation_size {
            result.simulation_size = n;
        }
        result.seed = builder.seed;
        if let Some(flag) = builder.cancel_flag {
            result.cancel_flag = Some(flag);
        }

        result.duplicate_param = builder.duplicate_param;

        result
    }
}
