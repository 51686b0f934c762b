//! Fit pipeline execution.
//!
//! ## Purpose
//!
//! This module runs the full regression pipeline on one observation set and
//! owns the [`FittedModel`] it produces. The same pipeline serves the
//! one-shot analysis, the estimator's base fit, and every bootstrap refit.
//!
//! ## Pipeline
//!
//! ```text
//! ObservationSet
//!   → sufficiency check (≥ 3 distinct uncensored sizes)
//!   → sort uncensored points by size
//!   → Box-Cox (off / fixed λ / profile-likelihood search)
//!   → OLS of transformed signal on size
//!   → residuals → residual distribution fit
//!   → FittedModel
//! ```
//!
//! ## Invariants
//!
//! * Censored points never enter the fit; they are counted and echoed only.
//! * The detection and censoring thresholds are compared in transformed
//!   units using the λ of the model they are evaluated against.
//! * Residuals are kept in defect-size order (Durbin-Watson and
//!   Harrison-McCabe read them sequentially).

use crate::algorithms::boxcox::{self, BoxCox};
use crate::algorithms::distributions::{fit_residuals, FittedResidual, ResidualModel};
use crate::algorithms::linear::fit_line;
use crate::evaluation::confidence::wald_lower_bound;
use crate::evaluation::diagnostics::{compute_diagnostics, Diagnostics};
use crate::primitives::data::ObservationSet;
use crate::primitives::errors::PodError;

/// Minimum distinct uncensored defect sizes for a meaningful regression.
pub const MIN_DISTINCT_SIZES: usize = 3;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration of one pipeline fit.
#[derive(Debug, Clone, Default)]
pub struct AnalysisConfig {
    /// Signal transform applied before the linear fit.
    pub box_cox: BoxCox,
    /// Residual distribution family.
    pub residual_model: ResidualModel,
    /// Signals strictly below this value are censored-low.
    pub noise_threshold: Option<f64>,
    /// Signals strictly above this value are censored-high.
    pub saturation_threshold: Option<f64>,
}

// ============================================================================
// Fitted Model
// ============================================================================

/// The output of one pipeline fit: the line, its noise model, and the
/// transformed thresholds needed to evaluate POD.
#[derive(Debug, Clone)]
pub struct FittedModel {
    /// Box-Cox exponent, `None` when the transform is off.
    pub lambda: Option<f64>,
    /// Intercept of the transformed-signal line.
    pub intercept: f64,
    /// Slope of the transformed-signal line.
    pub slope: f64,
    /// Unbiased standard error of the regression.
    pub std_error: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Mean of the fitted defect sizes.
    pub x_mean: f64,
    /// Sum of squares of the fitted defect sizes about their mean.
    pub sxx: f64,
    /// Number of fitted (uncensored) points.
    pub n: usize,
    /// Fitted defect sizes, ascending.
    pub sizes: Vec<f64>,
    /// Residuals in the same order as `sizes`.
    pub residuals: Vec<f64>,
    /// Fitted residual distribution.
    pub residual_dist: FittedResidual,
    /// Noise threshold in transformed units.
    pub noise_t: Option<f64>,
    /// Saturation threshold in transformed units.
    pub saturation_t: Option<f64>,
}

impl FittedModel {
    /// Transform a signal value with the model's λ.
    pub fn transform(&self, y: f64) -> f64 {
        match self.lambda {
            Some(lambda) => boxcox::transform(y, lambda),
            None => y,
        }
    }

    /// Map a transformed value back to original signal units.
    pub fn inverse_transform(&self, z: f64) -> f64 {
        match self.lambda {
            Some(lambda) => boxcox::inverse(z, lambda),
            None => z,
        }
    }

    /// Predicted transformed signal at a defect size.
    #[inline]
    pub fn predict_transformed(&self, size: f64) -> f64 {
        self.intercept + self.slope * size
    }

    /// Predicted signal at a defect size, in original units.
    pub fn predict(&self, size: f64) -> f64 {
        self.inverse_transform(self.predict_transformed(size))
    }

    /// Prediction leverage at a defect size.
    pub fn leverage(&self, size: f64) -> f64 {
        let d = size - self.x_mean;
        1.0 / self.n as f64 + d * d / self.sxx
    }

    /// Residual degrees of freedom.
    pub fn degrees_of_freedom(&self) -> f64 {
        (self.n - 2) as f64
    }

    /// Mean probability of detection at a defect size.
    ///
    /// The probability that signal (prediction plus residual noise) exceeds
    /// `detection_threshold`, capped to 0 below the noise floor and to 1
    /// above saturation.
    pub fn pod(&self, size: f64, detection_threshold: f64) -> f64 {
        let pred = self.predict_transformed(size);
        if let Some(noise) = self.noise_t {
            if pred < noise {
                return 0.0;
            }
        }
        if let Some(saturation) = self.saturation_t {
            if pred > saturation {
                return 1.0;
            }
        }
        let det = self.transform(detection_threshold);
        (1.0 - self.residual_dist.cdf(det - pred)).clamp(0.0, 1.0)
    }

    /// Analytical lower confidence bound on POD at a defect size.
    ///
    /// Only meaningful under the Normal residual model; the builder rejects
    /// other pairings.
    pub fn wald_bound(&self, size: f64, detection_threshold: f64, confidence: f64) -> f64 {
        let pred = self.predict_transformed(size);
        if let Some(noise) = self.noise_t {
            if pred < noise {
                return 0.0;
            }
        }
        if let Some(saturation) = self.saturation_t {
            if pred > saturation {
                return 1.0;
            }
        }
        let det = self.transform(detection_threshold);
        let z_hat = (pred - det) / self.std_error;
        wald_lower_bound(z_hat, self.leverage(size), self.degrees_of_freedom(), confidence)
    }
}

// ============================================================================
// Pipeline
// ============================================================================

/// Fit the full pipeline on one observation set.
pub fn fit_pipeline(
    obs: &ObservationSet,
    config: &AnalysisConfig,
) -> Result<FittedModel, PodError> {
    // Sufficiency: the regression needs spread in x.
    let distinct = obs.distinct_uncensored_sizes();
    if distinct < MIN_DISTINCT_SIZES {
        return Err(PodError::InsufficientData {
            got: distinct,
            min: MIN_DISTINCT_SIZES,
        });
    }

    let raw_sizes = obs.uncensored_sizes();
    let raw_signals = obs.uncensored_signals();

    // Box-Cox domain check, reported against the caller's input positions.
    if !matches!(config.box_cox, BoxCox::Off) {
        if let Some((pos, value)) = boxcox::first_nonpositive(&raw_signals) {
            return Err(PodError::NonPositiveSignal {
                index: obs.uncensored_indices()[pos],
                value,
            });
        }
    }

    // Size order for the sequential diagnostics.
    let mut pairs: Vec<(f64, f64)> = raw_sizes.into_iter().zip(raw_signals).collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (sizes, signals): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

    let lambda = match config.box_cox {
        BoxCox::Off => None,
        BoxCox::Fixed(lambda) => Some(lambda),
        BoxCox::Auto => Some(boxcox::search_lambda(&sizes, &signals).ok_or_else(|| {
            PodError::DistributionFit("Box-Cox search found no finite optimum".to_string())
        })?),
    };
    let transformed = match lambda {
        Some(lambda) => boxcox::transform_all(&signals, lambda),
        None => signals.clone(),
    };

    let line = fit_line(&sizes, &transformed).ok_or(PodError::InsufficientData {
        got: distinct,
        min: MIN_DISTINCT_SIZES,
    })?;
    let residuals = line.residuals(&sizes, &transformed);

    let residual_dist = fit_residuals(&config.residual_model, &residuals)?;

    Ok(FittedModel {
        lambda,
        intercept: line.intercept,
        slope: line.slope,
        std_error: line.standard_error(),
        r_squared: line.r_squared(),
        x_mean: line.x_mean,
        sxx: line.sxx,
        n: line.n,
        sizes,
        residuals,
        residual_dist,
        noise_t: config.noise_threshold.map(|v| maybe_transform(lambda, v)),
        saturation_t: config.saturation_threshold.map(|v| maybe_transform(lambda, v)),
    })
}

/// Run the diagnostic battery on a fitted model.
pub fn diagnose(model: &FittedModel) -> Diagnostics {
    compute_diagnostics(&model.sizes, &model.residuals, &model.residual_dist)
}

fn maybe_transform(lambda: Option<f64>, y: f64) -> f64 {
    match lambda {
        Some(lambda) => boxcox::transform(y, lambda),
        None => y,
    }
}
