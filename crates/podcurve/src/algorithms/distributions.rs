//! Residual noise models.
//!
//! ## Purpose
//!
//! After the linear stage, the scatter of the residuals becomes the noise
//! model that turns a predicted signal into a detection probability. This
//! module owns the closed set of residual model families, the fitting entry
//! point, and the fitted distribution the POD computation evaluates.
//!
//! ## Design notes
//!
//! * **Closed variants**: `ResidualModel` and `FittedResidual` are matched
//!   exhaustively everywhere; adding a family is a deliberate API change.
//! * **Custom escape hatch**: callers plug in their own family through the
//!   `ResidualFit` trait without reopening the match sites, since a custom
//!   fit lands in the `FittedResidual::Custom` arm.
//! * **Failure is data-driven**: every family reports non-convergence as
//!   `None` from its fitter; `fit_residuals` converts that to the
//!   distribution-fit error with the family name attached.
//!
//! ## Invariants
//!
//! * A `FittedResidual` always exposes a valid CDF (non-decreasing, into
//!   [0, 1]) over the whole real line.
//! * The Normal family scales on the regression degrees of freedom (n − 2)
//!   so its spread equals the unbiased standard error of the fit.

use std::fmt;
use std::sync::Arc;

use statrs::distribution::{ContinuousCDF, Normal};

use crate::algorithms::kernel::KernelDensity;
use crate::algorithms::weibull::WeibullFit;
use crate::primitives::errors::PodError;

// ============================================================================
// Model Selection
// ============================================================================

/// Residual distribution family fitted after the linear stage.
#[derive(Clone)]
pub enum ResidualModel {
    /// Gaussian residuals (default; required by the analytical bound).
    Normal,
    /// Shifted three-parameter Weibull, for skewed residuals.
    Weibull,
    /// Gaussian kernel-smoothed empirical distribution, assumption-free.
    KernelSmoothing,
    /// Caller-supplied family.
    Custom(Arc<dyn ResidualFit>),
}

impl ResidualModel {
    /// Family name for reports and error messages.
    pub fn label(&self) -> String {
        match self {
            Self::Normal => "Normal".to_string(),
            Self::Weibull => "Weibull".to_string(),
            Self::KernelSmoothing => "KernelSmoothing".to_string(),
            Self::Custom(factory) => factory.label(),
        }
    }
}

impl Default for ResidualModel {
    fn default() -> Self {
        ResidualModel::Normal
    }
}

impl fmt::Debug for ResidualModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(factory) => write!(f, "Custom({:?})", factory.label()),
            other => write!(f, "{}", other.label()),
        }
    }
}

/// A caller-supplied residual distribution family.
///
/// Implementors fit their family to a residual vector and report
/// non-convergence by returning `None`.
pub trait ResidualFit: Send + Sync {
    /// Family name for reports and error messages.
    fn label(&self) -> String;

    /// Fit the family to the residuals.
    fn fit(&self, residuals: &[f64]) -> Option<FittedResidual>;
}

// ============================================================================
// Fitted Distributions
// ============================================================================

/// Gaussian residual distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalResidual {
    mean: f64,
    std_dev: f64,
    dist: Normal,
}

impl NormalResidual {
    /// Fit mean and spread to the residuals.
    ///
    /// The spread divides by n − 2 rather than n − 1: the residuals come
    /// out of a two-parameter fit, and this keeps the noise model equal to
    /// the regression's unbiased standard error.
    pub fn fit(residuals: &[f64]) -> Option<NormalResidual> {
        let n = residuals.len();
        if n < 3 {
            return None;
        }
        let mean = residuals.iter().sum::<f64>() / n as f64;
        let ss: f64 = residuals.iter().map(|&r| (r - mean) * (r - mean)).sum();
        let std_dev = (ss / (n - 2) as f64).sqrt();
        if !(std_dev > 0.0) || !std_dev.is_finite() {
            return None;
        }
        let dist = Normal::new(mean, std_dev).ok()?;
        Some(NormalResidual {
            mean,
            std_dev,
            dist,
        })
    }

    /// CDF at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        self.dist.cdf(x)
    }

    /// Fitted mean.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Fitted standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }
}

/// A fitted custom residual distribution: a label plus a CDF closure.
#[derive(Clone)]
pub struct CustomResidual {
    label: String,
    cdf: Arc<dyn Fn(f64) -> f64 + Send + Sync>,
}

impl CustomResidual {
    /// Wrap a fitted CDF under a family label.
    pub fn new<F>(label: impl Into<String>, cdf: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        CustomResidual {
            label: label.into(),
            cdf: Arc::new(cdf),
        }
    }

    /// Family label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// CDF at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        (self.cdf)(x)
    }
}

impl fmt::Debug for CustomResidual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomResidual")
            .field("label", &self.label)
            .finish()
    }
}

/// A residual distribution fitted to one residual vector.
#[derive(Debug, Clone)]
pub enum FittedResidual {
    /// Fitted Gaussian.
    Normal(NormalResidual),
    /// Fitted shifted Weibull.
    Weibull(WeibullFit),
    /// Fitted kernel density estimate.
    Kernel(KernelDensity),
    /// Fitted caller-supplied distribution.
    Custom(CustomResidual),
}

impl FittedResidual {
    /// CDF at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        match self {
            Self::Normal(d) => d.cdf(x),
            Self::Weibull(d) => d.cdf(x),
            Self::Kernel(d) => d.cdf(x),
            Self::Custom(d) => d.cdf(x),
        }
    }

    /// Family name.
    pub fn label(&self) -> String {
        match self {
            Self::Normal(_) => "Normal".to_string(),
            Self::Weibull(_) => "Weibull".to_string(),
            Self::Kernel(_) => "KernelSmoothing".to_string(),
            Self::Custom(d) => d.label().to_string(),
        }
    }

    /// Family name plus fitted parameters, for report summaries.
    pub fn describe(&self) -> String {
        match self {
            Self::Normal(d) => {
                format!("Normal(mean = {:.4}, std dev = {:.4})", d.mean(), d.std_dev())
            }
            Self::Weibull(d) => format!(
                "Weibull(shape = {:.4}, scale = {:.4}, location = {:.4})",
                d.shape(),
                d.scale(),
                d.location()
            ),
            Self::Kernel(d) => format!(
                "KernelSmoothing(bandwidth = {:.4}, points = {})",
                d.bandwidth(),
                d.len()
            ),
            Self::Custom(d) => d.label().to_string(),
        }
    }
}

// ============================================================================
// Fitting Entry Point
// ============================================================================

/// Fit the configured residual model to a residual vector.
///
/// Non-convergence (degenerate residuals, no root for the Weibull shape,
/// custom factory giving up) surfaces as [`PodError::DistributionFit`]
/// naming the family.
pub fn fit_residuals(
    model: &ResidualModel,
    residuals: &[f64],
) -> Result<FittedResidual, PodError> {
    let fitted = match model {
        ResidualModel::Normal => NormalResidual::fit(residuals).map(FittedResidual::Normal),
        ResidualModel::Weibull => WeibullFit::fit(residuals).map(FittedResidual::Weibull),
        ResidualModel::KernelSmoothing => {
            KernelDensity::fit(residuals).map(FittedResidual::Kernel)
        }
        ResidualModel::Custom(factory) => factory.fit(residuals),
    };
    fitted.ok_or_else(|| {
        PodError::DistributionFit(format!(
            "{} model did not converge on {} residuals",
            model.label(),
            residuals.len()
        ))
    })
}
