//! Output types for analysis and estimation.
//!
//! ## Purpose
//!
//! This module defines what callers get back: the [`AnalysisReport`] with
//! coefficients, diagnostics, and input echo; the [`DetectionSize`] result
//! of the inversion query; and the [`PodPoint`] rows of a tabulated curve.
//!
//! ## Design notes
//!
//! * **Data, not rendering**: everything an external plotter or report
//!   generator needs is exposed as plain fields; `Display` renders a text
//!   summary and nothing is written to disk.
//! * **Original units**: `predict` reports signals in the caller's units;
//!   the Box-Cox transform is inverted on the way out.

use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::algorithms::boxcox;
use crate::engine::executor::{AnalysisConfig, FittedModel};
use crate::evaluation::diagnostics::{DiagnosticTest, Diagnostics};
use crate::primitives::data::ObservationSet;

// ============================================================================
// Analysis Report
// ============================================================================

/// The fitted regression, its noise model, and the diagnostic battery.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    /// Intercept of the (transformed) signal model.
    pub intercept: f64,
    /// Slope of the (transformed) signal model.
    pub slope: f64,
    /// Unbiased standard error of the regression.
    pub std_error: f64,
    /// Coefficient of determination.
    pub r_squared: f64,
    /// Box-Cox exponent, `None` when the transform is off.
    pub box_cox_lambda: Option<f64>,
    /// Description of the fitted residual distribution.
    pub residual_model: String,
    /// Residuals of the uncensored points, in defect-size order.
    pub residuals: Vec<f64>,
    /// Two-sided p-values of the diagnostic battery.
    pub diagnostics: Diagnostics,
    /// Defect sizes as supplied by the caller.
    pub sizes: Vec<f64>,
    /// Signals as supplied by the caller.
    pub signals: Vec<f64>,
    /// Noise threshold, if configured.
    pub noise_threshold: Option<f64>,
    /// Saturation threshold, if configured.
    pub saturation_threshold: Option<f64>,
    /// Points censored below the noise threshold.
    pub censored_low: usize,
    /// Points censored above the saturation threshold.
    pub censored_high: usize,
}

impl AnalysisReport {
    pub(crate) fn from_fit(
        model: &FittedModel,
        diagnostics: Diagnostics,
        obs: &ObservationSet,
        config: &AnalysisConfig,
    ) -> AnalysisReport {
        AnalysisReport {
            intercept: model.intercept,
            slope: model.slope,
            std_error: model.std_error,
            r_squared: model.r_squared,
            box_cox_lambda: model.lambda,
            residual_model: model.residual_dist.describe(),
            residuals: model.residuals.clone(),
            diagnostics,
            sizes: obs.sizes().to_vec(),
            signals: obs.signals().to_vec(),
            noise_threshold: config.noise_threshold,
            saturation_threshold: config.saturation_threshold,
            censored_low: obs.censored_low(),
            censored_high: obs.censored_high(),
        }
    }

    /// Predicted signal at a defect size, in original units.
    pub fn predict(&self, size: f64) -> f64 {
        let z = self.intercept + self.slope * size;
        match self.box_cox_lambda {
            Some(lambda) => boxcox::inverse(z, lambda),
            None => z,
        }
    }

    /// Look up a diagnostic p-value by test.
    pub fn p_value(&self, test: DiagnosticTest) -> f64 {
        self.diagnostics.p_value(test)
    }

    /// Number of uncensored points the model was fitted on.
    pub fn n_uncensored(&self) -> usize {
        self.residuals.len()
    }
}

impl Display for AnalysisReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        writeln!(f, "POD Regression Analysis:")?;
        writeln!(
            f,
            "  Observations:   {} (uncensored {}, censored low {}, high {})",
            self.sizes.len(),
            self.n_uncensored(),
            self.censored_low,
            self.censored_high
        )?;
        match self.box_cox_lambda {
            Some(lambda) => writeln!(f, "  Box-Cox lambda: {lambda:.4}")?,
            None => writeln!(f, "  Box-Cox lambda: off")?,
        }
        writeln!(f, "  Intercept:      {:.6}", self.intercept)?;
        writeln!(f, "  Slope:          {:.6}", self.slope)?;
        writeln!(f, "  Std. error:     {:.6}", self.std_error)?;
        writeln!(f, "  R-squared:      {:.6}", self.r_squared)?;
        writeln!(f, "  Residual model: {}", self.residual_model)?;
        writeln!(f)?;

        writeln!(f, "Diagnostics (two-sided p-values):")?;
        for test in DiagnosticTest::ALL {
            let label = format!("{}:", test.name());
            writeln!(f, "  {:<18} {}", label, format_p(self.p_value(test)))?;
        }
        Ok(())
    }
}

fn format_p(p: f64) -> String {
    if p.is_nan() {
        "undefined".to_string()
    } else {
        format!("{p:.4}")
    }
}

// ============================================================================
// Detection Size
// ============================================================================

/// The defect size at which the POD bound reaches a probability level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionSize {
    /// The detection size.
    pub size: f64,
    /// The requested probability level.
    pub probability: f64,
    /// The requested confidence level.
    pub confidence: f64,
    /// Whether the root sits at the edge of the observed size range, i.e.
    /// the true crossing may lie outside the data.
    pub extrapolated: bool,
}

impl Display for DetectionSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(
            f,
            "a{:.0}/{:.0} = {:.6}",
            self.probability * 100.0,
            self.confidence * 100.0,
            self.size
        )?;
        if self.extrapolated {
            write!(f, " (at the edge of the observed size range)")?;
        }
        Ok(())
    }
}

// ============================================================================
// POD Table
// ============================================================================

/// One row of a tabulated POD curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PodPoint {
    /// Defect size.
    pub size: f64,
    /// Mean POD at this size.
    pub pod: f64,
    /// Lower confidence bound at this size, when a level was requested.
    pub lower_bound: Option<f64>,
}
