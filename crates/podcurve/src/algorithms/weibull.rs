//! Shifted Weibull fit for the residual noise model.
//!
//! Residuals straddle zero, so the two-parameter Weibull (support on the
//! positive half-line) cannot describe them directly. The fit shifts the
//! sample into positive territory with a location parameter placed a tenth
//! of the sample span below the minimum, then estimates shape and scale by
//! maximum likelihood on the shifted values.
//!
//! The shape `k` solves the profile-MLE stationarity condition
//!
//! ```text
//! Σ x_i^k ln x_i / Σ x_i^k  -  1/k  -  (1/n) Σ ln x_i  =  0
//! ```
//!
//! by bracketed bisection; the scale then follows in closed form as
//! `(Σ x_i^k / n)^{1/k}`.

use statrs::distribution::{ContinuousCDF, Weibull};

use crate::math::roots::bisect;

/// Bisection bracket for the shape parameter.
const SHAPE_MIN: f64 = 0.05;
const SHAPE_MAX: f64 = 50.0;

/// Offset of the location below the sample minimum, as a fraction of span.
const LOCATION_MARGIN: f64 = 0.1;

// ============================================================================
// Shifted Weibull
// ============================================================================

/// A three-parameter (shifted) Weibull distribution fitted to residuals.
#[derive(Debug, Clone, PartialEq)]
pub struct WeibullFit {
    location: f64,
    shape: f64,
    scale: f64,
    dist: Weibull,
}

impl WeibullFit {
    /// Fit by profile maximum likelihood.
    ///
    /// Returns `None` for degenerate samples (fewer than 3 points, zero
    /// span) or when the shape equation has no root in the bracket.
    pub fn fit(residuals: &[f64]) -> Option<WeibullFit> {
        let n = residuals.len();
        if n < 3 {
            return None;
        }

        let min = residuals.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = residuals.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        let span = max - min;
        if !(span > 0.0) || !span.is_finite() {
            return None;
        }

        let location = min - LOCATION_MARGIN * span;
        let shifted: Vec<f64> = residuals.iter().map(|&r| r - location).collect();
        let mean_log = shifted.iter().map(|&x| x.ln()).sum::<f64>() / n as f64;

        let stationarity = |k: f64| {
            let mut weighted_log = 0.0;
            let mut power_sum = 0.0;
            for &x in &shifted {
                let p = x.powf(k);
                weighted_log += p * x.ln();
                power_sum += p;
            }
            weighted_log / power_sum - 1.0 / k - mean_log
        };

        let shape = bisect(stationarity, SHAPE_MIN, SHAPE_MAX, 1e-10, 200).ok()?;
        let power_mean = shifted.iter().map(|&x| x.powf(shape)).sum::<f64>() / n as f64;
        let scale = power_mean.powf(1.0 / shape);
        if !scale.is_finite() || !(scale > 0.0) {
            return None;
        }

        let dist = Weibull::new(shape, scale).ok()?;
        Some(WeibullFit {
            location,
            shape,
            scale,
            dist,
        })
    }

    /// CDF of the shifted distribution at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        if x <= self.location {
            0.0
        } else {
            self.dist.cdf(x - self.location)
        }
    }

    /// Location (shift) parameter.
    pub fn location(&self) -> f64 {
        self.location
    }

    /// Shape parameter `k`.
    pub fn shape(&self) -> f64 {
        self.shape
    }

    /// Scale parameter.
    pub fn scale(&self) -> f64 {
        self.scale
    }
}
