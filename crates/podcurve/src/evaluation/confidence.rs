//! Analytical confidence bound for the POD curve.
//!
//! Under Normal residuals the mean POD at a size is Φ(ẑ) with
//! ẑ = (predicted − detection threshold) / σ̂. The sampling uncertainty of
//! ẑ combines the prediction variance of the line (the leverage term) with
//! the variance of the probit itself, estimated by the delta method as
//! ẑ²/(2·df). The one-sided lower bound at confidence γ is
//!
//! ```text
//! POD_γ(a) = Φ( ẑ - t_{γ, df} · sqrt( leverage + ẑ² / (2·df) ) )
//! ```
//!
//! where t is the Student quantile on the regression degrees of freedom.

use statrs::distribution::{ContinuousCDF, Normal, StudentsT};

// ============================================================================
// Method Selection
// ============================================================================

/// How the lower confidence bound on the POD curve is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceMethod {
    /// Closed-form Wald bound from the OLS sampling theory. Deterministic;
    /// requires the Normal residual model.
    Analytical,
    /// Full-pipeline refits on observations resampled with replacement;
    /// the bound is the empirical quantile across resamples.
    Bootstrap,
    /// Bootstrap in which each resample refits a kernel-smoothed residual
    /// distribution, regardless of the configured family.
    KernelBootstrap,
}

impl Default for ConfidenceMethod {
    fn default() -> Self {
        ConfidenceMethod::Analytical
    }
}

// ============================================================================
// Wald Lower Bound
// ============================================================================

/// One-sided lower confidence bound on POD.
///
/// `z_hat` is the probit of the mean POD, `leverage` the prediction
/// leverage `1/n + (a - x̄)²/Sxx`, `df` the residual degrees of freedom,
/// and `confidence` the one-sided level γ in (0, 1).
pub fn wald_lower_bound(z_hat: f64, leverage: f64, df: f64, confidence: f64) -> f64 {
    if !z_hat.is_finite() {
        // An infinite probit means the mean POD is exactly 0 or 1; sampling
        // noise does not move it.
        return if z_hat > 0.0 { 1.0 } else { 0.0 };
    }

    let t = match StudentsT::new(0.0, 1.0, df) {
        Ok(dist) => dist.inverse_cdf(confidence),
        Err(_) => return f64::NAN,
    };
    let spread = (leverage + z_hat * z_hat / (2.0 * df)).sqrt();

    // Normal(0, 1) construction cannot fail.
    let phi = Normal::new(0.0, 1.0).unwrap();
    phi.cdf(z_hat - t * spread)
}
