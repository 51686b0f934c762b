//! Gaussian kernel density estimate of the residual distribution.
//!
//! The kernel-smoothed noise model makes no parametric assumption: the CDF
//! at `x` is the average of standard-normal CDFs centered on each residual,
//!
//! ```text
//! F(x) = (1/n) Σ Φ((x - r_i) / h)
//! ```
//!
//! with Silverman's rule-of-thumb bandwidth
//! `h = 0.9 · min(s, IQR/1.34) · n^{-1/5}` (floored at a small positive
//! value so heavily tied samples still yield a proper CDF).

use statrs::distribution::{ContinuousCDF, Normal};

use crate::math::quantile::interquartile_range;

/// Lower bound on the bandwidth.
const BANDWIDTH_FLOOR: f64 = 1e-12;

// ============================================================================
// Kernel Density
// ============================================================================

/// A Gaussian kernel density estimate over a residual sample.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelDensity {
    points: Vec<f64>,
    bandwidth: f64,
    standard: Normal,
}

impl KernelDensity {
    /// Fit with the Silverman bandwidth.
    ///
    /// Returns `None` for degenerate samples (fewer than 3 points or zero
    /// spread), which have no meaningful smooth density.
    pub fn fit(residuals: &[f64]) -> Option<KernelDensity> {
        let n = residuals.len();
        if n < 3 {
            return None;
        }

        let nf = n as f64;
        let mean = residuals.iter().sum::<f64>() / nf;
        let ss: f64 = residuals.iter().map(|&r| (r - mean) * (r - mean)).sum();
        let sd = (ss / (nf - 1.0)).sqrt();
        if !(sd > 0.0) || !sd.is_finite() {
            return None;
        }

        let mut sorted = residuals.to_vec();
        let iqr = interquartile_range(&mut sorted);
        let spread = if iqr > 0.0 { sd.min(iqr / 1.34) } else { sd };
        let bandwidth = (0.9 * spread * nf.powf(-0.2)).max(BANDWIDTH_FLOOR);

        // Normal(0, 1) construction cannot fail.
        let standard = Normal::new(0.0, 1.0).unwrap();
        Some(KernelDensity {
            points: residuals.to_vec(),
            bandwidth,
            standard,
        })
    }

    /// Smoothed empirical CDF at `x`.
    pub fn cdf(&self, x: f64) -> f64 {
        let sum: f64 = self
            .points
            .iter()
            .map(|&p| self.standard.cdf((x - p) / self.bandwidth))
            .sum();
        sum / self.points.len() as f64
    }

    /// Fitted bandwidth `h`.
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Number of sample points backing the estimate.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the estimate is empty (never true for a fitted instance).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
