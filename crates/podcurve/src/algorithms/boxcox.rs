//! Box-Cox transformation of the signal response.
//!
//! ## Purpose
//!
//! Signal amplitudes in detection studies are often right-skewed with
//! variance growing in the mean. A Box-Cox power transform applied before
//! the linear fit restores the additive Gaussian error structure the rest
//! of the pipeline assumes:
//!
//! ```text
//! z = (y^λ - 1) / λ     λ ≠ 0
//! z = ln y              λ = 0
//! ```
//!
//! ## Algorithm
//!
//! `search_lambda` maximizes the profile log-likelihood of the linear model
//! over λ ∈ [-2, 2]:
//!
//! ```text
//! ll(λ) = -n/2 · ln(RSS(λ) / n) + (λ - 1) · Σ ln(y_i)
//! ```
//!
//! where `RSS(λ)` is the residual sum of squares of the least-squares fit of
//! the transformed response on size. A coarse grid (step 0.05) locates the
//! best cell; golden-section refinement inside the bracketing cells then
//! sharpens it. Exact ties on the grid resolve toward the λ closest to 1
//! (the untransformed model).
//!
//! ## Invariants
//!
//! * The transform requires strictly positive responses; callers reject
//!   non-positive signals before reaching this module.
//! * `inverse(transform(y, λ), λ) == y` up to floating-point rounding for
//!   every positive y and every λ in the search range.

use crate::algorithms::linear::fit_line;

/// Search domain for the transform exponent.
const LAMBDA_MIN: f64 = -2.0;
const LAMBDA_MAX: f64 = 2.0;

/// Coarse grid step of the profile-likelihood scan.
const GRID_STEP: f64 = 0.05;

/// Width tolerance of the golden-section refinement.
const REFINE_TOL: f64 = 1e-6;

// ============================================================================
// Transform Selection
// ============================================================================

/// How the signal response is transformed before the linear fit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoxCox {
    /// Fit the raw response untransformed.
    Off,
    /// Search the exponent by profile likelihood on each fit.
    Auto,
    /// Use a caller-supplied exponent.
    Fixed(f64),
}

impl Default for BoxCox {
    fn default() -> Self {
        BoxCox::Off
    }
}

// ============================================================================
// Forward and Inverse Transform
// ============================================================================

/// Transform a single positive response.
#[inline]
pub fn transform(y: f64, lambda: f64) -> f64 {
    if lambda == 0.0 {
        y.ln()
    } else {
        (y.powf(lambda) - 1.0) / lambda
    }
}

/// Transform a slice of positive responses.
pub fn transform_all(ys: &[f64], lambda: f64) -> Vec<f64> {
    ys.iter().map(|&y| transform(y, lambda)).collect()
}

/// Map a transformed value back to the original response scale.
///
/// For λ ≠ 0 the inverse is only defined where `λz + 1 > 0`; outside that
/// region the power evaluates to NaN, which downstream capping absorbs.
#[inline]
pub fn inverse(z: f64, lambda: f64) -> f64 {
    if lambda == 0.0 {
        z.exp()
    } else {
        (lambda * z + 1.0).powf(1.0 / lambda)
    }
}

/// Index and value of the first non-positive response, if any.
pub fn first_nonpositive(ys: &[f64]) -> Option<(usize, f64)> {
    ys.iter()
        .enumerate()
        .find(|&(_, &y)| !(y > 0.0))
        .map(|(i, &y)| (i, y))
}

// ============================================================================
// Profile Likelihood
// ============================================================================

/// Profile log-likelihood of the linear model at a fixed exponent.
///
/// Returns negative infinity when the transformed fit is degenerate, which
/// removes that λ from contention without special-casing the search.
pub fn profile_log_likelihood(x: &[f64], y: &[f64], lambda: f64) -> f64 {
    let z = transform_all(y, lambda);
    let fit = match fit_line(x, &z) {
        Some(fit) => fit,
        None => return f64::NEG_INFINITY,
    };
    if !(fit.rss > 0.0) {
        // A perfect fit drives the likelihood unbounded; treat it as the
        // supremum so an exactly linear transformed response wins outright.
        return f64::INFINITY;
    }
    let n = x.len() as f64;
    let log_jacobian: f64 = y.iter().map(|&yi| yi.ln()).sum();
    -0.5 * n * (fit.rss / n).ln() + (lambda - 1.0) * log_jacobian
}

/// Find the exponent maximizing the profile log-likelihood over [-2, 2].
///
/// Returns `None` when no exponent yields a finite likelihood (for example
/// a degenerate design with no spread in x).
pub fn search_lambda(x: &[f64], y: &[f64]) -> Option<f64> {
    let mut best_lambda = f64::NAN;
    let mut best_ll = f64::NEG_INFINITY;

    let steps = ((LAMBDA_MAX - LAMBDA_MIN) / GRID_STEP).round() as usize;
    for i in 0..=steps {
        let lambda = LAMBDA_MIN + i as f64 * GRID_STEP;
        let ll = profile_log_likelihood(x, y, lambda);
        if ll > best_ll
            || (ll == best_ll && (lambda - 1.0).abs() < (best_lambda - 1.0).abs())
        {
            best_ll = ll;
            best_lambda = lambda;
        }
    }

    if !best_ll.is_finite() && best_ll < 0.0 {
        return None;
    }

    // Refine inside the two grid cells bracketing the best point.
    let lo = (best_lambda - GRID_STEP).max(LAMBDA_MIN);
    let hi = (best_lambda + GRID_STEP).min(LAMBDA_MAX);
    let refined = golden_section_max(|l| profile_log_likelihood(x, y, l), lo, hi);

    if profile_log_likelihood(x, y, refined) >= best_ll {
        Some(refined)
    } else {
        Some(best_lambda)
    }
}

/// Golden-section maximization of a unimodal function on [lo, hi].
fn golden_section_max<F: Fn(f64) -> f64>(f: F, mut lo: f64, mut hi: f64) -> f64 {
    // 1/phi and 1/phi^2
    const INV_PHI: f64 = 0.618_033_988_749_894_9;
    const INV_PHI2: f64 = 0.381_966_011_250_105_1;

    let mut a = lo + INV_PHI2 * (hi - lo);
    let mut b = lo + INV_PHI * (hi - lo);
    let mut fa = f(a);
    let mut fb = f(b);

    while hi - lo > REFINE_TOL {
        if fa > fb {
            hi = b;
            b = a;
            fb = fa;
            a = lo + INV_PHI2 * (hi - lo);
            fa = f(a);
        } else {
            lo = a;
            a = b;
            fa = fb;
            b = lo + INV_PHI * (hi - lo);
            fb = f(b);
        }
    }

    0.5 * (lo + hi)
}
