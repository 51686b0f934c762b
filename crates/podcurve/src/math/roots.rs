//! Bracketed root finding for monotone curve inversion.
//!
//! The POD curves this crate inverts are monotone non-decreasing by
//! construction, so a guarded bisection is both sufficient and robust: no
//! derivative estimates, guaranteed convergence once a sign change is
//! bracketed. Convergence is O(log((hi - lo) / tol)).

/// Outcome of a bracket check that found no sign change.
///
/// Carries the endpoint values so callers can report how close the curve
/// came to the target (e.g. the maximum POD reached in range).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoBracket {
    /// Function value at the lower endpoint.
    pub f_lo: f64,
    /// Function value at the upper endpoint.
    pub f_hi: f64,
}

/// Find a root of `f` in `[lo, hi]` by bisection.
///
/// Requires `f(lo)` and `f(hi)` to straddle zero; returns [`NoBracket`]
/// otherwise. An endpoint that is already a root (within `tol` of zero)
/// is returned directly.
pub fn bisect<F>(f: F, lo: f64, hi: f64, tol: f64, max_iter: usize) -> Result<f64, NoBracket>
where
    F: Fn(f64) -> f64,
{
    debug_assert!(lo < hi);

    let f_lo = f(lo);
    let f_hi = f(hi);

    if f_lo.abs() <= tol {
        return Ok(lo);
    }
    if f_hi.abs() <= tol {
        return Ok(hi);
    }
    if (f_lo > 0.0) == (f_hi > 0.0) {
        return Err(NoBracket { f_lo, f_hi });
    }

    let mut left = lo;
    let mut right = hi;
    let mut f_left = f_lo;

    for _ in 0..max_iter {
        let mid = 0.5 * (left + right);
        let f_mid = f(mid);

        let width = right - left;
        if width.abs() < tol {
            return Ok(mid);
        }

        if (f_mid > 0.0) == (f_left > 0.0) {
            left = mid;
            f_left = f_mid;
        } else {
            right = mid;
        }
    }

    Ok(0.5 * (left + right))
}
