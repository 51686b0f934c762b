//! Empirical quantile computation.
//!
//! Type-7 quantile (linear interpolation between order statistics), the
//! convention used by most statistical environments. Bootstrap confidence
//! bounds are extracted with this estimator, so the exact convention is part
//! of the crate's numerical contract.

/// Compute the `q`-quantile of `values` in place, `0 <= q <= 1`.
///
/// Sorts the slice. Returns NaN for an empty slice.
pub fn empirical_quantile(values: &mut [f64], q: f64) -> f64 {
    let n = values.len();
    if n == 0 {
        return f64::NAN;
    }
    if n == 1 {
        return values[0];
    }

    values.sort_by(f64::total_cmp);

    // Type-7: h = (n - 1) q, interpolate between floor(h) and floor(h) + 1.
    let h = (n - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = h - lo as f64;

    values[lo] + frac * (values[hi] - values[lo])
}

/// Median via the type-7 quantile.
#[inline]
pub fn median(values: &mut [f64]) -> f64 {
    empirical_quantile(values, 0.5)
}

/// Interquartile range via type-7 quartiles.
#[inline]
pub fn interquartile_range(values: &mut [f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let q3 = empirical_quantile(values, 0.75);
    // Slice is already sorted after the first call.
    let q1 = empirical_quantile(values, 0.25);
    q3 - q1
}
