//! Ordinary least squares for the univariate signal model.
//!
//! ## Purpose
//!
//! Fits `signal = intercept + slope * size` by least squares over the
//! uncensored observations and keeps the sufficient statistics the rest of
//! the pipeline needs: residual and total sums of squares for R², `Sxx` and
//! the mean of x for leverage terms, and the residual degrees of freedom for
//! the analytical confidence bound.
//!
//! ## Design notes
//!
//! * **Option for degeneracy**: a fit with fewer than 3 points or zero
//!   spread in x has no defined line; `fit_line` returns `None` and the
//!   engine maps that to the data-sufficiency error.
//! * **Two passes**: means first, then centered sums, for numerical
//!   stability over the single-pass formulas.

// ============================================================================
// Fitted Line
// ============================================================================

/// A fitted least-squares line plus its sufficient statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct LineFit {
    /// Intercept `b0`.
    pub intercept: f64,
    /// Slope `b1`.
    pub slope: f64,
    /// Residual sum of squares.
    pub rss: f64,
    /// Total sum of squares of y about its mean.
    pub syy: f64,
    /// Sum of squares of x about its mean.
    pub sxx: f64,
    /// Mean of the x values.
    pub x_mean: f64,
    /// Number of fitted points.
    pub n: usize,
}

impl LineFit {
    /// Predicted value at `x`.
    #[inline]
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }

    /// Residuals `y_i - predicted(x_i)` in input order.
    pub fn residuals(&self, x: &[f64], y: &[f64]) -> Vec<f64> {
        x.iter()
            .zip(y.iter())
            .map(|(&xi, &yi)| yi - self.predict(xi))
            .collect()
    }

    /// Coefficient of determination, `1 - RSS/Syy`.
    ///
    /// A constant response fitted imperfectly reports 0; fitted exactly, 1.
    pub fn r_squared(&self) -> f64 {
        if self.syy > 0.0 {
            1.0 - self.rss / self.syy
        } else if self.rss > 0.0 {
            0.0
        } else {
            1.0
        }
    }

    /// Residual degrees of freedom, `n - 2`.
    #[inline]
    pub fn degrees_of_freedom(&self) -> f64 {
        (self.n - 2) as f64
    }

    /// Unbiased residual standard error, `sqrt(RSS / (n - 2))`.
    pub fn standard_error(&self) -> f64 {
        (self.rss / self.degrees_of_freedom()).sqrt()
    }

    /// Leverage of a prediction at `x`: `1/n + (x - x̄)² / Sxx`.
    pub fn leverage(&self, x: f64) -> f64 {
        let d = x - self.x_mean;
        1.0 / self.n as f64 + d * d / self.sxx
    }
}

// ============================================================================
// Fitting
// ============================================================================

/// Fit a least-squares line through `(x, y)`.
///
/// Returns `None` when fewer than 3 points are supplied or the x values
/// carry no spread (the slope would be undefined).
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    let n = x.len();
    if n < 3 || n != y.len() {
        return None;
    }

    let nf = n as f64;
    let x_mean = x.iter().sum::<f64>() / nf;
    let y_mean = y.iter().sum::<f64>() / nf;

    let mut sxx = 0.0;
    let mut sxy = 0.0;
    let mut syy = 0.0;
    for i in 0..n {
        let dx = x[i] - x_mean;
        let dy = y[i] - y_mean;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }

    if sxx <= 0.0 {
        return None;
    }

    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let rss = x
        .iter()
        .zip(y.iter())
        .map(|(&xi, &yi)| {
            let r = yi - (intercept + slope * xi);
            r * r
        })
        .sum();

    Some(LineFit {
        intercept,
        slope,
        rss,
        syy,
        sxx,
        x_mean,
        n,
    })
}
