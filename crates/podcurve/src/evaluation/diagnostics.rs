//! Diagnostic hypothesis tests on the regression residuals.
//!
//! ## Purpose
//!
//! Every fit runs a battery of seven tests that probe the assumptions the
//! POD computation leans on: Gaussian residuals (Anderson-Darling,
//! Cramér-von Mises), agreement with the fitted residual distribution
//! (Kolmogorov), no autocorrelation (Durbin-Watson), homoscedasticity
//! (Breusch-Pagan, Harrison-McCabe), and zero residual mean (one-sample t).
//!
//! ## Design notes
//!
//! * **Degraded, never fatal**: a test that cannot run at the given sample
//!   size reports a `NaN` p-value; the fit itself always completes.
//! * **Two-sided**: deviation in either direction counts against the
//!   assumption.
//! * **Ordering matters**: Durbin-Watson and Harrison-McCabe read the
//!   residuals in defect-size order; the fit pipeline sorts observations
//!   by size before computing residuals.
//!
//! ## Non-goals
//!
//! * No pass/fail verdicts. The p-values are reported as data; acting on
//!   them is the caller's judgment.

use statrs::distribution::{ChiSquared, ContinuousCDF, Normal, StudentsT};

use crate::algorithms::distributions::FittedResidual;
use crate::algorithms::linear::fit_line;

/// CDF values are clamped away from 0 and 1 before taking logarithms.
const CDF_CLAMP: f64 = 1e-15;

// ============================================================================
// Test Names
// ============================================================================

/// The diagnostic tests run on every fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticTest {
    /// Anderson-Darling normality test of the residuals.
    AndersonDarling,
    /// Cramér-von Mises normality test of the residuals.
    CramerVonMises,
    /// Kolmogorov goodness-of-fit of the fitted residual distribution.
    Kolmogorov,
    /// Durbin-Watson test for lag-1 residual autocorrelation.
    DurbinWatson,
    /// Breusch-Pagan test for heteroscedasticity against defect size.
    BreuschPagan,
    /// Harrison-McCabe test for heteroscedasticity between sample halves.
    HarrisonMcCabe,
    /// One-sample t-test that the residual mean is zero.
    ZeroMean,
}

impl DiagnosticTest {
    /// All tests, in reporting order.
    pub const ALL: [DiagnosticTest; 7] = [
        DiagnosticTest::AndersonDarling,
        DiagnosticTest::CramerVonMises,
        DiagnosticTest::Kolmogorov,
        DiagnosticTest::DurbinWatson,
        DiagnosticTest::BreuschPagan,
        DiagnosticTest::HarrisonMcCabe,
        DiagnosticTest::ZeroMean,
    ];

    /// Reporting name of the test.
    pub fn name(&self) -> &'static str {
        match self {
            Self::AndersonDarling => "Anderson-Darling",
            Self::CramerVonMises => "Cramer-von Mises",
            Self::Kolmogorov => "Kolmogorov",
            Self::DurbinWatson => "Durbin-Watson",
            Self::BreuschPagan => "Breusch-Pagan",
            Self::HarrisonMcCabe => "Harrison-McCabe",
            Self::ZeroMean => "Zero-mean",
        }
    }
}

// ============================================================================
// Results
// ============================================================================

/// Two-sided p-values of the diagnostic battery.
///
/// A `NaN` entry means the corresponding test could not run at the given
/// sample size.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostics {
    /// Anderson-Darling normality p-value.
    pub anderson_darling: f64,
    /// Cramér-von Mises normality p-value.
    pub cramer_von_mises: f64,
    /// Kolmogorov goodness-of-fit p-value against the fitted distribution.
    pub kolmogorov: f64,
    /// Durbin-Watson autocorrelation p-value.
    pub durbin_watson: f64,
    /// Breusch-Pagan heteroscedasticity p-value.
    pub breusch_pagan: f64,
    /// Harrison-McCabe heteroscedasticity p-value.
    pub harrison_mccabe: f64,
    /// Zero-mean t-test p-value.
    pub zero_mean: f64,
}

impl Diagnostics {
    /// Look up a p-value by test.
    pub fn p_value(&self, test: DiagnosticTest) -> f64 {
        match test {
            DiagnosticTest::AndersonDarling => self.anderson_darling,
            DiagnosticTest::CramerVonMises => self.cramer_von_mises,
            DiagnosticTest::Kolmogorov => self.kolmogorov,
            DiagnosticTest::DurbinWatson => self.durbin_watson,
            DiagnosticTest::BreuschPagan => self.breusch_pagan,
            DiagnosticTest::HarrisonMcCabe => self.harrison_mccabe,
            DiagnosticTest::ZeroMean => self.zero_mean,
        }
    }
}

/// Run the full battery.
///
/// `sizes` and `residuals` are the uncensored observations in defect-size
/// order; `fitted` is the residual distribution the Kolmogorov test checks
/// against.
pub fn compute_diagnostics(
    sizes: &[f64],
    residuals: &[f64],
    fitted: &FittedResidual,
) -> Diagnostics {
    Diagnostics {
        anderson_darling: anderson_darling_p(residuals).unwrap_or(f64::NAN),
        cramer_von_mises: cramer_von_mises_p(residuals).unwrap_or(f64::NAN),
        kolmogorov: kolmogorov_p(residuals, fitted).unwrap_or(f64::NAN),
        durbin_watson: durbin_watson_p(residuals).unwrap_or(f64::NAN),
        breusch_pagan: breusch_pagan_p(sizes, residuals).unwrap_or(f64::NAN),
        harrison_mccabe: harrison_mccabe_p(residuals).unwrap_or(f64::NAN),
        zero_mean: zero_mean_p(residuals).unwrap_or(f64::NAN),
    }
}

// ============================================================================
// Normality Tests
// ============================================================================

/// Anderson-Darling normality test; requires n ≥ 8.
///
/// Uses the Stephens small-sample modification of A² and the
/// D'Agostino & Stephens (1986) piecewise p-value approximation.
pub fn anderson_darling_p(residuals: &[f64]) -> Option<f64> {
    let n = residuals.len();
    if n < 8 {
        return None;
    }
    let z = standardized_sorted(residuals)?;
    let phi = standard_normal();

    let nf = n as f64;
    let mut sum = 0.0;
    for i in 0..n {
        let f_lo = phi.cdf(z[i]).clamp(CDF_CLAMP, 1.0 - CDF_CLAMP);
        let f_hi = phi.cdf(z[n - 1 - i]).clamp(CDF_CLAMP, 1.0 - CDF_CLAMP);
        sum += (2.0 * i as f64 + 1.0) * (f_lo.ln() + (1.0 - f_hi).ln());
    }
    let a_squared = -nf - sum / nf;
    let a_star = a_squared * (1.0 + 0.75 / nf + 2.25 / (nf * nf));

    let p = if a_star >= 0.6 {
        (1.2937 - 5.709 * a_star + 0.0186 * a_star * a_star).exp()
    } else if a_star >= 0.34 {
        (0.9177 - 4.279 * a_star - 1.38 * a_star * a_star).exp()
    } else if a_star >= 0.2 {
        1.0 - (-8.318 + 42.796 * a_star - 59.938 * a_star * a_star).exp()
    } else {
        1.0 - (-13.436 + 101.14 * a_star - 223.73 * a_star * a_star).exp()
    };
    Some(p.clamp(0.0, 1.0))
}

/// Cramér-von Mises normality test; requires n ≥ 8.
///
/// Uses the (1 + 0.5/n) modification of W² and the Csörgő-Faraway
/// piecewise approximation popularized by the R `nortest` package.
pub fn cramer_von_mises_p(residuals: &[f64]) -> Option<f64> {
    let n = residuals.len();
    if n < 8 {
        return None;
    }
    let z = standardized_sorted(residuals)?;
    let phi = standard_normal();

    let nf = n as f64;
    let mut w_squared = 1.0 / (12.0 * nf);
    for (i, &zi) in z.iter().enumerate() {
        let f = phi.cdf(zi).clamp(CDF_CLAMP, 1.0 - CDF_CLAMP);
        let step = (2.0 * i as f64 + 1.0) / (2.0 * nf);
        w_squared += (f - step) * (f - step);
    }
    let ww = w_squared * (1.0 + 0.5 / nf);

    let p = if ww < 0.0275 {
        1.0 - (-13.953 + 775.5 * ww - 12542.61 * ww * ww).exp()
    } else if ww < 0.051 {
        1.0 - (-5.903 + 179.546 * ww - 1515.29 * ww * ww).exp()
    } else if ww < 0.092 {
        (0.886 - 31.62 * ww + 10.897 * ww * ww).exp()
    } else if ww < 1.1 {
        (1.111 - 34.242 * ww + 12.832 * ww * ww).exp()
    } else {
        7.37e-10
    };
    Some(p.clamp(0.0, 1.0))
}

// ============================================================================
// Goodness of Fit
// ============================================================================

/// Kolmogorov goodness-of-fit of `fitted` to the residuals; requires n ≥ 3.
///
/// The statistic D is corrected for sample size per Stephens
/// (λ = (√n + 0.12 + 0.11/√n)·D) and converted through the asymptotic
/// Kolmogorov series.
pub fn kolmogorov_p(residuals: &[f64], fitted: &FittedResidual) -> Option<f64> {
    let n = residuals.len();
    if n < 3 {
        return None;
    }
    let mut sorted = residuals.to_vec();
    sorted.sort_by(f64::total_cmp);

    let nf = n as f64;
    let mut d = 0.0_f64;
    for (i, &x) in sorted.iter().enumerate() {
        let f = fitted.cdf(x).clamp(0.0, 1.0);
        let d_plus = (i + 1) as f64 / nf - f;
        let d_minus = f - i as f64 / nf;
        d = d.max(d_plus).max(d_minus);
    }
    if d <= 0.0 {
        return Some(1.0);
    }

    let lambda = (nf.sqrt() + 0.12 + 0.11 / nf.sqrt()) * d;
    let mut p = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = (-2.0 * kf * kf * lambda * lambda).exp();
        p += sign * term;
        if term < 1e-10 {
            break;
        }
        sign = -sign;
    }
    Some((2.0 * p).clamp(0.0, 1.0))
}

// ============================================================================
// Autocorrelation
// ============================================================================

/// Durbin-Watson test for lag-1 autocorrelation; requires n ≥ 4.
///
/// Two-sided normal approximation through the implied lag-1 correlation
/// r₁ ≈ 1 − DW/2 with z = r₁·√n.
pub fn durbin_watson_p(residuals: &[f64]) -> Option<f64> {
    let n = residuals.len();
    if n < 4 {
        return None;
    }
    let denom: f64 = residuals.iter().map(|&r| r * r).sum();
    if !(denom > 0.0) {
        return None;
    }
    let numer: f64 = residuals
        .windows(2)
        .map(|w| (w[1] - w[0]) * (w[1] - w[0]))
        .sum();
    let dw = numer / denom;

    let r1 = 1.0 - dw / 2.0;
    let z = r1 * (n as f64).sqrt();
    Some(two_sided_normal_p(z))
}

// ============================================================================
// Heteroscedasticity
// ============================================================================

/// Breusch-Pagan test regressing squared residuals on size; requires n ≥ 5.
///
/// The LM statistic n·R² of the auxiliary regression is referred to χ²(1).
pub fn breusch_pagan_p(sizes: &[f64], residuals: &[f64]) -> Option<f64> {
    let n = residuals.len();
    if n < 5 || sizes.len() != n {
        return None;
    }
    let squared: Vec<f64> = residuals.iter().map(|&r| r * r).collect();
    let aux = fit_line(sizes, &squared)?;

    // Constant squared residuals are exact homoscedasticity.
    let r2 = if aux.syy > 0.0 {
        (1.0 - aux.rss / aux.syy).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let lm = n as f64 * r2;

    let chi = ChiSquared::new(1.0).ok()?;
    Some((1.0 - chi.cdf(lm)).clamp(0.0, 1.0))
}

/// Harrison-McCabe test comparing half-sample residual variance; n ≥ 5.
///
/// The fraction b of squared residuals in the first half is referred to a
/// normal approximation of its null beta distribution, two-sided.
pub fn harrison_mccabe_p(residuals: &[f64]) -> Option<f64> {
    let n = residuals.len();
    if n < 5 {
        return None;
    }
    let total: f64 = residuals.iter().map(|&r| r * r).sum();
    if !(total > 0.0) {
        return None;
    }
    let m = n / 2;
    let first: f64 = residuals[..m].iter().map(|&r| r * r).sum();
    let b = first / total;

    let nf = n as f64;
    let mf = m as f64;
    let mean = mf / nf;
    let var = 2.0 * mf * (nf - mf) / (nf * nf * (nf + 2.0));
    let z = (b - mean) / var.sqrt();
    Some(two_sided_normal_p(z))
}

// ============================================================================
// Location
// ============================================================================

/// One-sample t-test that the residual mean is zero; requires n ≥ 3.
pub fn zero_mean_p(residuals: &[f64]) -> Option<f64> {
    let n = residuals.len();
    if n < 3 {
        return None;
    }
    let nf = n as f64;
    let mean = residuals.iter().sum::<f64>() / nf;
    let ss: f64 = residuals.iter().map(|&r| (r - mean) * (r - mean)).sum();
    let sd = (ss / (nf - 1.0)).sqrt();
    if !(sd > 0.0) {
        return None;
    }
    let t = mean / (sd / nf.sqrt());

    let dist = StudentsT::new(0.0, 1.0, nf - 1.0).ok()?;
    Some((2.0 * (1.0 - dist.cdf(t.abs()))).clamp(0.0, 1.0))
}

// ============================================================================
// Helpers
// ============================================================================

/// Residuals standardized by sample mean and standard deviation, sorted
/// ascending. `None` for degenerate spread.
fn standardized_sorted(residuals: &[f64]) -> Option<Vec<f64>> {
    let n = residuals.len();
    let nf = n as f64;
    let mean = residuals.iter().sum::<f64>() / nf;
    let ss: f64 = residuals.iter().map(|&r| (r - mean) * (r - mean)).sum();
    let sd = (ss / (nf - 1.0)).sqrt();
    if !(sd > 1e-300) {
        return None;
    }
    let mut z: Vec<f64> = residuals.iter().map(|&r| (r - mean) / sd).collect();
    z.sort_by(f64::total_cmp);
    Some(z)
}

/// Two-sided p-value of a standard normal z score.
fn two_sided_normal_p(z: f64) -> f64 {
    let phi = standard_normal();
    (2.0 * (1.0 - phi.cdf(z.abs()))).clamp(0.0, 1.0)
}

/// Standard Normal(0, 1); construction cannot fail.
fn standard_normal() -> Normal {
    Normal::new(0.0, 1.0).unwrap()
}
