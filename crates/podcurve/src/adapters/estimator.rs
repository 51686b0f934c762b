//! POD estimator adapter.
//!
//! ## Purpose
//!
//! This adapter owns the full estimation lifecycle: `run()` executes the
//! configured confidence method end-to-end and caches the fitted artifacts;
//! the query methods (`pod`, `pod_at_confidence`, `detection_size`,
//! `pod_table`, `analysis`) read from that cache.
//!
//! ## Design notes
//!
//! * **Explicit run state**: queries before a successful `run()` fail with
//!   the not-run error; configuration setters drop the cached artifacts, so
//!   a stale model can never answer a query.
//! * **Seeding**: with `.seed(..)` pinned, stochastic runs are reproducible
//!   and independent of thread count; without it, each `run()` draws a
//!   fresh seed from OS entropy.
//! * **Kernel override**: under the kernel-smoothing bootstrap the residual
//!   distribution is the kernel-smoothed empirical one for the base fit and
//!   every resample, regardless of the configured family.

use crate::algorithms::boxcox::BoxCox;
use crate::algorithms::distributions::ResidualModel;
use crate::engine::bootstrap::run_resamples;
use crate::engine::executor::{diagnose, fit_pipeline, AnalysisConfig, FittedModel};
use crate::engine::output::{AnalysisReport, DetectionSize, PodPoint};
use crate::engine::validator::Validator;
use crate::evaluation::confidence::ConfidenceMethod;
use crate::math::quantile::empirical_quantile;
use crate::math::roots::bisect;
use crate::primitives::cancel::CancelFlag;
use crate::primitives::data::ObservationSet;
use crate::primitives::errors::PodError;

/// Default number of bootstrap resamples.
pub const DEFAULT_SIMULATION_SIZE: usize = 1000;

/// Relative tolerance of the detection-size bisection, as a fraction of
/// the observed size range.
const INVERSION_TOL_FACTOR: f64 = 1e-10;

/// Iteration cap of the detection-size bisection.
const INVERSION_MAX_ITER: usize = 200;

// ============================================================================
// Estimator Builder
// ============================================================================

/// Builder for the POD estimator.
#[derive(Debug, Clone)]
pub struct EstimatorBuilder {
    /// Detection threshold: the signal level that counts as a detection.
    pub detection: Option<f64>,

    /// Signal transform applied before the linear fit.
    pub box_cox: BoxCox,

    /// Residual distribution family.
    pub residual_model: ResidualModel,

    /// Signals strictly below this value are censored-low.
    pub noise_threshold: Option<f64>,

    /// Signals strictly above this value are censored-high.
    pub saturation_threshold: Option<f64>,

    /// Confidence bound strategy.
    pub confidence_method: ConfidenceMethod,

    /// Number of bootstrap resamples.
    pub simulation_size: usize,

    /// Pinned RNG seed for reproducible resampling.
    pub seed: Option<u64>,

    /// Cooperative cancellation flag checked between resamples.
    pub cancel_flag: Option<CancelFlag>,

    /// Tracks if any parameter was set multiple times (for validation).
    #[doc(hidden)]
    pub(crate) duplicate_param: Option<&'static str>,
}

impl Default for EstimatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EstimatorBuilder {
    /// Create a builder with default settings.
    pub fn new() -> Self {
        Self {
            detection: None,
            box_cox: BoxCox::Off,
            residual_model: ResidualModel::Normal,
            noise_threshold: None,
            saturation_threshold: None,
            confidence_method: ConfidenceMethod::Analytical,
            simulation_size: DEFAULT_SIMULATION_SIZE,
            seed: None,
            cancel_flag: None,
            duplicate_param: None,
        }
    }

    /// Set the detection threshold (required).
    pub fn detection(mut self, threshold: f64) -> Self {
        self.detection = Some(threshold);
        self
    }

    /// Set the Box-Cox transform mode.
    pub fn box_cox(mut self, mode: BoxCox) -> Self {
        self.box_cox = mode;
        self
    }

    /// Set the residual distribution family.
    pub fn residual_model(mut self, model: ResidualModel) -> Self {
        self.residual_model = model;
        self
    }

    /// Set the noise (censoring-low) threshold.
    pub fn noise_threshold(mut self, value: f64) -> Self {
        self.noise_threshold = Some(value);
        self
    }

    /// Set the saturation (censoring-high) threshold.
    pub fn saturation_threshold(mut self, value: f64) -> Self {
        self.saturation_threshold = Some(value);
        self
    }

    /// Set the confidence bound strategy.
    pub fn confidence_method(mut self, method: ConfidenceMethod) -> Self {
        self.confidence_method = method;
        self
    }

    /// Set the number of bootstrap resamples.
    pub fn simulation_size(mut self, n: usize) -> Self {
        self.simulation_size = n;
        self
    }

    /// Pin the RNG seed.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Attach a cancellation flag.
    pub fn cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel_flag = Some(flag);
        self
    }

    // ========================================================================
    // Build Method
    // ========================================================================

    /// Build the estimator.
    pub fn build(self) -> Result<PodEstimator, PodError> {
        // Check for duplicate parameter configuration
        Validator::validate_no_duplicates(self.duplicate_param)?;

        // Required detection threshold
        let detection_threshold = Validator::validate_detection_threshold(self.detection)?;

        // Validate censoring thresholds
        Validator::validate_censoring_thresholds(self.noise_threshold, self.saturation_threshold)?;

        // Validate the transform mode and its domain
        Validator::validate_box_cox(
            &self.box_cox,
            &[
                ("detection", Some(detection_threshold)),
                ("noise", self.noise_threshold),
                ("saturation", self.saturation_threshold),
            ],
        )?;

        // Validate the resampling knob
        Validator::validate_simulation_size(self.simulation_size)?;

        // Validate method/model compatibility
        Validator::validate_method(self.confidence_method, &self.residual_model)?;

        Ok(PodEstimator {
            detection_threshold,
            config: AnalysisConfig {
                box_cox: self.box_cox,
                residual_model: self.residual_model,
                noise_threshold: self.noise_threshold,
                saturation_threshold: self.saturation_threshold,
            },
            confidence_method: self.confidence_method,
            simulation_size: self.simulation_size,
            seed: self.seed,
            cancel: self.cancel_flag,
            state: None,
        })
    }
}

// ============================================================================
// POD Estimator
// ============================================================================

/// Cached artifacts of one successful `run()`.
#[derive(Debug, Clone)]
struct RunState {
    base: FittedModel,
    report: AnalysisReport,
    resamples: Vec<FittedModel>,
    size_lo: f64,
    size_hi: f64,
    run_seed: Option<u64>,
}

/// Configured POD estimator: run once, query repeatedly.
#[derive(Debug, Clone)]
pub struct PodEstimator {
    detection_threshold: f64,
    config: AnalysisConfig,
    confidence_method: ConfidenceMethod,
    simulation_size: usize,
    seed: Option<u64>,
    cancel: Option<CancelFlag>,
    state: Option<RunState>,
}

impl PodEstimator {
    // ========================================================================
    // Execution
    // ========================================================================

    /// Execute the configured method on the supplied observations and cache
    /// the POD artifacts.
    ///
    /// Stochastic methods re-draw fresh resamples on every call unless a
    /// seed is pinned; the analytical method is fully deterministic.
    pub fn run(&mut self, sizes: &[f64], signals: &[f64]) -> Result<(), PodError> {
        self.state = None;
        Validator::validate_inputs(sizes, signals)?;

        let obs = ObservationSet::partition(
            sizes,
            signals,
            self.config.noise_threshold,
            self.config.saturation_threshold,
        );
        let config = self.effective_config();

        let base = fit_pipeline(&obs, &config)?;
        let diagnostics = diagnose(&base);
        let report = AnalysisReport::from_fit(&base, diagnostics, &obs, &config);
        let (size_lo, size_hi) = obs.size_range();

        let (resamples, run_seed) = match self.confidence_method {
            ConfidenceMethod::Analytical => (Vec::new(), None),
            ConfidenceMethod::Bootstrap | ConfidenceMethod::KernelBootstrap => {
                let seed = self.seed.unwrap_or_else(rand::random::<u64>);
                let models = run_resamples(
                    &obs,
                    &config,
                    self.simulation_size,
                    seed,
                    self.cancel.as_ref(),
                )?;
                (models, Some(seed))
            }
        };

        self.state = Some(RunState {
            base,
            report,
            resamples,
            size_lo,
            size_hi,
            run_seed,
        });
        Ok(())
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Mean probability of detection at a defect size.
    pub fn pod(&self, size: f64) -> Result<f64, PodError> {
        let state = self.state()?;
        Ok(state.base.pod(size, self.detection_threshold))
    }

    /// Lower confidence bound on POD at a defect size.
    pub fn pod_at_confidence(&self, size: f64, confidence: f64) -> Result<f64, PodError> {
        Validator::validate_level("confidence level", confidence)?;
        let state = self.state()?;
        Ok(self.bound_at(state, size, confidence))
    }

    /// The defect size at which the POD bound reaches `probability`.
    ///
    /// Found by bisection over the observed size range. When every observed
    /// size already exceeds the requested level, the smallest observed size
    /// is returned with the extrapolation flag set; when the bound never
    /// reaches the level, the query fails with [`PodError::NoSolution`].
    pub fn detection_size(
        &self,
        probability: f64,
        confidence: f64,
    ) -> Result<DetectionSize, PodError> {
        Validator::validate_level("probability level", probability)?;
        Validator::validate_level("confidence level", confidence)?;
        let state = self.state()?;

        let (lo, hi) = (state.size_lo, state.size_hi);
        let tol = INVERSION_TOL_FACTOR * (hi - lo);
        let excess = |a: f64| self.bound_at(state, a, confidence) - probability;

        match bisect(excess, lo, hi, tol, INVERSION_MAX_ITER) {
            Ok(root) => Ok(DetectionSize {
                size: root,
                probability,
                confidence,
                extrapolated: root - lo <= tol || hi - root <= tol,
            }),
            Err(bracket) if bracket.f_lo > 0.0 => {
                // The bound clears the level everywhere in range; the true
                // crossing lies below the smallest observed size.
                Ok(DetectionSize {
                    size: lo,
                    probability,
                    confidence,
                    extrapolated: true,
                })
            }
            Err(bracket) => Err(PodError::NoSolution {
                probability,
                confidence,
                reached: bracket.f_hi + probability,
            }),
        }
    }

    /// Tabulate the POD curve at the given sizes, optionally with a lower
    /// confidence bound column.
    pub fn pod_table(
        &self,
        sizes: &[f64],
        confidence: Option<f64>,
    ) -> Result<Vec<PodPoint>, PodError> {
        if let Some(level) = confidence {
            Validator::validate_level("confidence level", level)?;
        }
        let state = self.state()?;

        Ok(sizes
            .iter()
            .map(|&size| PodPoint {
                size,
                pod: state.base.pod(size, self.detection_threshold),
                lower_bound: confidence.map(|level| self.bound_at(state, size, level)),
            })
            .collect())
    }

    /// The regression analysis underlying the current run.
    pub fn analysis(&self) -> Result<&AnalysisReport, PodError> {
        Ok(&self.state()?.report)
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Change the number of bootstrap resamples. Drops cached artifacts.
    pub fn set_simulation_size(&mut self, n: usize) -> Result<(), PodError> {
        Validator::validate_simulation_size(n)?;
        self.simulation_size = n;
        self.state = None;
        Ok(())
    }

    /// Current number of bootstrap resamples.
    pub fn simulation_size(&self) -> usize {
        self.simulation_size
    }

    /// Pin the RNG seed. Drops cached artifacts.
    pub fn set_seed(&mut self, seed: u64) {
        self.seed = Some(seed);
        self.state = None;
    }

    /// The pinned seed, if any.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Change the confidence bound strategy. Drops cached artifacts.
    pub fn set_confidence_method(&mut self, method: ConfidenceMethod) -> Result<(), PodError> {
        Validator::validate_method(method, &self.config.residual_model)?;
        self.confidence_method = method;
        self.state = None;
        Ok(())
    }

    /// Current confidence bound strategy.
    pub fn confidence_method(&self) -> ConfidenceMethod {
        self.confidence_method
    }

    /// The configured detection threshold.
    pub fn detection_threshold(&self) -> f64 {
        self.detection_threshold
    }

    /// Whether a run has completed and queries are available.
    pub fn has_run(&self) -> bool {
        self.state.is_some()
    }

    /// The seed the last stochastic run actually used (the pinned seed, or
    /// the one drawn from OS entropy). `None` before a run or after an
    /// analytical run.
    pub fn run_seed(&self) -> Option<u64> {
        self.state.as_ref().and_then(|state| state.run_seed)
    }

    // ========================================================================
    // Internals
    // ========================================================================

    fn state(&self) -> Result<&RunState, PodError> {
        self.state.as_ref().ok_or(PodError::NotRun)
    }

    fn bound_at(&self, state: &RunState, size: f64, confidence: f64) -> f64 {
        match self.confidence_method {
            ConfidenceMethod::Analytical => {
                state
                    .base
                    .wald_bound(size, self.detection_threshold, confidence)
            }
            ConfidenceMethod::Bootstrap | ConfidenceMethod::KernelBootstrap => {
                let mut pods: Vec<f64> = state
                    .resamples
                    .iter()
                    .map(|model| model.pod(size, self.detection_threshold))
                    .collect();
                empirical_quantile(&mut pods, 1.0 - confidence)
            }
        }
    }

    fn effective_config(&self) -> AnalysisConfig {
        let mut config = self.config.clone();
        if self.confidence_method == ConfidenceMethod::KernelBootstrap {
            config.residual_model = ResidualModel::KernelSmoothing;
        }
        config
    }
}
