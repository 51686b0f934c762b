//! Seeded bootstrap resampling engine.
//!
//! ## Purpose
//!
//! This module drives the resampling confidence methods: it redraws the
//! observation rows with replacement, refits the full pipeline on each
//! draw (Box-Cox search included), and returns the per-resample models the
//! estimator turns into quantile bounds.
//!
//! ## Design notes
//!
//! * **Deterministic streams**: resample slot `i` owns the RNG
//!   `Xoshiro256PlusPlus::seed_from_u64(seed + i)`; the SplitMix64 seeding
//!   stage decorrelates adjacent seeds. Retries draw from the same slot
//!   stream, so the collected models are a pure function of the seed and
//!   the data, identical in sequential and parallel execution.
//! * **Bounded retries**: a degenerate draw (too few distinct sizes, a
//!   non-converging distribution fit) is retried with a fresh draw up to
//!   [`MAX_RESAMPLE_ATTEMPTS`] times, then the whole run fails. Silently
//!   dropping failed resamples would bias the quantile.
//! * **Cooperative cancellation**: the cancel flag is checked before every
//!   draw; cancellation discards all partial results.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::engine::executor::{fit_pipeline, AnalysisConfig, FittedModel};
use crate::primitives::cancel::CancelFlag;
use crate::primitives::data::ObservationSet;
use crate::primitives::errors::PodError;

/// Attempts per resample slot before the run fails.
pub const MAX_RESAMPLE_ATTEMPTS: usize = 32;

// ============================================================================
// Resampling
// ============================================================================

/// Refit the pipeline on `simulation_size` resamples of `obs`.
///
/// Returns the fitted models in slot order, or the first error once a slot
/// exhausts its retries or the run is cancelled.
pub fn run_resamples(
    obs: &ObservationSet,
    config: &AnalysisConfig,
    simulation_size: usize,
    seed: u64,
    cancel: Option<&CancelFlag>,
) -> Result<Vec<FittedModel>, PodError> {
    #[cfg(feature = "parallel")]
    {
        (0..simulation_size)
            .into_par_iter()
            .map(|slot| fit_slot(obs, config, seed, slot, cancel))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        (0..simulation_size)
            .map(|slot| fit_slot(obs, config, seed, slot, cancel))
            .collect()
    }
}

/// Fit one resample slot, retrying degenerate draws on its own RNG stream.
fn fit_slot(
    obs: &ObservationSet,
    config: &AnalysisConfig,
    seed: u64,
    slot: usize,
    cancel: Option<&CancelFlag>,
) -> Result<FittedModel, PodError> {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed.wrapping_add(slot as u64));
    let mut last: Option<PodError> = None;

    for _ in 0..MAX_RESAMPLE_ATTEMPTS {
        if let Some(flag) = cancel {
            if flag.is_cancelled() {
                return Err(PodError::Cancelled);
            }
        }

        let (sizes, signals) = draw(obs, &mut rng);
        let resampled = ObservationSet::partition(
            &sizes,
            &signals,
            config.noise_threshold,
            config.saturation_threshold,
        );
        match fit_pipeline(&resampled, config) {
            Ok(model) => return Ok(model),
            Err(err) => last = Some(err),
        }
    }

    let cause = last.map_or_else(String::new, |err| format!(": {err}"));
    Err(PodError::DistributionFit(format!(
        "resample {slot} did not produce a valid fit in {MAX_RESAMPLE_ATTEMPTS} attempts{cause}"
    )))
}

/// Draw `obs.len()` rows with replacement.
fn draw(obs: &ObservationSet, rng: &mut Xoshiro256PlusPlus) -> (Vec<f64>, Vec<f64>) {
    let n = obs.len();
    let sizes = obs.sizes();
    let signals = obs.signals();
    let mut drawn_sizes = Vec::with_capacity(n);
    let mut drawn_signals = Vec::with_capacity(n);
    for _ in 0..n {
        let j = rng.random_range(0..n);
        drawn_sizes.push(sizes[j]);
        drawn_signals.push(signals[j]);
    }
    (drawn_sizes, drawn_signals)
}
