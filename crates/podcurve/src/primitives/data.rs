//! Observation storage and censoring partition.
//!
//! ## Purpose
//!
//! This module owns the (defect size, signal) observation pairs and derives
//! the censoring partition from the configured noise/saturation thresholds.
//! Censored points are excluded from model fitting but retained for counting
//! and reporting.
//!
//! ## Key concepts
//!
//! * **Partition rule**: signal strictly below the noise threshold is
//!   censored-low; strictly above the saturation threshold is censored-high;
//!   everything else is uncensored.
//! * **Original order**: observations keep their input order; uncensored
//!   points are addressed through an index list so error reports can point
//!   back at the caller's arrays.
//!
//! ## Invariants
//!
//! * `sizes`, `signals`, and `censoring` always have identical length.
//! * Every index in `uncensored` is in bounds and marked `Uncensored`.
//!
//! ## Non-goals
//!
//! * This module does not validate finiteness or lengths (engine validator).
//! * This module does not fit anything.

// ============================================================================
// Censoring Marker
// ============================================================================

/// Per-observation censoring status derived from the thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Censoring {
    /// Signal measured exactly; participates in the fit.
    Uncensored,
    /// Signal below the noise threshold; size retained as metadata only.
    BelowNoise,
    /// Signal above the saturation threshold; size retained as metadata only.
    AboveSaturation,
}

// ============================================================================
// Observation Set
// ============================================================================

/// Validated observation pairs plus their censoring partition.
#[derive(Debug, Clone)]
pub struct ObservationSet {
    sizes: Vec<f64>,
    signals: Vec<f64>,
    censoring: Vec<Censoring>,
    uncensored: Vec<usize>,
}

impl ObservationSet {
    /// Partition observations against optional censoring thresholds.
    ///
    /// Inputs are assumed length-matched and finite (validated upstream).
    pub fn partition(
        sizes: &[f64],
        signals: &[f64],
        noise_threshold: Option<f64>,
        saturation_threshold: Option<f64>,
    ) -> Self {
        let censoring: Vec<Censoring> = signals
            .iter()
            .map(|&s| match (noise_threshold, saturation_threshold) {
                (Some(noise), _) if s < noise => Censoring::BelowNoise,
                (_, Some(sat)) if s > sat => Censoring::AboveSaturation,
                _ => Censoring::Uncensored,
            })
            .collect();

        let uncensored: Vec<usize> = censoring
            .iter()
            .enumerate()
            .filter(|(_, &c)| c == Censoring::Uncensored)
            .map(|(i, _)| i)
            .collect();

        Self {
            sizes: sizes.to_vec(),
            signals: signals.to_vec(),
            censoring,
            uncensored,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Total number of observations, censored included.
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    /// True when the set holds no observations.
    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }

    /// All defect sizes in input order.
    pub fn sizes(&self) -> &[f64] {
        &self.sizes
    }

    /// All signals in input order.
    pub fn signals(&self) -> &[f64] {
        &self.signals
    }

    /// Censoring marker per observation, in input order.
    pub fn censoring(&self) -> &[Censoring] {
        &self.censoring
    }

    /// Number of uncensored observations.
    pub fn uncensored_len(&self) -> usize {
        self.uncensored.len()
    }

    /// Number of observations censored below the noise threshold.
    pub fn censored_low(&self) -> usize {
        self.censoring
            .iter()
            .filter(|&&c| c == Censoring::BelowNoise)
            .count()
    }

    /// Number of observations censored above the saturation threshold.
    pub fn censored_high(&self) -> usize {
        self.censoring
            .iter()
            .filter(|&&c| c == Censoring::AboveSaturation)
            .count()
    }

    /// Defect sizes of the uncensored observations, in input order.
    pub fn uncensored_sizes(&self) -> Vec<f64> {
        self.uncensored.iter().map(|&i| self.sizes[i]).collect()
    }

    /// Signals of the uncensored observations, in input order.
    pub fn uncensored_signals(&self) -> Vec<f64> {
        self.uncensored.iter().map(|&i| self.signals[i]).collect()
    }

    /// Original input index of each uncensored observation.
    pub fn uncensored_indices(&self) -> &[usize] {
        &self.uncensored
    }

    /// Number of distinct defect sizes among the uncensored observations.
    ///
    /// Exact equality on purpose: repeated inspection sizes are genuinely
    /// identical values, not approximate ones.
    pub fn distinct_uncensored_sizes(&self) -> usize {
        let mut sorted = self.uncensored_sizes();
        sorted.sort_by(f64::total_cmp);
        let mut distinct = 0;
        let mut last = f64::NAN;
        for &s in &sorted {
            if distinct == 0 || s != last {
                distinct += 1;
                last = s;
            }
        }
        distinct
    }

    /// Minimum and maximum defect size over all observations.
    ///
    /// Censored points count: their sizes are real inspections and bound the
    /// range within which the POD curve may be queried without extrapolating.
    pub fn size_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &s in &self.sizes {
            if s < min {
                min = s;
            }
            if s > max {
                max = s;
            }
        }
        (min, max)
    }
}
