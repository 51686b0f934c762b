//! Cooperative cancellation for long-running estimation.
//!
//! ## Purpose
//!
//! Bootstrap runs with large simulation sizes can take long enough that
//! callers want to abort them. This module provides a cheap, cloneable flag
//! the resampling loop polls between iterations. Cancellation discards all
//! partial results: an incomplete resample collection would bias the
//! confidence bound.
//!
//! ## Key concepts
//!
//! * **Polling points**: the flag is checked between resample iterations,
//!   never inside a single fit.
//! * **Relaxed ordering**: the flag carries no data, only a latest-wins
//!   signal, so relaxed atomics suffice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cloneable cancellation flag shared between a caller and a running estimator.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag {
    inner: Arc<AtomicBool>,
}

impl CancelFlag {
    /// Create a new, unset flag.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Takes effect at the next polling point.
    pub fn cancel(&self) {
        self.inner.store(true, Ordering::Relaxed);
    }

    /// True once cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.inner.load(Ordering::Relaxed)
    }
}
