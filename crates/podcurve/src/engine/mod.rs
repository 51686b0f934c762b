//! Layer 5: Engine
//!
//! # Purpose
//!
//! This layer orchestrates the pipeline: validation of inputs and
//! configuration, execution of the fit, the seeded bootstrap loop, and the
//! output types handed back to callers.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine ← You are here
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```
/// Seeded bootstrap resampling.
pub mod bootstrap;
/// Fit pipeline execution.
pub mod executor;
/// Output types.
pub mod output;
/// Input and configuration validation.
pub mod validator;
