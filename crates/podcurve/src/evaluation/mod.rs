//! Layer 4: Evaluation
//!
//! # Purpose
//!
//! This layer judges and bounds the fitted model: the diagnostic hypothesis
//! tests that probe the regression assumptions, and the analytical (Wald)
//! confidence bound used by the deterministic method.
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation ← You are here
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```
/// Analytical confidence bound.
pub mod confidence;
/// Diagnostic hypothesis tests.
pub mod diagnostics;
