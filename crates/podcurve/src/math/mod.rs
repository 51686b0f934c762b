//! Layer 2: Math
//!
//! # Purpose
//!
//! This layer provides pure mathematical functions with no knowledge of POD
//! semantics: empirical quantiles and bracketed root finding. It depends only
//! on the primitives layer.
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
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math ← You are here
//!   ↓
//! Layer 1: Primitives
//! ```

/// Empirical quantile computation.
pub mod quantile;

/// Bracketed root finding.
pub mod roots;
