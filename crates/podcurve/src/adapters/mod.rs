//! Layer 6: Adapters
//!
//! # Purpose
//!
//! This layer provides user-facing APIs that adapt the engine layer for
//! different use cases:
//!
//! - **Analysis**: One-shot signal-response regression with diagnostics
//! - **Estimator**: Full POD estimation with confidence bounds and queries
//!
//! # Architecture
//!
//! ```text
//! Layer 7: API
//!   ↓
//! Layer 6: Adapters ← You are here
//!   ↓
//! Layer 5: Engine
//!   ↓
//! Layer 4: Evaluation
//!   ↓
//! Layer 3: Algorithms
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```

/// Standalone regression analysis adapter.
pub mod analysis;

/// POD estimation adapter.
pub mod estimator;
