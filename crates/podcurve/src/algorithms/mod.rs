//! Layer 3: Algorithms
//!
//! # Purpose
//!
//! This layer implements the statistical building blocks of the POD
//! pipeline: the least-squares line fit, the Box-Cox transform and its
//! profile-likelihood exponent search, and the residual noise models
//! (Normal, shifted Weibull, Gaussian kernel density, custom).
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
//! Layer 3: Algorithms ← You are here
//!   ↓
//! Layer 2: Math
//!   ↓
//! Layer 1: Primitives
//! ```
/// Box-Cox transformation and exponent search.
pub mod boxcox;
/// Residual model selection and fitting.
pub mod distributions;
/// Gaussian kernel density estimation.
pub mod kernel;
/// Ordinary least squares line fitting.
pub mod linear;
/// Shifted Weibull maximum-likelihood fitting.
pub mod weibull;
