//! Inference module: bytes in, classification out
//!
//! This module provides the deterministic pipeline from uploaded image bytes
//! to a structured freshness verdict:
//!
//! 1. `preprocess`: decode, resize, scale, and (per variant) standardize
//! 2. the classifier forward pass (see `crate::model`)
//! 3. `score`: numerically stable softmax over the logits
//! 4. `predictor`: category aggregation and response formatting
//!
//! Everything here is pure and request-scoped: no caching, no randomness,
//! no state shared between requests beyond the read-only model.

pub mod predictor;
pub mod preprocess;
pub mod score;

// Re-export main types for convenience
pub use predictor::{ClassificationResult, FreshnessService, PredictionResponse};
pub use preprocess::{decode_image, preprocess_image};
pub use score::{argmax, softmax};
