//! # FoodCheck
//!
//! A Rust library for produce freshness classification using the Burn framework.
//! Takes the raw bytes of an uploaded produce photo and returns a structured
//! verdict: the most probable fine-grained class, the coarse fresh/rotten
//! category, and calibrated confidence scores for both.
//!
//! ## Modules
//!
//! - `labels`: class taxonomy and the validated label-to-category mapping
//! - `model`: CNN architecture, model variants, and weight loading
//! - `inference`: decoding, preprocessing, scoring, and the prediction service
//! - `utils`: logging and error handling
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use foodcheck::backend::{default_device, DefaultBackend};
//! use foodcheck::model::{load_classifier, ModelVariant};
//! use foodcheck::inference::FreshnessService;
//!
//! let variant = ModelVariant::fine();
//! let device = default_device();
//! let model = load_classifier::<DefaultBackend>("model/foodcheck.mpk", &variant, &device)?;
//! let service = FreshnessService::new(model, variant)?;
//! let verdict = service.classify_bytes(&image_bytes)?;
//! ```

pub mod backend;
pub mod inference;
pub mod labels;
pub mod model;
pub mod utils;

// Re-export commonly used items for convenience
pub use inference::predictor::{ClassificationResult, FreshnessService, PredictionResponse};
pub use labels::{Category, CategoryMap};
pub use model::cnn::FreshnessClassifier;
pub use model::config::ModelVariant;
pub use model::loader::load_classifier;
pub use utils::error::{FoodCheckError, Result};

/// Input image side length expected by the classifier (square images)
pub const IMAGE_SIZE: usize = 224;

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
