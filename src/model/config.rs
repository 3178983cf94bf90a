//! Model variant configuration
//!
//! The label set and the input-normalization contract are one versioned
//! configuration. The two published variants reflect the two trained weight
//! artifacts:
//!
//! - `coarse`: 2 classes, raw [0,1] inputs (the early prototype)
//! - `fine`: 6 classes, ImageNet-standardized inputs (the trained revision)
//!
//! Pairing a variant with a weight record trained under the other contract
//! does not fail at runtime; it silently degrades accuracy. Keeping the pair
//! in a single value is what prevents that drift.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::labels::{CategoryMap, COARSE_CLASS_NAMES, FINE_CLASS_NAMES};
use crate::utils::error::{FoodCheckError, Result};

/// A versioned pairing of label set and preprocessing contract
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelVariant {
    /// Variant name ("fine" or "coarse")
    pub name: String,

    /// Ordered class names; must match the trained output layer
    pub labels: Vec<String>,

    /// Whether inputs are standardized with the ImageNet statistics
    pub normalize: bool,
}

impl ModelVariant {
    /// Fine-grained variant: 6 classes, standardized inputs
    pub fn fine() -> Self {
        Self {
            name: "fine".to_string(),
            labels: FINE_CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
            normalize: true,
        }
    }

    /// Coarse variant: 2 classes, raw [0,1] inputs
    pub fn coarse() -> Self {
        Self {
            name: "coarse".to_string(),
            labels: COARSE_CLASS_NAMES.iter().map(|s| s.to_string()).collect(),
            normalize: false,
        }
    }

    /// Resolve a variant by name (CLI / server flag parsing)
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "fine" => Ok(Self::fine()),
            "coarse" => Ok(Self::coarse()),
            other => Err(FoodCheckError::Config(format!(
                "unknown model variant '{}' (expected 'fine' or 'coarse')",
                other
            ))),
        }
    }

    /// Number of output classes
    pub fn num_classes(&self) -> usize {
        self.labels.len()
    }

    /// Whether the aggregator is an identity pass-through (K=2)
    pub fn is_coarse(&self) -> bool {
        self.labels.len() == 2
    }

    /// Build the validated label-to-category mapping for this variant
    pub fn category_map(&self) -> Result<CategoryMap> {
        CategoryMap::new(&self.labels)
    }

    /// Validate the variant: non-empty, unique, categorizable labels
    pub fn validate(&self) -> Result<()> {
        self.category_map().map(|_| ())
    }

    /// Save the variant to a JSON file next to the weight artifact
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load a variant from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let variant: Self = serde_json::from_str(&json)?;
        variant.validate()?;
        Ok(variant)
    }
}
