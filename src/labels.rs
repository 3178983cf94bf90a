//! Class taxonomy for produce freshness classification
//!
//! This module defines:
//! - The fine-grained and coarse label sets, in the exact order the
//!   classifier's output layer was trained with
//! - The coarse `Category` (fresh/rotten) type
//! - `CategoryMap`, a validated label-to-category partition resolved once at
//!   startup instead of substring checks scattered through the hot path
//!
//! Label order is significant: index `i` of the probability distribution
//! refers to the `i`-th entry of the label set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::utils::error::{FoodCheckError, Result};

/// Fine-grained class names (6 classes), trained output-layer order
pub const FINE_CLASS_NAMES: [&str; 6] = [
    "freshapples",
    "freshbanana",
    "freshoranges",
    "rottenapples",
    "rottenbanana",
    "rottenoranges",
];

/// Coarse class names (2 classes), legacy prototype order
pub const COARSE_CLASS_NAMES: [&str; 2] = ["fresh", "rotten"];

/// The coarse freshness category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Fresh,
    Rotten,
}

impl Category {
    /// String form used in JSON responses and score maps
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Fresh => "fresh",
            Category::Rotten => "rotten",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated mapping from label index to coarse category.
///
/// Built once when the service is constructed. Every label must contain
/// exactly one of the "fresh"/"rotten" markers; anything else is rejected up
/// front so aggregation can never silently drop probability mass.
#[derive(Debug, Clone)]
pub struct CategoryMap {
    categories: Vec<Category>,
}

impl CategoryMap {
    /// Build the mapping from an ordered label set.
    ///
    /// Fails with a `Config` error on duplicate labels or on a label that
    /// matches neither or both categories.
    pub fn new(labels: &[String]) -> Result<Self> {
        if labels.is_empty() {
            return Err(FoodCheckError::Config("label set is empty".to_string()));
        }

        for (i, label) in labels.iter().enumerate() {
            if labels[..i].contains(label) {
                return Err(FoodCheckError::Config(format!(
                    "duplicate label '{}' in label set",
                    label
                )));
            }
        }

        let categories = labels
            .iter()
            .map(|label| {
                let fresh = label.contains("fresh");
                let rotten = label.contains("rotten");
                match (fresh, rotten) {
                    (true, false) => Ok(Category::Fresh),
                    (false, true) => Ok(Category::Rotten),
                    _ => Err(FoodCheckError::Config(format!(
                        "label '{}' does not belong to exactly one category",
                        label
                    ))),
                }
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { categories })
    }

    /// Coarse category of the label at `index`
    pub fn category_of(&self, index: usize) -> Option<Category> {
        self.categories.get(index).copied()
    }

    /// Number of labels in the mapping
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Whether the mapping is empty (never true for a constructed map)
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Iterate over (index, category) pairs
    pub fn iter(&self) -> impl Iterator<Item = (usize, Category)> + '_ {
        self.categories.iter().copied().enumerate()
    }
}

/// Get the fine-grained class name for a given label index
pub fn fine_class_name(label: usize) -> Option<&'static str> {
    FINE_CLASS_NAMES.get(label).copied()
}

/// Get the label index for a given fine-grained class name
pub fn fine_class_index(name: &str) -> Option<usize> {
    FINE_CLASS_NAMES.iter().position(|&n| n == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn owned(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_fine_class_lookup() {
        assert_eq!(fine_class_name(0), Some("freshapples"));
        assert_eq!(fine_class_name(5), Some("rottenoranges"));
        assert_eq!(fine_class_name(6), None);
        assert_eq!(fine_class_index("freshbanana"), Some(1));
        assert_eq!(fine_class_index("mysteryfruit"), None);
    }

    #[test]
    fn test_category_map_fine() {
        let map = CategoryMap::new(&owned(&FINE_CLASS_NAMES)).unwrap();
        assert_eq!(map.len(), 6);
        assert_eq!(map.category_of(0), Some(Category::Fresh));
        assert_eq!(map.category_of(2), Some(Category::Fresh));
        assert_eq!(map.category_of(3), Some(Category::Rotten));
        assert_eq!(map.category_of(5), Some(Category::Rotten));
        assert_eq!(map.category_of(6), None);
    }

    #[test]
    fn test_category_map_coarse() {
        let map = CategoryMap::new(&owned(&COARSE_CLASS_NAMES)).unwrap();
        assert_eq!(map.category_of(0), Some(Category::Fresh));
        assert_eq!(map.category_of(1), Some(Category::Rotten));
    }

    #[test]
    fn test_category_map_rejects_unmatched_label() {
        let err = CategoryMap::new(&owned(&["freshapples", "staleapples"])).unwrap_err();
        assert!(err.to_string().contains("staleapples"));
    }

    #[test]
    fn test_category_map_rejects_ambiguous_label() {
        assert!(CategoryMap::new(&owned(&["freshrotten"])).is_err());
    }

    #[test]
    fn test_category_map_rejects_duplicates() {
        assert!(CategoryMap::new(&owned(&["freshapples", "freshapples"])).is_err());
    }

    #[test]
    fn test_category_map_rejects_empty() {
        assert!(CategoryMap::new(&[]).is_err());
    }

    #[test]
    fn test_category_serialization() {
        assert_eq!(serde_json::to_string(&Category::Fresh).unwrap(), "\"fresh\"");
        assert_eq!(Category::Rotten.to_string(), "rotten");
    }
}
