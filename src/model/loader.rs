//! Startup-time weight loading
//!
//! Builds the classifier for a variant and overwrites its parameters with a
//! persisted Burn record. A missing or corrupt record is a fatal error: the
//! caller must abort before accepting requests rather than serve with random
//! weights.

use std::path::{Path, PathBuf};

use burn::module::Module;
use burn::record::CompactRecorder;
use burn::tensor::backend::Backend;
use tracing::info;

use crate::model::cnn::{FreshnessClassifier, FreshnessClassifierConfig};
use crate::model::config::ModelVariant;
use crate::utils::error::{FoodCheckError, Result};

/// Load a ready-to-use classifier for the given variant.
///
/// The record at `path` must have been produced by a model with the same
/// architecture and a head sized to the variant's label set.
pub fn load_classifier<B: Backend>(
    path: impl AsRef<Path>,
    variant: &ModelVariant,
    device: &B::Device,
) -> Result<FreshnessClassifier<B>> {
    let path = path.as_ref();
    let config = FreshnessClassifierConfig::new().with_num_classes(variant.num_classes());

    let recorder = CompactRecorder::new();
    let model = FreshnessClassifier::new(&config, device)
        .load_file(path, &recorder, device)
        .map_err(|e| FoodCheckError::WeightLoad(PathBuf::from(path), format!("{:?}", e)))?;

    info!(
        "Loaded '{}' classifier weights from {:?} ({} classes)",
        variant.name,
        path,
        variant.num_classes()
    );

    Ok(model)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{default_device, DefaultBackend};

    #[test]
    fn test_missing_weights_is_weight_load_error() {
        let device = default_device();
        let variant = ModelVariant::fine();

        let err = load_classifier::<DefaultBackend>(
            "/nonexistent/foodcheck-model",
            &variant,
            &device,
        )
        .unwrap_err();

        assert!(matches!(err, FoodCheckError::WeightLoad(_, _)));
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let device = default_device();
        let variant = ModelVariant::coarse();
        let config = FreshnessClassifierConfig::new().with_num_classes(variant.num_classes());
        let model = FreshnessClassifier::<DefaultBackend>::new(&config, &device);

        let path = std::env::temp_dir().join("foodcheck_loader_test");
        model
            .clone()
            .save_file(&path, &CompactRecorder::new())
            .unwrap();

        let loaded = load_classifier::<DefaultBackend>(&path, &variant, &device).unwrap();
        assert_eq!(loaded.num_classes(), 2);

        std::fs::remove_file(path.with_extension("mpk")).ok();
    }
}
