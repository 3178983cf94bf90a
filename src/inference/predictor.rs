//! Prediction service and result formatting
//!
//! `FreshnessService` owns the loaded classifier and its variant. It is
//! constructed once at startup, validated, and shared read-only across
//! requests; there is no global model state. Each call runs the full
//! pipeline for one upload and returns an immutable result.

use burn::module::Module;
use burn::tensor::backend::Backend;
use image::DynamicImage;
use serde::Serialize;

use crate::inference::preprocess::{decode_image, preprocess_image, to_input_tensor};
use crate::inference::score::{argmax, softmax};
use crate::labels::{Category, CategoryMap};
use crate::model::cnn::FreshnessClassifier;
use crate::model::config::ModelVariant;
use crate::utils::error::{FoodCheckError, Result};

/// Full-precision classification outcome for a single image.
///
/// All comparisons that decide `label` and `category` happen on these
/// values; rounding is applied only when formatting the response.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationResult {
    /// Most probable fine-grained class (argmax over the distribution)
    pub label: String,
    /// Probability of that class
    pub class_confidence: f32,
    /// Winning coarse category
    pub category: Category,
    /// Aggregated probability of the winning category
    pub category_confidence: f32,
    /// Total probability mass of the fresh group
    pub fresh_score: f32,
    /// Total probability mass of the rotten group
    pub rotten_score: f32,
    /// Full probability distribution, aligned with the label set
    pub probabilities: Vec<f32>,
}

/// Per-category aggregated scores as reported to clients
#[derive(Debug, Clone, Serialize)]
pub struct CategoryScores {
    pub fresh: f64,
    pub rotten: f64,
}

/// JSON response shape, one variant per model variant
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    /// Fine-grained verdict: category plus the winning class
    Fine {
        category: Category,
        confidence: f64,
        label: String,
        class_confidence: f64,
        score: CategoryScores,
    },
    /// Coarse verdict: the predicted binary label and its probability
    Coarse { label: Category, confidence: f64 },
}

/// Round a reported value to 4 decimal digits. Display-only; never feed the
/// result back into a comparison.
fn round4(value: f32) -> f64 {
    (value as f64 * 10_000.0).round() / 10_000.0
}

impl ClassificationResult {
    /// Format the result for the response body, rounding all reported floats
    /// to 4 decimals.
    pub fn to_response(&self, coarse: bool) -> PredictionResponse {
        if coarse {
            PredictionResponse::Coarse {
                label: self.category,
                confidence: round4(self.category_confidence),
            }
        } else {
            PredictionResponse::Fine {
                category: self.category,
                confidence: round4(self.category_confidence),
                label: self.label.clone(),
                class_confidence: round4(self.class_confidence),
                score: CategoryScores {
                    fresh: round4(self.fresh_score),
                    rotten: round4(self.rotten_score),
                },
            }
        }
    }
}

/// Aggregate a probability distribution into a classification result.
///
/// The coarse category is decided by group sums over the validated category
/// map; the top label is the independent argmax of the distribution. The two
/// can disagree (a fresh class may rank first while the rotten group holds
/// more total mass) and are deliberately not forced consistent.
///
/// An exact `fresh_score == rotten_score` tie resolves to rotten, the
/// conservative default.
pub fn aggregate(
    probabilities: &[f32],
    labels: &[String],
    categories: &CategoryMap,
) -> Result<ClassificationResult> {
    if probabilities.len() != categories.len() || probabilities.len() != labels.len() {
        return Err(FoodCheckError::Inference(format!(
            "distribution length {} does not match label set length {}",
            probabilities.len(),
            labels.len()
        )));
    }

    let (top_index, class_confidence) = argmax(probabilities).ok_or_else(|| {
        FoodCheckError::Inference("empty probability distribution".to_string())
    })?;

    let mut fresh_score = 0.0f32;
    let mut rotten_score = 0.0f32;
    for (i, category) in categories.iter() {
        match category {
            Category::Fresh => fresh_score += probabilities[i],
            Category::Rotten => rotten_score += probabilities[i],
        }
    }

    let category = if fresh_score > rotten_score {
        Category::Fresh
    } else {
        Category::Rotten
    };

    Ok(ClassificationResult {
        label: labels[top_index].clone(),
        class_confidence,
        category,
        category_confidence: fresh_score.max(rotten_score),
        fresh_score,
        rotten_score,
        probabilities: probabilities.to_vec(),
    })
}

/// The prediction service: a loaded classifier, its variant, and the
/// validated category map, immutable after construction.
#[derive(Debug)]
pub struct FreshnessService<B: Backend> {
    model: FreshnessClassifier<B>,
    variant: ModelVariant,
    categories: CategoryMap,
    device: B::Device,
}

impl<B: Backend> FreshnessService<B> {
    /// Build the service, validating that the model head matches the variant
    /// and that every label maps to exactly one category.
    pub fn new(model: FreshnessClassifier<B>, variant: ModelVariant) -> Result<Self> {
        if model.num_classes() != variant.num_classes() {
            return Err(FoodCheckError::Config(format!(
                "model has {} outputs but variant '{}' defines {} labels",
                model.num_classes(),
                variant.name,
                variant.num_classes()
            )));
        }

        let categories = variant.category_map()?;
        let device = model.devices().first().cloned().unwrap_or_default();

        Ok(Self {
            model,
            variant,
            categories,
            device,
        })
    }

    /// The variant this service was built with
    pub fn variant(&self) -> &ModelVariant {
        &self.variant
    }

    /// Classify the raw bytes of one uploaded image.
    pub fn classify_bytes(&self, bytes: &[u8]) -> Result<ClassificationResult> {
        let image = decode_image(bytes)?;
        self.classify_image(&image)
    }

    /// Classify a decoded image.
    pub fn classify_image(&self, image: &DynamicImage) -> Result<ClassificationResult> {
        let pixels = preprocess_image(image, self.variant.normalize);
        let input = to_input_tensor::<B>(pixels, &self.device)?;

        let logits = self
            .model
            .forward(input)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| FoodCheckError::Inference(format!("{:?}", e)))?;

        let probabilities = softmax(&logits);
        aggregate(&probabilities, &self.variant.labels, &self.categories)
    }

    /// Classify uploaded bytes and format the response for this variant.
    pub fn predict(&self, bytes: &[u8]) -> Result<PredictionResponse> {
        let result = self.classify_bytes(bytes)?;
        Ok(result.to_response(self.variant.is_coarse()))
    }
}
