//! Error Handling Module
//!
//! Defines custom error types for the FoodCheck library.
//! Uses thiserror for ergonomic error definitions.
//!
//! Decode and shape errors are request-scoped; weight-load and configuration
//! errors are fatal at startup and must prevent the service from serving.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for FoodCheck operations
#[derive(Error, Debug)]
pub enum FoodCheckError {
    /// Uploaded bytes are empty, malformed, or an unsupported image format
    #[error("Failed to decode image: {0}")]
    Decode(String),

    /// Preprocessing produced a tensor that does not match the classifier input
    #[error("Input shape mismatch: expected {expected:?}, got {got} values")]
    ShapeMismatch {
        /// Expected tensor shape [batch, channels, height, width]
        expected: [usize; 4],
        /// Number of values actually produced
        got: usize,
    },

    /// Model weights missing or corrupt at startup
    #[error("Failed to load model weights from '{0}': {1}")]
    WeightLoad(PathBuf, String),

    /// Invalid label set or model variant
    #[error("Configuration error: {0}")]
    Config(String),

    /// Backend evaluation or tensor extraction failure
    #[error("Inference error: {0}")]
    Inference(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<image::ImageError> for FoodCheckError {
    fn from(err: image::ImageError) -> Self {
        FoodCheckError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for FoodCheckError {
    fn from(err: serde_json::Error) -> Self {
        FoodCheckError::Serialization(err.to_string())
    }
}

/// Convenience Result type for FoodCheck operations
pub type Result<T> = std::result::Result<T, FoodCheckError>;

impl FoodCheckError {
    /// Whether the error was caused by the client's upload rather than the
    /// service itself. The serving layer maps this to a 4xx status.
    pub fn is_client_error(&self) -> bool {
        matches!(self, FoodCheckError::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FoodCheckError::Decode("not an image".to_string());
        assert_eq!(err.to_string(), "Failed to decode image: not an image");
    }

    #[test]
    fn test_shape_mismatch_display() {
        let err = FoodCheckError::ShapeMismatch {
            expected: [1, 3, 224, 224],
            got: 42,
        };
        assert!(err.to_string().contains("224"));
        assert!(err.to_string().contains("42"));
    }

    #[test]
    fn test_image_error_conversion() {
        let img_err = image::load_from_memory(&[]).unwrap_err();
        let err: FoodCheckError = img_err.into();
        assert!(matches!(err, FoodCheckError::Decode(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: FoodCheckError = io_err.into();
        assert!(matches!(err, FoodCheckError::Io(_)));
        assert!(!err.is_client_error());
    }
}
