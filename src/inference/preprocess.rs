//! Image decoding and preprocessing
//!
//! Deterministic transformation from uploaded bytes to the classifier input
//! tensor. The resize policy and the normalization constants must match the
//! transform used when the weights were trained; a mismatch does not fail at
//! runtime, it silently degrades accuracy. No augmentation happens here.

use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::{imageops::FilterType, DynamicImage};

use crate::utils::error::{FoodCheckError, Result};
use crate::IMAGE_SIZE;

/// ImageNet normalization mean values (RGB)
pub const IMAGENET_MEAN: [f32; 3] = [0.485, 0.456, 0.406];
/// ImageNet normalization std values (RGB)
pub const IMAGENET_STD: [f32; 3] = [0.229, 0.224, 0.225];

/// Decode uploaded bytes into an RGB image.
///
/// Accepts any format the `image` codec recognizes (JPEG, PNG, ...).
/// Empty or malformed bytes yield a `Decode` error, which the serving layer
/// reports as a client error.
pub fn decode_image(bytes: &[u8]) -> Result<DynamicImage> {
    if bytes.is_empty() {
        return Err(FoodCheckError::Decode("empty upload".to_string()));
    }
    let image = image::load_from_memory(bytes)?;
    Ok(image)
}

/// Preprocess a decoded image into a flat CHW float vector.
///
/// Steps, in order:
/// 1. Resize to 224x224 with bilinear filtering; aspect ratio is not
///    preserved, stretching is accepted.
/// 2. Scale u8 pixel values to [0.0, 1.0] floats in CHW layout.
/// 3. If `normalize`, subtract the per-channel ImageNet mean and divide by
///    the per-channel std. The coarse variant skips this step; its weights
///    were trained on raw [0,1] inputs.
pub fn preprocess_image(image: &DynamicImage, normalize: bool) -> Vec<f32> {
    let rgb = image
        .resize_exact(IMAGE_SIZE as u32, IMAGE_SIZE as u32, FilterType::Triangle)
        .to_rgb8();

    let num_pixels = IMAGE_SIZE * IMAGE_SIZE;
    let mut pixels = vec![0.0f32; 3 * num_pixels];

    for (i, pixel) in rgb.pixels().enumerate() {
        for c in 0..3 {
            let mut value = pixel[c] as f32 / 255.0;
            if normalize {
                value = (value - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
            }
            // CHW layout: all R values, then all G values, then all B values
            pixels[c * num_pixels + i] = value;
        }
    }

    pixels
}

/// Build the `[1, 3, 224, 224]` input tensor from preprocessed pixels.
///
/// The length check is defensive: a mismatch means the preprocessing and the
/// classifier contract have drifted, which is a configuration bug, not a bad
/// upload.
pub fn to_input_tensor<B: Backend>(pixels: Vec<f32>, device: &B::Device) -> Result<Tensor<B, 4>> {
    let expected = [1, 3, IMAGE_SIZE, IMAGE_SIZE];
    let expected_len = expected.iter().product::<usize>();

    if pixels.len() != expected_len {
        return Err(FoodCheckError::ShapeMismatch {
            expected,
            got: pixels.len(),
        });
    }

    Ok(Tensor::from_floats(
        TensorData::new(pixels, expected),
        device,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{default_device, DefaultBackend};
    use image::{ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    /// Encode a solid-color image to PNG bytes
    fn png_bytes(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
        let img = RgbImage::from_pixel(width, height, Rgb(color));
        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_valid_png() {
        let bytes = png_bytes(50, 80, [10, 20, 30]);
        let image = decode_image(&bytes).unwrap();
        assert_eq!(image.width(), 50);
        assert_eq!(image.height(), 80);
    }

    #[test]
    fn test_decode_empty_bytes_fails() {
        let err = decode_image(&[]).unwrap_err();
        assert!(matches!(err, FoodCheckError::Decode(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_decode_garbage_bytes_fails() {
        let err = decode_image(b"definitely not an image").unwrap_err();
        assert!(matches!(err, FoodCheckError::Decode(_)));
    }

    #[test]
    fn test_preprocess_output_layout() {
        let bytes = png_bytes(100, 60, [255, 0, 0]);
        let image = decode_image(&bytes).unwrap();
        let pixels = preprocess_image(&image, false);

        assert_eq!(pixels.len(), 3 * IMAGE_SIZE * IMAGE_SIZE);

        let num_pixels = IMAGE_SIZE * IMAGE_SIZE;
        // Solid red: R plane ~1.0, G and B planes ~0.0
        assert!((pixels[0] - 1.0).abs() < 1e-6);
        assert!(pixels[num_pixels].abs() < 1e-6);
        assert!(pixels[2 * num_pixels].abs() < 1e-6);
    }

    #[test]
    fn test_preprocess_scales_to_unit_range() {
        let bytes = png_bytes(32, 32, [128, 64, 255]);
        let image = decode_image(&bytes).unwrap();
        let pixels = preprocess_image(&image, false);

        assert!(pixels.iter().all(|&v| (0.0..=1.0).contains(&v)));
    }

    #[test]
    fn test_preprocess_standardization() {
        let bytes = png_bytes(32, 32, [255, 255, 255]);
        let image = decode_image(&bytes).unwrap();
        let pixels = preprocess_image(&image, true);

        let num_pixels = IMAGE_SIZE * IMAGE_SIZE;
        for c in 0..3 {
            let expected = (1.0 - IMAGENET_MEAN[c]) / IMAGENET_STD[c];
            assert!((pixels[c * num_pixels] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn test_standardization_changes_values_not_shape() {
        let bytes = png_bytes(48, 48, [100, 150, 200]);
        let image = decode_image(&bytes).unwrap();

        let raw = preprocess_image(&image, false);
        let standardized = preprocess_image(&image, true);

        // Same shape either way; feeding the wrong contract to a model is a
        // silent accuracy problem, never a runtime error.
        assert_eq!(raw.len(), standardized.len());
        assert_ne!(raw, standardized);
    }

    #[test]
    fn test_to_input_tensor_shape() {
        let device = default_device();
        let pixels = vec![0.5f32; 3 * IMAGE_SIZE * IMAGE_SIZE];
        let tensor = to_input_tensor::<DefaultBackend>(pixels, &device).unwrap();
        assert_eq!(tensor.dims(), [1, 3, IMAGE_SIZE, IMAGE_SIZE]);
    }

    #[test]
    fn test_to_input_tensor_rejects_wrong_length() {
        let device = default_device();
        let err = to_input_tensor::<DefaultBackend>(vec![0.0f32; 10], &device).unwrap_err();
        assert!(matches!(err, FoodCheckError::ShapeMismatch { got: 10, .. }));
    }

    #[test]
    fn test_preprocess_is_deterministic() {
        let bytes = png_bytes(90, 45, [33, 99, 166]);
        let image = decode_image(&bytes).unwrap();

        assert_eq!(
            preprocess_image(&image, true),
            preprocess_image(&image, true)
        );
    }
}
