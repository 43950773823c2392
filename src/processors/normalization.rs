//! Image normalization into model-ready CHW tensors.
//!
//! Normalization folds scale, mean, and standard deviation into per-channel
//! `alpha = scale / std` and `beta = -mean / std` factors, then emits a CHW
//! `Array3<f32>` for the downstream training consumer.

use image::RgbImage;
use ndarray::Array3;

use crate::core::errors::LabelError;

/// Per-channel normalizer producing CHW float tensors.
#[derive(Debug, Clone)]
pub struct NormalizeImage {
    /// Scaling factors for each channel (alpha = scale / std).
    alpha: [f32; 3],
    /// Offset values for each channel (beta = -mean / std).
    beta: [f32; 3],
}

impl NormalizeImage {
    /// Creates a normalizer from scale, per-channel mean, and per-channel std.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if scale or any standard deviation is not
    /// strictly positive.
    pub fn new(scale: f32, mean: [f32; 3], std: [f32; 3]) -> Result<Self, LabelError> {
        if scale <= 0.0 {
            return Err(LabelError::config_error_detailed(
                "normalization",
                format!("scale must be greater than 0, got {scale}"),
            ));
        }
        for (i, &s) in std.iter().enumerate() {
            if s <= 0.0 {
                return Err(LabelError::config_error_detailed(
                    "normalization",
                    format!("standard deviation at index {i} must be greater than 0, got {s}"),
                ));
            }
        }
        Ok(Self::folded(scale, mean, std))
    }

    /// ImageNet-style RGB normalizer with the standard mean/std statistics.
    pub fn imagenet() -> Self {
        Self::folded(
            1.0 / 255.0,
            [0.485, 0.456, 0.406],
            [0.229, 0.224, 0.225],
        )
    }

    fn folded(scale: f32, mean: [f32; 3], std: [f32; 3]) -> Self {
        let mut alpha = [0.0; 3];
        let mut beta = [0.0; 3];
        for c in 0..3 {
            alpha[c] = scale / std[c];
            beta[c] = -mean[c] / std[c];
        }
        Self { alpha, beta }
    }

    /// Normalizes an RGB image into a CHW tensor.
    pub fn to_chw(&self, image: &RgbImage) -> Array3<f32> {
        let (width, height) = image.dimensions();
        Array3::from_shape_fn((3, height as usize, width as usize), |(c, y, x)| {
            let value = image.get_pixel(x as u32, y as u32).0[c] as f32;
            value * self.alpha[c] + self.beta[c]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_identity_normalization_passes_values_through() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([40, 50, 60]));

        let norm = NormalizeImage::new(1.0, [0.0; 3], [1.0; 3]).unwrap();
        let tensor = norm.to_chw(&img);
        assert_eq!(tensor.shape(), &[3, 1, 2]);
        assert_eq!(tensor[[0, 0, 0]], 10.0);
        assert_eq!(tensor[[1, 0, 0]], 20.0);
        assert_eq!(tensor[[2, 0, 1]], 60.0);
    }

    #[test]
    fn test_mean_std_applied_per_channel() {
        let mut img = RgbImage::new(1, 1);
        img.put_pixel(0, 0, Rgb([11, 22, 33]));

        let norm = NormalizeImage::new(1.0, [1.0, 2.0, 3.0], [2.0, 4.0, 5.0]).unwrap();
        let tensor = norm.to_chw(&img);
        assert_eq!(tensor[[0, 0, 0]], 5.0);
        assert_eq!(tensor[[1, 0, 0]], 5.0);
        assert_eq!(tensor[[2, 0, 0]], 6.0);
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        assert!(NormalizeImage::new(0.0, [0.0; 3], [1.0; 3]).is_err());
        assert!(NormalizeImage::new(1.0, [0.0; 3], [1.0, 0.0, 1.0]).is_err());
    }
}
