//! Classical (photometric and crop) augmentation.
//!
//! Applied after mask synthesis and before resizing: a random crop shrinks the
//! image and both label vectors consistently, and brightness/contrast jitter
//! perturbs the raster alone. Every draw flows through the caller-supplied
//! random source, so a seeded generator reproduces a sample exactly.

use image::imageops;
use image::RgbImage;
use rand::Rng;
use tracing::debug;

use crate::core::config::AugmentConfig;
use crate::core::errors::LabelError;
use crate::processors::mask::SeparatorMasks;

/// Probability-gated crop and jitter augmentor.
#[derive(Debug, Clone)]
pub struct ClassicalAugmentor {
    config: AugmentConfig,
}

impl ClassicalAugmentor {
    /// Creates an augmentor after validating the configuration.
    pub fn new(config: AugmentConfig) -> Result<Self, LabelError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Applies the configured augmentations to an image and its labels.
    ///
    /// # Arguments
    ///
    /// * `rng` - Random source driving every probability gate and draw
    /// * `image` - Record raster, consumed and replaced
    /// * `masks` - Separator labels at the raster's resolution
    pub fn apply<R: Rng>(
        &self,
        rng: &mut R,
        image: RgbImage,
        masks: SeparatorMasks,
    ) -> (RgbImage, SeparatorMasks) {
        let (image, masks) = if rng.gen_bool(self.config.crop_probability) {
            self.crop(rng, image, masks)
        } else {
            (image, masks)
        };

        let image = if rng.gen_bool(self.config.jitter_probability) {
            self.jitter(rng, image)
        } else {
            image
        };

        (image, masks)
    }

    /// Crops a random window of at least `min_crop_ratio` of each dimension,
    /// cutting the label vectors to the same window.
    fn crop<R: Rng>(
        &self,
        rng: &mut R,
        image: RgbImage,
        masks: SeparatorMasks,
    ) -> (RgbImage, SeparatorMasks) {
        let (width, height) = image.dimensions();
        if width < 2 || height < 2 {
            return (image, masks);
        }

        let min_width = ((width as f64 * self.config.min_crop_ratio) as u32).max(1);
        let min_height = ((height as f64 * self.config.min_crop_ratio) as u32).max(1);
        let crop_width = rng.gen_range(min_width..=width);
        let crop_height = rng.gen_range(min_height..=height);
        let x = rng.gen_range(0..=(width - crop_width));
        let y = rng.gen_range(0..=(height - crop_height));
        debug!(
            target: "augment",
            x, y, crop_width, crop_height,
            "Cropping record"
        );

        let cropped = imageops::crop_imm(&image, x, y, crop_width, crop_height).to_image();
        let masks = SeparatorMasks {
            rows: masks.rows.crop(y as usize, crop_height as usize),
            cols: masks.cols.crop(x as usize, crop_width as usize),
        };
        (cropped, masks)
    }

    /// Applies brightness and contrast jitter within the configured ranges.
    fn jitter<R: Rng>(&self, rng: &mut R, image: RgbImage) -> RgbImage {
        let shift = self.config.max_brightness_shift;
        let brightness = if shift > 0 {
            rng.gen_range(-shift..=shift)
        } else {
            0
        };
        let contrast = if self.config.max_contrast_shift > 0.0 {
            rng.gen_range(-self.config.max_contrast_shift..=self.config.max_contrast_shift)
        } else {
            0.0
        };
        debug!(target: "augment", brightness, contrast, "Jittering record");

        let image = imageops::brighten(&image, brightness);
        imageops::contrast(&image, contrast)
    }
}
