//! Configuration types for label synthesis, augmentation, and dataset loading.
//!
//! Every config struct carries serde derives so it can be loaded from a JSON
//! config file, a `Default` impl holding the empirically tuned values, and a
//! `validate` method run at construction time.

use serde::{Deserialize, Serialize};

use crate::core::errors::LabelError;

/// Configuration for separator mask synthesis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SynthesisConfig {
    /// Maximum distance, in pixels, a degenerate boundary may be shifted to the
    /// nearest text-free coordinate (default: 20).
    pub realign_limit: u32,
    /// Value painted into the mask at separator positions (default: 255).
    pub mask_value: u8,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            realign_limit: 20,
            mask_value: 255,
        }
    }
}

impl SynthesisConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the realignment limit or mask value is zero.
    pub fn validate(&self) -> Result<(), LabelError> {
        if self.realign_limit == 0 {
            return Err(LabelError::config_error_detailed(
                "synthesis",
                "realign_limit must be greater than 0",
            ));
        }
        if self.mask_value == 0 {
            return Err(LabelError::config_error_detailed(
                "synthesis",
                "mask_value must be greater than 0 (masks binarize with a >0 threshold)",
            ));
        }
        Ok(())
    }
}

/// Configuration for classical (photometric + crop) augmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AugmentConfig {
    /// Probability of applying a random crop (default: 0.4).
    pub crop_probability: f64,
    /// Minimum crop extent as a fraction of each dimension (default: 0.6).
    pub min_crop_ratio: f64,
    /// Probability of applying brightness/contrast jitter (default: 0.4).
    pub jitter_probability: f64,
    /// Maximum absolute brightness shift, in intensity levels (default: 40).
    pub max_brightness_shift: i32,
    /// Maximum absolute contrast adjustment, in percent (default: 30).
    pub max_contrast_shift: f32,
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self {
            crop_probability: 0.4,
            min_crop_ratio: 0.6,
            jitter_probability: 0.4,
            max_brightness_shift: 40,
            max_contrast_shift: 30.0,
        }
    }
}

impl AugmentConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), LabelError> {
        for (name, p) in [
            ("crop_probability", self.crop_probability),
            ("jitter_probability", self.jitter_probability),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(LabelError::config_error_detailed(
                    "augmentation",
                    format!("{name} must lie in [0, 1], got {p}"),
                ));
            }
        }
        if !(0.0 < self.min_crop_ratio && self.min_crop_ratio <= 1.0) {
            return Err(LabelError::config_error_detailed(
                "augmentation",
                format!(
                    "min_crop_ratio must lie in (0, 1], got {}",
                    self.min_crop_ratio
                ),
            ));
        }
        Ok(())
    }
}

/// Configuration for the dataset sample pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Force an exact square resize instead of an aspect-preserving one.
    pub fix_resize: bool,
    /// Apply classical augmentation when sampling.
    pub classical_augment: bool,
    /// Synthesis parameters.
    pub synthesis: SynthesisConfig,
    /// Augmentation parameters.
    pub augment: AugmentConfig,
}

impl DatasetConfig {
    /// Validates the configuration and every nested section.
    pub fn validate(&self) -> Result<(), LabelError> {
        self.synthesis.validate()?;
        self.augment.validate()
    }
}
