//! 1-D separator label masks and their finalization.
//!
//! A mask holds one u8 per pixel along an axis, 255 inside every resolved
//! separator gap and 0 elsewhere. Finalization binarizes to {0, 1} and, when
//! the image raster gets resized, resamples the mask to the new length with
//! nearest-neighbor interpolation so labels stay aligned.

use image::imageops::{self, FilterType};
use image::{GrayImage, Luma};

use super::gap::ResolvedGap;

/// A 1-D separator label vector over one image axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorMask {
    data: Vec<u8>,
}

impl SeparatorMask {
    /// Creates an all-zero mask of the given length.
    pub fn new(len: usize) -> Self {
        Self {
            data: vec![0; len],
        }
    }

    /// Wraps raw label data.
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Length of the mask in pixels.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true when the mask covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Read access to the raw label values.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Paints a resolved gap into the mask.
    pub fn paint(&mut self, gap: &ResolvedGap, value: u8) {
        let end = gap.end.min(self.data.len());
        let start = gap.start.min(end);
        for slot in &mut self.data[start..end] {
            *slot = value;
        }
    }

    /// Extracts the sub-mask `[start, start + len)`, clamped to the mask.
    pub fn crop(&self, start: usize, len: usize) -> Self {
        let start = start.min(self.data.len());
        let end = (start + len).min(self.data.len());
        Self {
            data: self.data[start..end].to_vec(),
        }
    }

    /// Resamples the mask to `target_len` with nearest-neighbor interpolation.
    ///
    /// The mask is treated as a one-pixel-tall grayscale strip so the resize
    /// matches the raster resize applied to the image it labels.
    pub fn resample(&self, target_len: u32) -> Self {
        if self.data.is_empty() || target_len == 0 {
            return Self::new(target_len as usize);
        }
        let strip = self.to_row_image();
        let resized = imageops::resize(&strip, target_len, 1, FilterType::Nearest);
        Self {
            data: resized.into_raw(),
        }
    }

    /// Collapses the mask to {0, 1}: any value above zero becomes 1.
    /// Idempotent.
    pub fn binarized(&self) -> Vec<u8> {
        self.data.iter().map(|&v| u8::from(v > 0)).collect()
    }

    /// Renders the mask as a 1-pixel-tall horizontal strip.
    pub fn to_row_image(&self) -> GrayImage {
        GrayImage::from_fn(self.data.len() as u32, 1, |x, _| Luma([self.data[x as usize]]))
    }

    /// Renders the mask as a 1-pixel-wide vertical strip.
    pub fn to_column_image(&self) -> GrayImage {
        GrayImage::from_fn(1, self.data.len() as u32, |_, y| Luma([self.data[y as usize]]))
    }
}

/// The row/column label pair produced for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeparatorMasks {
    /// Row separator labels, one per image row (length H).
    pub rows: SeparatorMask,
    /// Column separator labels, one per image column (length W).
    pub cols: SeparatorMask,
}

impl SeparatorMasks {
    /// Creates an all-zero label pair for an H x W image.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            rows: SeparatorMask::new(height as usize),
            cols: SeparatorMask::new(width as usize),
        }
    }
}
