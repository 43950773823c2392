//! Image resizing helpers for the sample pipeline.

use image::imageops::{self, FilterType};
use image::RgbImage;

/// Target length, in pixels, for the resized raster's long side.
pub const RESIZE_TARGET: u32 = 600;

/// Resizes a record raster for training input.
///
/// With `fix_resize` the raster becomes an exact `RESIZE_TARGET` square,
/// distorting the aspect ratio. Otherwise the raster is scaled so its longer
/// side equals `RESIZE_TARGET`, preserving aspect ratio. Bilinear filtering in
/// both cases; label masks are resampled separately with nearest-neighbor so
/// they stay binary.
///
/// # Arguments
///
/// * `image` - The raster to resize
/// * `fix_resize` - Force the exact square output shape
pub fn resize_image(image: &RgbImage, fix_resize: bool) -> RgbImage {
    if fix_resize {
        return imageops::resize(image, RESIZE_TARGET, RESIZE_TARGET, FilterType::Triangle);
    }

    let (width, height) = image.dimensions();
    let long_side = width.max(height).max(1);
    let scale = RESIZE_TARGET as f64 / long_side as f64;
    let new_width = ((width as f64 * scale).round() as u32).max(1);
    let new_height = ((height as f64 * scale).round() as u32).max(1);
    imageops::resize(image, new_width, new_height, FilterType::Triangle)
}
