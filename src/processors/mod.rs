//! Raster and mask processing for separator label synthesis.
//!
//! This module holds the building blocks of the synthesis pipeline:
//! - Text-occupancy rasterization from OCR boxes
//! - 1-D gap resolution with bounded realignment
//! - Separator mask painting and finalization
//! - Image normalization for training tensors

pub mod gap;
pub mod mask;
pub mod normalization;
pub mod occupancy;

pub use gap::{GapResolver, OccupancyProfile, Realignment, ResolvedGap};
pub use mask::{SeparatorMask, SeparatorMasks};
pub use normalization::NormalizeImage;
pub use occupancy::TextOccupancy;
