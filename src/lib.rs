//! Separator ground-truth synthesis for table split-model training data.
//!
//! This crate converts annotated table-document images (table structure ground
//! truth plus OCR word boxes) into per-pixel row/column separator labels. For
//! each candidate boundary it finds the widest text-free gap straddling the
//! boundary, snaps boundaries that would cut through text onto a nearby
//! text-free line, and lets separators pass through merged cells whose text
//! would otherwise block them.
//!
//! # Example
//!
//! ```
//! use split_labels::domain::{BoundingBox, OcrWord, TableGrid};
//! use split_labels::labeler::SeparatorMaskSynthesizer;
//!
//! let words = vec![OcrWord::new("Total", BoundingBox::new(10, 10, 60, 24))];
//! let grid = TableGrid::new(vec![1, 80, 159], vec![1, 40, 119], vec![]);
//!
//! let synthesizer = SeparatorMaskSynthesizer::default();
//! let masks = synthesizer.synthesize(160, 120, &grid, &words).unwrap();
//! assert_eq!(masks.cols.len(), 160);
//! assert_eq!(masks.rows.len(), 120);
//! ```
//!
//! The [`dataset`] module wraps the synthesizer into a full sample pipeline:
//! record loading, optional classical augmentation, resizing, mask resampling,
//! and CHW normalization.

pub mod augment;
pub mod core;
pub mod dataset;
pub mod domain;
pub mod labeler;
pub mod processors;
pub mod utils;

pub use crate::core::{AugmentConfig, DatasetConfig, LabelError, LabelResult, SynthesisConfig};
pub use crate::dataset::{SplitDataset, SplitRecord, TrainingSample};
pub use crate::domain::{BoundingBox, OcrWord, TableCell, TableGrid};
pub use crate::labeler::SeparatorMaskSynthesizer;
pub use crate::processors::{Realignment, SeparatorMask, SeparatorMasks};
