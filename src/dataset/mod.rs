//! # Stage Definition: Dataset Loading & Sample Assembly
//!
//! This stage is considered "Done" when it fulfills the following contract:
//!
//! - **Inputs**: A dataset root with `images/`, `gt/`, and `ocr/` directories
//!   keyed by shared file stems, plus a [`DatasetConfig`].
//! - **Outputs**: [`SplitRecord`]s (decoded raster + parsed annotations) and
//!   fully assembled [`TrainingSample`]s.
//! - **Logging**: Record counts on open, per-record dimensions at debug, all
//!   under the `dataset` target.
//! - **Error Behavior**: Missing sidecars, undecodable images, malformed JSON,
//!   and multi-table annotations surface as [`LabelError`]s; nothing is
//!   silently skipped.
//! - **Invariants**:
//!     - Records are ordered by sorted stem, so indices are stable.
//!     - Label vectors always match the dimensions of the raster they ship
//!       with, through augmentation and resizing alike.

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbImage;
use ndarray::Array3;
use rand::Rng;
use tracing::{debug, info};

mod record;

use crate::augment::ClassicalAugmentor;
use crate::core::config::DatasetConfig;
use crate::core::errors::{LabelError, ProcessingStage};
use crate::domain::{OcrWord, TableGrid};
use crate::labeler::SeparatorMaskSynthesizer;
use crate::processors::mask::SeparatorMasks;
use crate::processors::normalization::NormalizeImage;
use crate::utils::image::resize_image;

/// A decoded record: raster plus parsed annotations.
#[derive(Debug, Clone)]
pub struct SplitRecord {
    /// File stem shared by the image and its sidecars.
    pub name: String,
    /// Decoded RGB raster.
    pub image: RgbImage,
    /// Ground-truth table structure, frame boundaries included.
    pub grid: TableGrid,
    /// OCR words for the record.
    pub words: Vec<OcrWord>,
}

/// A finalized training sample.
#[derive(Debug, Clone)]
pub struct TrainingSample {
    /// Normalized CHW image tensor.
    pub image: Array3<f32>,
    /// Binarized row separator labels, one per resized image row.
    pub row_label: Vec<u8>,
    /// Binarized column separator labels, one per resized image column.
    pub col_label: Vec<u8>,
    /// Raster width before resizing (after any augmentation crop).
    pub source_width: u32,
    /// Raster height before resizing (after any augmentation crop).
    pub source_height: u32,
    /// Record stem.
    pub name: String,
}

/// A directory-backed dataset of annotated table records.
#[derive(Debug)]
pub struct SplitDataset {
    gt_dir: PathBuf,
    ocr_dir: PathBuf,
    records: Vec<(String, PathBuf)>,
    config: DatasetConfig,
    synthesizer: SeparatorMaskSynthesizer,
    augmentor: ClassicalAugmentor,
    normalizer: NormalizeImage,
}

impl SplitDataset {
    /// Opens a dataset root and indexes its records by sorted stem.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for invalid configuration and `Io` when the
    /// `images/` directory cannot be listed.
    pub fn open(root: impl AsRef<Path>, config: DatasetConfig) -> Result<Self, LabelError> {
        config.validate()?;
        let root = root.as_ref();
        let images_dir = root.join("images");

        let mut records = Vec::new();
        for entry in fs::read_dir(&images_dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                records.push((stem.to_string(), path));
            }
        }
        records.sort();
        info!(
            target: "dataset",
            records = records.len(),
            root = %root.display(),
            "Opened dataset"
        );

        Ok(Self {
            gt_dir: root.join("gt"),
            ocr_dir: root.join("ocr"),
            records,
            synthesizer: SeparatorMaskSynthesizer::new(config.synthesis.clone())?,
            augmentor: ClassicalAugmentor::new(config.augment.clone())?,
            normalizer: NormalizeImage::imagenet(),
            config,
        })
    }

    /// Number of records in the dataset.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The sorted record stems.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.records.iter().map(|(name, _)| name.as_str())
    }

    /// Loads and parses one record.
    pub fn load_record(&self, index: usize) -> Result<SplitRecord, LabelError> {
        let (name, image_path) = self.records.get(index).ok_or_else(|| {
            LabelError::invalid_input(format!(
                "record index {index} out of range for {} records",
                self.records.len()
            ))
        })?;

        let image = image::open(image_path)
            .map_err(|e| {
                LabelError::processing(
                    ProcessingStage::RecordLoading,
                    format!("decoding {}", image_path.display()),
                    e,
                )
            })?
            .to_rgb8();
        let (width, height) = image.dimensions();
        let gt_json = fs::read_to_string(self.gt_dir.join(format!("{name}.json")))?;
        let ocr_json = fs::read_to_string(self.ocr_dir.join(format!("{name}.json")))?;
        let grid = record::parse_table(&gt_json, width, height)?;
        let words = record::parse_words(&ocr_json)?;
        debug!(
            target: "dataset",
            name,
            width,
            height,
            words = words.len(),
            "Loaded record"
        );

        Ok(SplitRecord {
            name: name.clone(),
            image,
            grid,
            words,
        })
    }

    /// Synthesizes the full-resolution separator masks for a record.
    pub fn synthesize(&self, record: &SplitRecord) -> Result<SeparatorMasks, LabelError> {
        let (width, height) = record.image.dimensions();
        self.synthesizer
            .synthesize(width, height, &record.grid, &record.words)
    }

    /// Assembles a finalized training sample for one record.
    ///
    /// Runs the full pipeline: load, synthesize, optional classical
    /// augmentation, resize, mask resampling, binarization, normalization.
    /// The random source is only consulted when augmentation is enabled.
    pub fn sample<R: Rng>(&self, index: usize, rng: &mut R) -> Result<TrainingSample, LabelError> {
        let record = self.load_record(index)?;
        let masks = self.synthesize(&record)?;

        let (image, masks) = if self.config.classical_augment {
            self.augmentor.apply(rng, record.image, masks)
        } else {
            (record.image, masks)
        };
        let (source_width, source_height) = image.dimensions();

        let resized = resize_image(&image, self.config.fix_resize);
        let (out_width, out_height) = resized.dimensions();
        let row_label = masks.rows.resample(out_height).binarized();
        let col_label = masks.cols.resample(out_width).binarized();

        Ok(TrainingSample {
            image: self.normalizer.to_chw(&resized),
            row_label,
            col_label,
            source_width,
            source_height,
            name: record.name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    /// Writes a minimal one-record dataset under a unique temp directory.
    fn write_fixture(tag: &str) -> PathBuf {
        let root = std::env::temp_dir().join(format!(
            "split-labels-dataset-{tag}-{}",
            std::process::id()
        ));
        for dir in ["images", "gt", "ocr"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }

        let image = RgbImage::from_pixel(200, 100, image::Rgb([255, 255, 255]));
        image.save(root.join("images/sample.png")).unwrap();

        fs::write(
            root.join("gt/sample.json"),
            r#"{"tables": [{"rows": [50], "columns": [100], "cells": []}]}"#,
        )
        .unwrap();
        fs::write(
            root.join("ocr/sample.json"),
            r#"[{"text": "cell", "bbox": [10, 10, 40, 30]}]"#,
        )
        .unwrap();
        root
    }

    #[test]
    fn test_open_indexes_sorted_stems() {
        let root = write_fixture("open");
        let dataset = SplitDataset::open(&root, DatasetConfig::default()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.names().collect::<Vec<_>>(), vec!["sample"]);
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_sample_pipeline_shapes_line_up() {
        let root = write_fixture("sample");
        let dataset = SplitDataset::open(&root, DatasetConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        let sample = dataset.sample(0, &mut rng).unwrap();

        // 200x100 source scales to 600x300.
        assert_eq!(sample.image.shape(), &[3, 300, 600]);
        assert_eq!(sample.row_label.len(), 300);
        assert_eq!(sample.col_label.len(), 600);
        assert!(sample.row_label.iter().all(|&v| v <= 1));
        assert!(sample.col_label.iter().all(|&v| v <= 1));
        assert_eq!((sample.source_width, sample.source_height), (200, 100));
        fs::remove_dir_all(root).unwrap();
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        let root = write_fixture("range");
        let dataset = SplitDataset::open(&root, DatasetConfig::default()).unwrap();
        assert!(dataset.load_record(5).is_err());
        fs::remove_dir_all(root).unwrap();
    }
}
