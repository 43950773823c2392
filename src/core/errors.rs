//! Core error types for the label-synthesis pipeline.
//!
//! This module defines the fundamental error types used throughout the crate,
//! including the main LabelError enum and the ProcessingStage enum that tags
//! where in the pipeline a failure occurred.

use thiserror::Error;

/// Enum representing different stages of the label-synthesis pipeline.
///
/// Used to identify which stage an error occurred in, providing context for
/// debugging and error handling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ProcessingStage {
    /// Error occurred while building the text-occupancy raster.
    Occupancy,
    /// Error occurred while resolving separator gaps.
    GapResolution,
    /// Error occurred while painting or finalizing masks.
    MaskPainting,
    /// Error occurred during image or mask resizing.
    Resize,
    /// Error occurred during image normalization.
    Normalization,
    /// Error occurred during classical augmentation.
    Augmentation,
    /// Error occurred while loading a dataset record.
    RecordLoading,
    /// Generic processing error.
    Generic,
}

impl std::fmt::Display for ProcessingStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingStage::Occupancy => write!(f, "occupancy rasterization"),
            ProcessingStage::GapResolution => write!(f, "gap resolution"),
            ProcessingStage::MaskPainting => write!(f, "mask painting"),
            ProcessingStage::Resize => write!(f, "resize"),
            ProcessingStage::Normalization => write!(f, "normalization"),
            ProcessingStage::Augmentation => write!(f, "augmentation"),
            ProcessingStage::RecordLoading => write!(f, "record loading"),
            ProcessingStage::Generic => write!(f, "processing"),
        }
    }
}

/// Enum representing the errors that can occur while synthesizing labels.
///
/// Covers record loading (image decode, annotation parsing), configuration
/// validation, and pipeline processing failures.
#[derive(Error, Debug)]
pub enum LabelError {
    /// Error occurred while loading an image.
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// Error occurred during processing.
    #[error("{kind} failed: {context}")]
    Processing {
        /// The stage of processing where the error occurred.
        kind: ProcessingStage,
        /// Additional context about the error.
        context: String,
        /// The underlying error that caused this error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Error indicating invalid input.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// A message describing the invalid input.
        message: String,
    },

    /// Error indicating a configuration problem.
    #[error("configuration: {message}")]
    ConfigError {
        /// A message describing the configuration error.
        message: String,
    },

    /// Error while parsing an annotation sidecar.
    #[error("annotation parse")]
    Annotation(#[from] serde_json::Error),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for LabelError {
    /// Converts an image::ImageError to LabelError::ImageLoad.
    fn from(error: image::ImageError) -> Self {
        Self::ImageLoad(error)
    }
}

impl LabelError {
    /// Creates an invalid-input error from a formatted message.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Creates a configuration error with enhanced context and details.
    ///
    /// # Arguments
    ///
    /// * `context` - High-level description of what was being configured
    /// * `details` - Specific details about what went wrong
    pub fn config_error_detailed(context: impl Into<String>, details: impl Into<String>) -> Self {
        Self::ConfigError {
            message: format!("{}: {}", context.into(), details.into()),
        }
    }

    /// Wraps an error that occurred in a specific pipeline stage.
    pub fn processing(
        kind: ProcessingStage,
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Processing {
            kind,
            context: context.into(),
            source: Box::new(source),
        }
    }
}

/// Convenience result alias used across the crate.
pub type LabelResult<T> = Result<T, LabelError>;
