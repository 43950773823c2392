//! Table ground-truth and OCR domain types.
//!
//! This module defines the annotated inputs to separator mask synthesis: the
//! table grid (boundary coordinates plus a cell grid with span indices) and the
//! OCR word list.

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::core::errors::LabelError;

/// An axis-aligned rectangle with half-open pixel extent `[x0, x1) x [y0, y1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Left edge (inclusive).
    pub x0: i32,
    /// Top edge (inclusive).
    pub y0: i32,
    /// Right edge (exclusive).
    pub x1: i32,
    /// Bottom edge (exclusive).
    pub y1: i32,
}

impl BoundingBox {
    /// Creates a bounding box from corner coordinates.
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Width of the box, zero when degenerate.
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    /// Height of the box, zero when degenerate.
    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }

    /// Returns true when the box covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.x1 <= self.x0 || self.y1 <= self.y0
    }

    /// Returns a new box translated by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x0 + dx, self.y0 + dy, self.x1 + dx, self.y1 + dy)
    }
}

/// A single table cell with its pixel extent and grid span.
///
/// Span indices are inclusive slot positions: a cell with `start_row == end_row`
/// occupies a single row slot, while `start_row != end_row` marks a vertical
/// merge that row separators pass through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableCell {
    /// Pixel extent of the cell.
    pub bbox: BoundingBox,
    /// First row slot the cell occupies.
    pub start_row: u32,
    /// Last row slot the cell occupies.
    pub end_row: u32,
    /// First column slot the cell occupies.
    pub start_col: u32,
    /// Last column slot the cell occupies.
    pub end_col: u32,
}

impl TableCell {
    /// Creates a cell occupying a single grid slot.
    pub fn new(bbox: BoundingBox, row: u32, col: u32) -> Self {
        Self {
            bbox,
            start_row: row,
            end_row: row,
            start_col: col,
            end_col: col,
        }
    }

    /// Sets the row and column spans from inclusive end slots.
    pub fn with_span(mut self, end_row: u32, end_col: u32) -> Self {
        self.end_row = end_row;
        self.end_col = end_col;
        self
    }

    /// Returns true when the cell merges multiple row slots.
    pub fn spans_rows(&self) -> bool {
        self.start_row != self.end_row
    }

    /// Returns true when the cell merges multiple column slots.
    pub fn spans_cols(&self) -> bool {
        self.start_col != self.end_col
    }
}

/// Ground-truth table structure for one record.
///
/// `columns` and `rows` hold every candidate separator coordinate in ascending
/// order, including the synthetic frame boundaries at 1 and dimension-1 that
/// the record loader appends around the annotated separators.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableGrid {
    /// Candidate column separator x-coordinates.
    pub columns: Vec<i32>,
    /// Candidate row separator y-coordinates.
    pub rows: Vec<i32>,
    /// Cell grid, outer index by row.
    pub cells: Vec<Vec<TableCell>>,
}

impl TableGrid {
    /// Creates a grid from boundary coordinates and a cell grid.
    pub fn new(columns: Vec<i32>, rows: Vec<i32>, cells: Vec<Vec<TableCell>>) -> Self {
        Self {
            columns,
            rows,
            cells,
        }
    }

    /// Iterates over every cell in the grid.
    pub fn iter_cells(&self) -> impl Iterator<Item = &TableCell> {
        self.cells.iter().flatten()
    }

    /// Validates that both boundary sets are strictly ascending.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` naming the offending axis and coordinate pair.
    pub fn validate(&self) -> Result<(), LabelError> {
        for (axis, coords) in [("columns", &self.columns), ("rows", &self.rows)] {
            if let Some((a, b)) = coords.iter().tuple_windows().find(|(a, b)| a >= b) {
                return Err(LabelError::invalid_input(format!(
                    "{axis} boundaries must be strictly ascending, got {a} before {b}"
                )));
            }
        }
        Ok(())
    }
}

/// A single OCR word with its recognized text and pixel extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrWord {
    /// Recognized text content.
    pub text: String,
    /// Pixel extent of the word.
    pub bbox: BoundingBox,
}

impl OcrWord {
    /// Creates a word from text and its bounding box.
    pub fn new(text: impl Into<String>, bbox: BoundingBox) -> Self {
        Self {
            text: text.into(),
            bbox,
        }
    }

    /// Returns true when the text still contains something after stripping
    /// ASCII punctuation and surrounding whitespace.
    ///
    /// Punctuation-only tokens are typically separator glyphs or noise and must
    /// not block a separator line.
    pub fn has_visible_text(&self) -> bool {
        self.text
            .chars()
            .filter(|c| !c.is_ascii_punctuation())
            .any(|c| !c.is_whitespace())
    }
}
