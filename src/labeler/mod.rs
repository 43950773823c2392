//! # Stage Definition: Separator Mask Synthesis
//!
//! This stage is considered "Done" when it fulfills the following contract:
//!
//! - **Inputs**: Image dimensions, a [`TableGrid`] whose boundary sets include
//!   the frame sentinels, and the record's OCR words.
//! - **Outputs**: [`SeparatorMasks`] holding one label vector per axis at full
//!   image resolution, 255 inside every resolved separator gap.
//! - **Logging**: Traces every realignment decision and the per-axis boundary
//!   counts under the `labeler` target.
//! - **Invariants**:
//!     - Boundaries at or outside the frame are never painted.
//!     - A painted gap never covers a projected-text coordinate that bounded it.
//!     - Text inside a spanning cell never blocks the separators crossing it.

use tracing::{debug, trace};

use crate::core::config::SynthesisConfig;
use crate::core::errors::LabelError;
use crate::domain::{OcrWord, TableGrid};
use crate::processors::gap::{GapResolver, OccupancyProfile, Realignment};
use crate::processors::mask::{SeparatorMask, SeparatorMasks};
use crate::processors::occupancy::TextOccupancy;

/// Synthesizes per-pixel separator ground truth for one annotated table record.
#[derive(Debug, Clone)]
pub struct SeparatorMaskSynthesizer {
    config: SynthesisConfig,
}

impl SeparatorMaskSynthesizer {
    /// Creates a synthesizer after validating the configuration.
    pub fn new(config: SynthesisConfig) -> Result<Self, LabelError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration.
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Computes the row and column separator masks for one record.
    ///
    /// Builds the text-occupancy raster from the OCR words, suppresses every
    /// spanning cell in the occupancy variant its crossing separators consult,
    /// then resolves and paints each candidate boundary.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for zero-sized rasters or non-ascending boundary
    /// sets. Degenerate occupancy around a single boundary is not an error;
    /// the resolver falls back per boundary (see [`Realignment`]).
    pub fn synthesize(
        &self,
        width: u32,
        height: u32,
        grid: &TableGrid,
        words: &[OcrWord],
    ) -> Result<SeparatorMasks, LabelError> {
        if width == 0 || height == 0 {
            return Err(LabelError::invalid_input(format!(
                "image raster must be non-empty, got {width}x{height}"
            )));
        }
        grid.validate()?;

        let base = TextOccupancy::from_words(width, height, words);
        let mut row_occupancy = base.clone();
        let mut col_occupancy = base;
        for cell in grid.iter_cells() {
            if cell.spans_rows() {
                row_occupancy.suppress(&cell.bbox);
            }
            if cell.spans_cols() {
                col_occupancy.suppress(&cell.bbox);
            }
        }

        let resolver = GapResolver::new(self.config.realign_limit);
        let rows = self.resolve_axis(
            "row",
            &resolver,
            &row_occupancy.row_profile(),
            &grid.rows,
            height as usize,
        );
        let cols = self.resolve_axis(
            "column",
            &resolver,
            &col_occupancy.column_profile(),
            &grid.columns,
            width as usize,
        );

        Ok(SeparatorMasks { rows, cols })
    }

    fn resolve_axis(
        &self,
        axis: &str,
        resolver: &GapResolver,
        profile: &OccupancyProfile,
        boundaries: &[i32],
        mask_len: usize,
    ) -> SeparatorMask {
        let mut mask = SeparatorMask::new(mask_len);
        let mut painted = 0usize;
        for &boundary in boundaries {
            match resolver.resolve(profile, boundary) {
                Some(gap) => {
                    match gap.realignment {
                        Realignment::Shifted(offset) => debug!(
                            target: "labeler",
                            axis,
                            boundary,
                            offset,
                            "Realigned separator onto a nearby text-free line"
                        ),
                        Realignment::NoFreeSlot => debug!(
                            target: "labeler",
                            axis,
                            boundary,
                            "No text-free line within reach; keeping degenerate strip"
                        ),
                        Realignment::MalformedProfile => debug!(
                            target: "labeler",
                            axis,
                            boundary,
                            "Axis has no text-free coordinates; keeping degenerate strip"
                        ),
                        Realignment::NotTriggered => {}
                    }
                    mask.paint(&gap, self.config.mask_value);
                    painted += 1;
                }
                None => trace!(
                    target: "labeler",
                    axis,
                    boundary,
                    "Skipped frame or degenerate frame-adjacent boundary"
                ),
            }
        }
        trace!(
            target: "labeler",
            axis,
            candidates = boundaries.len(),
            painted,
            "Resolved separator boundaries"
        );
        mask
    }
}

impl Default for SeparatorMaskSynthesizer {
    fn default() -> Self {
        Self {
            config: SynthesisConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BoundingBox, OcrWord, TableCell, TableGrid};

    fn word(text: &str, x0: i32, y0: i32, x1: i32, y1: i32) -> OcrWord {
        OcrWord::new(text, BoundingBox::new(x0, y0, x1, y1))
    }

    fn grid(columns: Vec<i32>, rows: Vec<i32>, cells: Vec<Vec<TableCell>>) -> TableGrid {
        TableGrid::new(columns, rows, cells)
    }

    fn painted(mask: &crate::processors::SeparatorMask) -> Vec<usize> {
        mask.as_slice()
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| (v > 0).then_some(i))
            .collect()
    }

    #[test]
    fn test_boundary_inside_word_realigns_past_the_word() {
        // 100x100 image, "Hello" occupying columns 10..30, column boundary at
        // 20 deep inside the word. Nearest free column above is 30, ten pixels
        // away, so the boundary snaps there and the strip starts at 30.
        let synthesizer = SeparatorMaskSynthesizer::default();
        let masks = synthesizer
            .synthesize(
                100,
                100,
                &grid(vec![20], vec![], vec![]),
                &[word("Hello", 10, 10, 30, 20)],
            )
            .unwrap();

        let cols = painted(&masks.cols);
        assert_eq!(cols.first(), Some(&30));
        assert_eq!(cols.last(), Some(&99));
        assert!(cols.iter().all(|&x| x >= 30));
    }

    #[test]
    fn test_boundary_with_no_text_paints_full_axis() {
        let synthesizer = SeparatorMaskSynthesizer::default();
        let masks = synthesizer
            .synthesize(100, 100, &grid(vec![40], vec![50], vec![]), &[])
            .unwrap();

        assert_eq!(painted(&masks.cols).len(), 100);
        assert_eq!(painted(&masks.rows).len(), 100);
    }

    #[test]
    fn test_frame_boundaries_are_never_painted() {
        let synthesizer = SeparatorMaskSynthesizer::default();
        let masks = synthesizer
            .synthesize(100, 100, &grid(vec![0, 100], vec![0, 100], Vec::new()), &[])
            .unwrap();

        assert!(painted(&masks.cols).is_empty());
        assert!(painted(&masks.rows).is_empty());
    }

    #[test]
    fn test_gap_respects_text_on_both_sides() {
        // Two words flank the boundary; the painted band must stay between them.
        let synthesizer = SeparatorMaskSynthesizer::default();
        let masks = synthesizer
            .synthesize(
                100,
                100,
                &grid(vec![50], vec![], vec![]),
                &[word("left", 10, 0, 40, 100), word("right", 60, 0, 90, 100)],
            )
            .unwrap();

        let cols = painted(&masks.cols);
        assert_eq!(cols.first(), Some(&40));
        assert_eq!(cols.last(), Some(&59));
    }

    #[test]
    fn test_column_span_cell_frees_its_column_boundaries() {
        // "TOTAL" fills a cell spanning columns 2..=4; a column boundary
        // strictly inside the span must see no occupancy from that text.
        let cell = TableCell::new(BoundingBox::new(20, 10, 80, 30), 0, 2).with_span(0, 4);
        let synthesizer = SeparatorMaskSynthesizer::default();
        let masks = synthesizer
            .synthesize(
                100,
                100,
                &grid(vec![50], vec![], vec![vec![cell]]),
                &[word("TOTAL", 25, 12, 75, 28)],
            )
            .unwrap();

        // Without the span the word would push the strip aside; with it the
        // whole axis is free.
        assert_eq!(painted(&masks.cols).len(), 100);
    }

    #[test]
    fn test_row_span_cell_does_not_affect_column_occupancy() {
        // A row-spanning cell keeps protecting its text from column separators.
        let cell = TableCell::new(BoundingBox::new(30, 10, 70, 30), 0, 2).with_span(3, 2);
        let synthesizer = SeparatorMaskSynthesizer::default();
        let masks = synthesizer
            .synthesize(
                100,
                100,
                &grid(vec![50], vec![50], vec![vec![cell]]),
                &[word("merged", 35, 12, 65, 28)],
            )
            .unwrap();

        // Column boundary at 50 sits inside the text, which still occupies
        // columns 35..65 for the column axis; the strip realigns right past it.
        let cols = painted(&masks.cols);
        assert_eq!(cols.first(), Some(&65));
        assert!(cols.iter().all(|&x| x >= 65));
        // Row boundary at 50 is below the suppressed cell; full height painted.
        assert_eq!(painted(&masks.rows).len(), 100);
    }

    #[test]
    fn test_zero_sized_raster_rejected() {
        let synthesizer = SeparatorMaskSynthesizer::default();
        assert!(synthesizer
            .synthesize(0, 100, &grid(vec![], vec![], vec![]), &[])
            .is_err());
    }

    #[test]
    fn test_unsorted_boundaries_rejected() {
        let synthesizer = SeparatorMaskSynthesizer::default();
        assert!(synthesizer
            .synthesize(100, 100, &grid(vec![50, 40], vec![], vec![]), &[])
            .is_err());
    }
}
