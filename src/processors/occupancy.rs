//! Text-occupancy rasterization from OCR word boxes.
//!
//! The occupancy raster is a binary image marking every pixel covered by a
//! visible OCR word. Separator gaps are computed against its 1-D projections,
//! so a word box painted here protects its text from being crossed by a
//! separator line. Cells that merge grid slots get their region suppressed
//! again before projection (see [`crate::labeler`]).

use image::{GrayImage, Luma};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use super::gap::OccupancyProfile;
use crate::domain::{BoundingBox, OcrWord};

/// Binary H x W raster, 255 where qualifying OCR text occupies, 0 elsewhere.
///
/// Built fresh per record; the two per-axis variants start as clones of the
/// same base raster and diverge only through span suppression.
#[derive(Debug, Clone)]
pub struct TextOccupancy {
    raster: GrayImage,
}

impl TextOccupancy {
    /// Rasterizes the qualifying words of a record into a fresh occupancy mask.
    ///
    /// Words whose text is empty after punctuation stripping contribute
    /// nothing. Boxes are clipped to the raster; degenerate boxes are ignored.
    ///
    /// # Arguments
    ///
    /// * `width` - Raster width in pixels
    /// * `height` - Raster height in pixels
    /// * `words` - OCR words for the record
    pub fn from_words(width: u32, height: u32, words: &[OcrWord]) -> Self {
        let mut occupancy = Self {
            raster: GrayImage::new(width, height),
        };
        for word in words {
            if word.has_visible_text() {
                occupancy.fill(&word.bbox, 255);
            }
        }
        occupancy
    }

    /// Zeroes a rectangular region, removing its contribution to every later
    /// projection. Used for spanning-cell suppression; only removes marks,
    /// never adds them.
    pub fn suppress(&mut self, bbox: &BoundingBox) {
        self.fill(bbox, 0);
    }

    /// Projects the raster onto the y-axis: one flag per row, set when the row
    /// contains at least one occupied pixel.
    pub fn row_profile(&self) -> OccupancyProfile {
        let mut flags = vec![false; self.raster.height() as usize];
        for (_, y, pixel) in self.raster.enumerate_pixels() {
            if pixel.0[0] != 0 {
                flags[y as usize] = true;
            }
        }
        OccupancyProfile::from_flags(&flags)
    }

    /// Projects the raster onto the x-axis: one flag per column, set when the
    /// column contains at least one occupied pixel.
    pub fn column_profile(&self) -> OccupancyProfile {
        let mut flags = vec![false; self.raster.width() as usize];
        for (x, _, pixel) in self.raster.enumerate_pixels() {
            if pixel.0[0] != 0 {
                flags[x as usize] = true;
            }
        }
        OccupancyProfile::from_flags(&flags)
    }

    /// Read access for tests and debugging overlays.
    pub fn raster(&self) -> &GrayImage {
        &self.raster
    }

    fn fill(&mut self, bbox: &BoundingBox, value: u8) {
        if bbox.is_empty() {
            return;
        }
        let rect = Rect::at(bbox.x0, bbox.y0).of_size(bbox.width(), bbox.height());
        draw_filled_rect_mut(&mut self.raster, rect, Luma([value]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, x0: i32, y0: i32, x1: i32, y1: i32) -> OcrWord {
        OcrWord::new(text, BoundingBox::new(x0, y0, x1, y1))
    }

    #[test]
    fn test_word_boxes_fill_half_open_extent() {
        let occupancy = TextOccupancy::from_words(40, 40, &[word("Hi", 10, 10, 20, 15)]);
        let raster = occupancy.raster();
        assert_eq!(raster.get_pixel(10, 10).0[0], 255);
        assert_eq!(raster.get_pixel(19, 14).0[0], 255);
        // right/bottom edges are exclusive
        assert_eq!(raster.get_pixel(20, 10).0[0], 0);
        assert_eq!(raster.get_pixel(10, 15).0[0], 0);
    }

    #[test]
    fn test_punctuation_only_words_leave_no_mark() {
        let occupancy = TextOccupancy::from_words(40, 40, &[word("--", 5, 5, 30, 30)]);
        assert!(occupancy.raster().pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_boxes_clip_to_raster() {
        let occupancy = TextOccupancy::from_words(20, 20, &[word("x", -5, -5, 50, 50)]);
        assert!(occupancy.raster().pixels().all(|p| p.0[0] == 255));
    }

    #[test]
    fn test_suppress_erases_overlap() {
        let mut occupancy = TextOccupancy::from_words(40, 40, &[word("TOTAL", 10, 10, 30, 20)]);
        occupancy.suppress(&BoundingBox::new(0, 0, 40, 40));
        assert!(occupancy.raster().pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn test_profiles_reflect_projection() {
        let occupancy = TextOccupancy::from_words(10, 8, &[word("a", 3, 2, 6, 4)]);
        let cols = occupancy.column_profile();
        let rows = occupancy.row_profile();
        assert_eq!(cols.occupied(), vec![3, 4, 5]);
        assert_eq!(rows.occupied(), vec![2, 3]);
    }
}
