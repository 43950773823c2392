//! Annotation sidecar parsing.
//!
//! Each record stem has two JSON sidecars: the ground-truth table structure
//! under `gt/` and the OCR word list under `ocr/`. Parsing converts them into
//! domain types and appends the synthetic frame boundaries at 1 and
//! dimension-1 around the annotated separators.

use serde::Deserialize;

use crate::core::errors::LabelError;
use crate::domain::{BoundingBox, OcrWord, TableCell, TableGrid};

/// Top-level ground-truth document: must hold exactly one table.
#[derive(Debug, Deserialize)]
pub(crate) struct GroundTruthDoc {
    pub tables: Vec<TableAnnotation>,
}

/// One annotated table: inner separator coordinates plus the cell grid.
#[derive(Debug, Deserialize)]
pub(crate) struct TableAnnotation {
    pub rows: Vec<i32>,
    pub columns: Vec<i32>,
    #[serde(default)]
    pub cells: Vec<Vec<CellAnnotation>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CellAnnotation {
    pub bbox: [i32; 4],
    pub start_row: u32,
    pub end_row: u32,
    pub start_col: u32,
    pub end_col: u32,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WordAnnotation {
    pub text: String,
    pub bbox: [i32; 4],
}

fn bbox_from_corners(corners: [i32; 4]) -> BoundingBox {
    BoundingBox::new(corners[0], corners[1], corners[2], corners[3])
}

/// Parses a ground-truth sidecar into a [`TableGrid`] for a WxH raster.
///
/// The annotated coordinates are the inner separators; the frame boundaries at
/// 1 and dimension-1 are appended here so every candidate the synthesizer
/// should consider is present.
///
/// # Errors
///
/// Returns `InvalidInput` unless the document holds exactly one table, and
/// `Annotation` for malformed JSON.
pub(crate) fn parse_table(json: &str, width: u32, height: u32) -> Result<TableGrid, LabelError> {
    let doc: GroundTruthDoc = serde_json::from_str(json)?;
    let mut tables = doc.tables;
    if tables.len() != 1 {
        return Err(LabelError::invalid_input(format!(
            "record must contain exactly one table, got {}",
            tables.len()
        )));
    }
    let table = tables.remove(0);

    let mut columns = Vec::with_capacity(table.columns.len() + 2);
    columns.push(1);
    columns.extend(table.columns);
    columns.push(width as i32 - 1);

    let mut rows = Vec::with_capacity(table.rows.len() + 2);
    rows.push(1);
    rows.extend(table.rows);
    rows.push(height as i32 - 1);

    let cells = table
        .cells
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| TableCell {
                    bbox: bbox_from_corners(cell.bbox),
                    start_row: cell.start_row,
                    end_row: cell.end_row,
                    start_col: cell.start_col,
                    end_col: cell.end_col,
                })
                .collect()
        })
        .collect();

    let grid = TableGrid::new(columns, rows, cells);
    grid.validate()?;
    Ok(grid)
}

/// Parses an OCR sidecar into the record's word list.
pub(crate) fn parse_words(json: &str) -> Result<Vec<OcrWord>, LabelError> {
    let words: Vec<WordAnnotation> = serde_json::from_str(json)?;
    Ok(words
        .into_iter()
        .map(|w| OcrWord::new(w.text, bbox_from_corners(w.bbox)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const GT: &str = r#"{
        "tables": [{
            "rows": [120],
            "columns": [80, 160],
            "cells": [[
                { "bbox": [4, 4, 78, 118], "start_row": 0, "end_row": 0,
                  "start_col": 0, "end_col": 0 },
                { "bbox": [82, 4, 236, 118], "start_row": 0, "end_row": 0,
                  "start_col": 1, "end_col": 2 }
            ]]
        }]
    }"#;

    #[test]
    fn test_parse_table_appends_frame_boundaries() {
        let grid = parse_table(GT, 240, 200).unwrap();
        assert_eq!(grid.columns, vec![1, 80, 160, 239]);
        assert_eq!(grid.rows, vec![1, 120, 199]);

        let spanning = &grid.cells[0][1];
        assert!(spanning.spans_cols());
        assert!(!spanning.spans_rows());
    }

    #[test]
    fn test_parse_table_rejects_multiple_tables() {
        let json = r#"{"tables": [
            {"rows": [], "columns": [], "cells": []},
            {"rows": [], "columns": [], "cells": []}
        ]}"#;
        assert!(matches!(
            parse_table(json, 100, 100),
            Err(LabelError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_table_rejects_empty_document() {
        let json = r#"{"tables": []}"#;
        assert!(parse_table(json, 100, 100).is_err());
    }

    #[test]
    fn test_parse_words() {
        let json = r#"[
            { "text": "Hello", "bbox": [10, 10, 30, 20] },
            { "text": "-", "bbox": [40, 10, 44, 20] }
        ]"#;
        let words = parse_words(json).unwrap();
        assert_eq!(words.len(), 2);
        assert_eq!(words[0].text, "Hello");
        assert!(words[0].has_visible_text());
        assert!(!words[1].has_visible_text());
    }

    #[test]
    fn test_malformed_json_is_an_annotation_error() {
        assert!(matches!(
            parse_table("{", 100, 100),
            Err(LabelError::Annotation(_))
        ));
    }
}
