//! Domain types for annotated table records.

pub mod table;

pub use table::{BoundingBox, OcrWord, TableCell, TableGrid};
