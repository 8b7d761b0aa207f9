//! Core table data model.

/// Message written to the single placeholder cell when a document yields no
/// tables.
pub const NO_TABLES_MESSAGE: &str = "No tables found in the PDF file";

/// A grid of text cells detected within one page of a source document.
///
/// Rows are not required to share a length; the detector's ragged output is
/// preserved as-is. Every cell is a `String` - absent cells are normalized
/// to the empty string during extraction.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Table {
    /// Cells in detection order: rows outer, columns inner.
    pub rows: Vec<Vec<String>>,
}

/// All tables detected across a document, in page order and, within a page,
/// in detection order.
pub type TableSet = Vec<Table>;

impl Table {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// The synthetic single-cell table substituted when detection finds
    /// nothing, so the output workbook always has at least one sheet.
    pub fn placeholder() -> Self {
        Self {
            rows: vec![vec![NO_TABLES_MESSAGE.to_string()]],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
