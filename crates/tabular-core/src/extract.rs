//! Table detection over raw PDF bytes.

use std::io::Write;

use pdfplumber::{Pdf, TableSettings};
use tracing::debug;

use crate::error::TabularError;
use crate::types::{Table, TableSet};

/// Narrow boundary over the concrete detection library, so callers depend
/// on the `TableSet` contract rather than on pdfplumber itself.
pub trait TableDetector: Send + Sync {
    /// Detect every table in `document`, in page order and, within a page,
    /// in detection order.
    fn detect_tables(&self, document: &[u8]) -> Result<TableSet, TabularError>;
}

/// pdfplumber-backed detector with default table settings.
#[derive(Default)]
pub struct PdfTableDetector {
    settings: TableSettings,
}

impl PdfTableDetector {
    pub fn new() -> Self {
        Self {
            settings: TableSettings::default(),
        }
    }
}

impl TableDetector for PdfTableDetector {
    fn detect_tables(&self, document: &[u8]) -> Result<TableSet, TabularError> {
        // pdfplumber opens documents by path; spool the bytes to a temp
        // file that lives for the duration of this call.
        let mut spool = tempfile::NamedTempFile::new()?;
        spool.write_all(document)?;
        spool.flush()?;

        let path = spool.path().to_string_lossy().into_owned();
        let pdf = Pdf::open_file(&path, None)
            .map_err(|e| TabularError::InvalidDocument(e.to_string()))?;

        let mut tables = TableSet::new();

        for page_result in pdf.pages_iter() {
            let page = page_result.map_err(|e| TabularError::InvalidDocument(e.to_string()))?;
            let page_tables = page.find_tables(&self.settings);
            debug!(
                page = page.page_number(),
                tables = page_tables.len(),
                "Scanned page"
            );

            for table in &page_tables {
                let rows: Vec<Vec<String>> = table
                    .rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|cell| cell_to_string(cell.text.as_deref()))
                            .collect()
                    })
                    .collect();

                if rows.is_empty() {
                    continue;
                }
                tables.push(Table::new(rows));
            }
        }

        debug!(count = tables.len(), "Extracted tables from document");
        Ok(tables)
    }
}

/// Normalize one detected cell to its textual form. A cell with no detected
/// text becomes the empty string, never a null marker.
fn cell_to_string(value: Option<&str>) -> String {
    match value {
        Some(text) => text.to_string(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{Dictionary, Document, Object};
    use pretty_assertions::assert_eq;

    /// Helper to create a valid PDF with N blank pages
    fn blank_pdf(num_pages: u32) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");

        let pages_id = doc.new_object_id();
        let catalog_id = doc.new_object_id();

        let mut page_ids = Vec::new();

        for _ in 0..num_pages {
            let page_id = doc.new_object_id();
            let content_id = doc.new_object_id();

            doc.objects.insert(
                content_id,
                Object::Stream(lopdf::Stream::new(Dictionary::new(), Vec::new())),
            );

            let mut page_dict = Dictionary::new();
            page_dict.set("Type", Object::Name(b"Page".to_vec()));
            page_dict.set("Parent", Object::Reference(pages_id));
            page_dict.set("Contents", Object::Reference(content_id));

            // 8.5 x 11 inches at 72 DPI
            let media_box = vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(612),
                Object::Integer(792),
            ];
            page_dict.set("MediaBox", Object::Array(media_box));

            doc.objects.insert(page_id, Object::Dictionary(page_dict));
            page_ids.push(Object::Reference(page_id));
        }

        let mut pages_dict = Dictionary::new();
        pages_dict.set("Type", Object::Name(b"Pages".to_vec()));
        pages_dict.set("Count", Object::Integer(num_pages as i64));
        pages_dict.set("Kids", Object::Array(page_ids));
        doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

        let mut catalog_dict = Dictionary::new();
        catalog_dict.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog_dict.set("Pages", Object::Reference(pages_id));
        doc.objects
            .insert(catalog_id, Object::Dictionary(catalog_dict));

        doc.trailer.set("Root", Object::Reference(catalog_id));

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).unwrap();
        buffer
    }

    #[test]
    fn test_cell_to_string_absent_becomes_empty() {
        assert_eq!(cell_to_string(None), "");
    }

    #[test]
    fn test_cell_to_string_preserves_text() {
        assert_eq!(cell_to_string(Some("Revenue")), "Revenue");
        assert_eq!(cell_to_string(Some("")), "");
    }

    #[test]
    fn test_blank_pages_yield_no_tables() {
        let detector = PdfTableDetector::new();
        let tables = detector.detect_tables(&blank_pdf(3)).unwrap();
        assert_eq!(tables, TableSet::new());
    }

    #[test]
    fn test_garbage_bytes_fail_as_invalid_document() {
        let detector = PdfTableDetector::new();
        let result = detector.detect_tables(b"this is not a pdf");
        assert!(matches!(result, Err(TabularError::InvalidDocument(_))));
    }
}
