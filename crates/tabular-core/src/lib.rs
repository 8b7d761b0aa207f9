//! PDF table extraction and Excel workbook generation
//!
//! This crate provides the document-processing half of the PDF-to-Excel
//! export pipeline:
//! - `extract`: walk a PDF's pages in order and collect every detected
//!   table into a uniform textual grid (`TableSet`)
//! - `workbook`: serialize a `TableSet` to an in-memory `.xlsx` workbook,
//!   one sheet per table
//!
//! Table detection sits behind the `TableDetector` trait so the pipeline
//! can run against a canned detector in tests.

pub mod error;
pub mod extract;
pub mod types;
pub mod workbook;

pub use error::TabularError;
pub use extract::{PdfTableDetector, TableDetector};
pub use types::{Table, TableSet, NO_TABLES_MESSAGE};
pub use workbook::build_workbook;
