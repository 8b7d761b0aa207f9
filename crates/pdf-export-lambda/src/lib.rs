//! PDF Export Lambda - S3-triggered PDF table extraction to Excel
//!
//! This crate converts PDF documents dropped into an S3 input folder into
//! Excel workbooks, one sheet per detected table.
//!
//! ## Architecture
//!
//! ```text
//! S3 ObjectCreated event → Lambda (this) → tabular-core (detect + build)
//!            ↑                                        ↓
//!  input-pdf-files/<name>.pdf              output-files/<name>.xlsx
//! ```
//!
//! The handler processes the records of one notification sequentially and
//! reports a single status for the whole batch; records outside the input
//! folder or without a `.pdf` extension are skipped silently. A failure on
//! any record aborts the records that follow it.
//!
//! ## Usage
//!
//! Deploy as an AWS Lambda function with an S3 ObjectCreated trigger on the
//! input folder. See `main.rs` for the handler wiring.

pub mod convert;
pub mod handler;
pub mod storage;

pub use convert::{convert_object, output_key, ConvertError, XLSX_CONTENT_TYPE};
pub use handler::{handle_event, response, HandlerResponse, S3Event, S3EventRecord};
pub use storage::{ObjectStore, S3Storage, StorageError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configuration for the export pipeline
#[derive(Debug, Clone)]
pub struct ConverterConfig {
    /// Bucket the S3 trigger is wired to
    pub bucket: String,

    /// Folder (key prefix) holding source PDFs
    pub input_folder: String,

    /// Folder (key prefix) receiving generated workbooks
    pub output_folder: String,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            bucket: "magnifact-pdf".to_string(),
            input_folder: "input-pdf-files".to_string(),
            output_folder: "output-files".to_string(),
        }
    }
}

impl ConverterConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        Self {
            bucket: std::env::var("BUCKET_NAME").unwrap_or_else(|_| "magnifact-pdf".to_string()),
            input_folder: std::env::var("INPUT_FOLDER_NAME")
                .unwrap_or_else(|_| "input-pdf-files".to_string()),
            output_folder: std::env::var("OUTPUT_FOLDER_NAME")
                .unwrap_or_else(|_| "output-files".to_string()),
        }
    }
}
