//! Conversion orchestrator: fetch a PDF, extract its tables, write the
//! Excel rendition back.

use tabular_core::{build_workbook, Table, TableDetector};
use tracing::{info, instrument, warn};

use crate::storage::ObjectStore;
use crate::ConverterConfig;

/// Content type of generated workbooks
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Extension appended to derived output keys
const XLSX_EXTENSION: &str = "xlsx";

/// Download a PDF from storage, extract its tables, and upload the Excel
/// rendition to the configured output folder in the same bucket.
///
/// A document without detectable tables still produces a workbook: a single
/// sheet with a single placeholder cell.
#[instrument(skip(storage, detector, config), fields(bucket = %bucket, key = %key))]
pub async fn convert_object(
    storage: &dyn ObjectStore,
    detector: &dyn TableDetector,
    config: &ConverterConfig,
    bucket: &str,
    key: &str,
) -> Result<(), ConvertError> {
    info!("Downloading PDF from S3");
    let document = storage.get(bucket, key).await?;

    info!("Extracting tables from PDF");
    let mut tables = detector.detect_tables(&document)?;

    if tables.is_empty() {
        warn!("No tables found in PDF");
        tables = vec![Table::placeholder()];
    }

    info!(tables = tables.len(), "Creating Excel workbook");
    let workbook = build_workbook(&tables)?;

    let output_key = output_key(&config.output_folder, key);

    info!(output_key = %output_key, "Uploading Excel to S3");
    storage
        .put(bucket, &output_key, workbook, XLSX_CONTENT_TYPE)
        .await?;

    info!(output_key = %output_key, "Successfully processed PDF");
    Ok(())
}

/// Derive the workbook key for an input key: base filename, extension
/// swapped for `.xlsx`, re-rooted under the output folder regardless of the
/// input's subfolder depth.
pub fn output_key(output_folder: &str, input_key: &str) -> String {
    let filename = input_key.rsplit('/').next().unwrap_or(input_key);
    // A dotfile like `.pdf` has no stem to strip, same as os.path.splitext
    let stem = match filename.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => filename,
    };
    format!("{output_folder}/{stem}.{XLSX_EXTENSION}")
}

/// Failures of a single object conversion
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    #[error(transparent)]
    Storage(#[from] crate::storage::StorageError),

    #[error(transparent)]
    Tabular(#[from] tabular_core::TabularError),
}
