//! S3 event entry point: record filtering, dispatch, and the response
//! contract.

use serde::{Deserialize, Serialize};
use tabular_core::TableDetector;
use tracing::{error, info, warn};

use crate::convert::{convert_object, ConvertError};
use crate::storage::ObjectStore;
use crate::ConverterConfig;

/// S3 notification payload (the subset this handler reads)
#[derive(Debug, Clone, Deserialize)]
pub struct S3Event {
    #[serde(rename = "Records", default)]
    pub records: Vec<S3EventRecord>,
}

/// One record of an S3 notification
#[derive(Debug, Clone, Deserialize)]
pub struct S3EventRecord {
    pub s3: S3Entity,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Entity {
    pub bucket: S3Bucket,
    pub object: S3ObjectRef,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3Bucket {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct S3ObjectRef {
    pub key: String,
}

/// The handler's reply contract: a status code plus a JSON body holding a
/// single message field. The only observable output of the entry point.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerResponse {
    pub status_code: u16,
    pub body: String,
}

/// Build a response in the handler's reply contract.
pub fn response(status_code: u16, message: &str) -> HandlerResponse {
    HandlerResponse {
        status_code,
        body: serde_json::json!({ "message": message }).to_string(),
    }
}

/// Object keys arrive percent-encoded with `+` for spaces; decode before
/// filtering or touching storage.
fn decode_key(key: &str) -> String {
    let spaced = key.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Process one S3 notification: convert every qualifying record,
/// sequentially.
///
/// Errors never escape; they are rendered into the response contract. A
/// failure on one record aborts the records that follow it and reports a
/// single failure for the batch.
pub async fn handle_event(
    storage: &dyn ObjectStore,
    detector: &dyn TableDetector,
    config: &ConverterConfig,
    event: S3Event,
) -> HandlerResponse {
    info!(records = event.records.len(), "Received event");

    if event.records.is_empty() {
        warn!("No records found in the event");
        return response(400, "No records found in event");
    }

    let input_prefix = format!("{}/", config.input_folder);

    for record in &event.records {
        let bucket = &record.s3.bucket.name;
        let key = decode_key(&record.s3.object.key);

        info!(bucket = %bucket, key = %key, "Processing file");

        if !key.starts_with(&input_prefix) {
            info!(key = %key, "File is not in the input folder, skipping");
            continue;
        }

        if !key.to_lowercase().ends_with(".pdf") {
            info!(key = %key, "File is not a PDF file, skipping");
            continue;
        }

        if let Err(e) = convert_object(storage, detector, config, bucket, &key).await {
            return match e {
                ConvertError::Storage(_) => {
                    error!(error = %e, "AWS error while processing PDF");
                    response(500, &format!("AWS Error: {e}"))
                }
                _ => {
                    error!(error = %e, "Error processing PDF");
                    response(500, &format!("Error: {e}"))
                }
            };
        }
    }

    response(200, "PDF processing completed successfully")
}
