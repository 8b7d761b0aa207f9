//! AWS Lambda entry point for the PDF table export pipeline
//!
//! Triggered by S3 ObjectCreated notifications on the input folder; each
//! qualifying PDF is converted to an Excel workbook in the output folder
//! of the same bucket.
//!
//! ## Deployment
//!
//! ```bash
//! # Install cargo-lambda
//! cargo install cargo-lambda
//!
//! # Build for ARM64 (30% cheaper)
//! cargo lambda build --release --arm64
//!
//! # Deploy
//! cargo lambda deploy --iam-role arn:aws:iam::ACCOUNT:role/pdf-export-lambda
//! ```

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use pdf_export_lambda::{handle_event, ConverterConfig, HandlerResponse, S3Event, S3Storage};
use std::sync::{Arc, OnceLock};
use tabular_core::PdfTableDetector;
use tokio::sync::OnceCell;
use tracing::info;

/// Global S3 storage handle (initialized once)
static STORAGE: OnceCell<Arc<S3Storage>> = OnceCell::const_new();

/// Configuration snapshot, read once per execution context
static CONFIG: OnceLock<ConverterConfig> = OnceLock::new();

/// Get or initialize the storage handle
async fn get_storage() -> Arc<S3Storage> {
    STORAGE
        .get_or_init(|| async { Arc::new(S3Storage::new().await) })
        .await
        .clone()
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing with CloudWatch-optimized settings
    // See: https://docs.aws.amazon.com/lambda/latest/dg/rust-logging.html
    tracing_subscriber::fmt()
        .json()
        .with_ansi(false) // CloudWatch doesn't support ANSI colors
        .with_current_span(false) // Reduce duplicate info in logs
        .without_time() // CloudWatch adds ingestion time
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("pdf_export_lambda=info".parse().unwrap()),
        )
        .init();

    info!(
        version = pdf_export_lambda::VERSION,
        "Starting PDF export Lambda"
    );

    run(service_fn(handler)).await
}

/// Main Lambda handler
async fn handler(event: LambdaEvent<S3Event>) -> Result<HandlerResponse, Error> {
    let storage = get_storage().await;
    let config = CONFIG.get_or_init(ConverterConfig::from_env);
    let detector = PdfTableDetector::new();

    Ok(handle_event(storage.as_ref(), &detector, config, event.payload).await)
}
