use thiserror::Error;

#[derive(Error, Debug)]
pub enum TabularError {
    #[error("Failed to parse PDF: {0}")]
    InvalidDocument(String),

    #[error("Workbook serialization failed: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
