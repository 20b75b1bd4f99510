//! Error types shared across csvdesk crates

use thiserror::Error;

/// Result type alias for csvdesk operations
pub type Result<T> = std::result::Result<T, CsvDeskError>;

/// Main error type for csvdesk
#[derive(Error, Debug)]
pub enum CsvDeskError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Upload error: {0}")]
    Upload(String),
}

impl CsvDeskError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn upload(message: impl Into<String>) -> Self {
        Self::Upload(message.into())
    }
}
