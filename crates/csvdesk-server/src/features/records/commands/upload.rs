//! Upload CSV command
//!
//! Spools the uploaded part, reads it into built records, and persists the whole batch. The
//! spooled file is removed only when the batch commits.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::{
    db::SharedRecordStore,
    ingest::{self, LoadError, ParseError},
    storage::{is_csv, UploadSpool},
};

/// A file part received from the client
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Command to ingest one uploaded CSV file
///
/// `file` is `None` when the request carried no `file` part.
#[derive(Debug, Clone, Default)]
pub struct UploadCsvCommand {
    pub file: Option<UploadedFile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadCsvResponse {
    pub message: String,
    #[serde(rename = "recordCount")]
    pub record_count: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadCsvError {
    #[error("No file uploaded")]
    NoFile,

    #[error("Only CSV files are allowed")]
    NotCsv,

    #[error("Error storing uploaded file: {0}")]
    Spool(#[from] csvdesk_common::CsvDeskError),

    #[error("Error parsing CSV file")]
    Parse(#[from] ParseError),

    #[error("Error saving records: {0}")]
    Store(#[from] LoadError),
}

impl Request<Result<UploadCsvResponse, UploadCsvError>> for UploadCsvCommand {}

impl crate::cqrs::middleware::Command for UploadCsvCommand {}

impl UploadCsvCommand {
    pub fn new(file: UploadedFile) -> Self {
        Self { file: Some(file) }
    }

    /// The file part, if present and acceptable as CSV
    pub fn validate(&self) -> Result<&UploadedFile, UploadCsvError> {
        let file = self.file.as_ref().ok_or(UploadCsvError::NoFile)?;

        if !is_csv(file.file_name.as_deref(), file.content_type.as_deref()) {
            return Err(UploadCsvError::NotCsv);
        }

        Ok(file)
    }
}

#[tracing::instrument(
    skip(store, spool, command),
    fields(
        file_name = ?command.file.as_ref().and_then(|f| f.file_name.as_deref()),
        size = command.file.as_ref().map(|f| f.bytes.len())
    )
)]
pub async fn handle(
    store: SharedRecordStore,
    spool: UploadSpool,
    command: UploadCsvCommand,
) -> Result<UploadCsvResponse, UploadCsvError> {
    let file = command.validate()?;

    let upload = spool.persist(file.file_name.as_deref(), &file.bytes).await?;

    let records = ingest::read_records(&upload.path).await.map_err(|e| {
        tracing::error!(path = %upload.path.display(), error = %e, "CSV parse failed");
        e
    })?;

    let accepted = ingest::load(store.as_ref(), &upload, &records).await?;

    tracing::info!(
        original_name = %upload.original_name,
        record_count = accepted,
        "CSV uploaded"
    );

    Ok(UploadCsvResponse {
        message: "CSV uploaded successfully".to_string(),
        record_count: accepted,
    })
}
