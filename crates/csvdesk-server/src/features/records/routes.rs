//! Record API routes
//!
//! Wires the record commands and queries to axum handlers.
//!
//! # Route Structure
//!
//! - `POST /api/csv/upload` - Ingest a CSV file sent as multipart field `file`
//! - `GET /api/csv/records` - List records with `page`, `limit`, and `search`
//! - `DELETE /api/csv/records` - Delete every record
//! - `GET /api/csv/columns` - The exposed record columns
//!
//! Every failure answers with a JSON `{"error": "..."}` body.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use super::{
    commands::{
        ClearRecordsCommand, ClearRecordsError, UploadCsvCommand, UploadCsvError, UploadedFile,
    },
    queries::{ListColumnsQuery, ListRecordsError, ListRecordsQuery},
};
use crate::{api::response::ErrorResponse, features::FeatureState};

/// Multipart field carrying the uploaded file
pub const FILE_FIELD: &str = "file";

pub fn records_routes() -> Router<FeatureState> {
    Router::new()
        .route("/upload", post(upload_csv))
        .route("/records", get(list_records).delete(clear_records))
        .route("/columns", get(list_columns))
}

// ============================================================================
// Command Handlers (Write Operations)
// ============================================================================

/// Ingest an uploaded CSV file
///
/// # Response
///
/// - `200 OK` - `{"message": "CSV uploaded successfully", "recordCount": n}`
/// - `400 Bad Request` - No `file` part, or the part is not CSV
/// - `500 Internal Server Error` - Parse or store failure; the spooled file is kept
#[tracing::instrument(skip(state, multipart))]
async fn upload_csv(
    State(state): State<FeatureState>,
    multipart: Result<Multipart, axum::extract::multipart::MultipartRejection>,
) -> Result<Response, RecordsApiError> {
    // A body that is not multipart at all carries no file.
    let file = match multipart {
        Ok(multipart) => read_file_part(multipart).await?,
        Err(rejection) => {
            tracing::debug!(%rejection, "Upload is not a multipart body");
            None
        },
    };

    let response =
        super::commands::upload::handle(state.store, state.spool, UploadCsvCommand { file })
            .await?;

    tracing::info!(record_count = response.record_count, "CSV uploaded via API");

    Ok((StatusCode::OK, Json(response)).into_response())
}

/// First `file` part of the body; other parts are skipped
async fn read_file_part(mut multipart: Multipart) -> Result<Option<UploadedFile>, RecordsApiError> {
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        if file.is_some() || field.name() != Some(FILE_FIELD) {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;

        file = Some(UploadedFile {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Ok(file)
}

/// Delete every record
///
/// # Response
///
/// - `200 OK` - `{"message": "All records cleared successfully"}`
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(state))]
async fn clear_records(State(state): State<FeatureState>) -> Result<Response, RecordsApiError> {
    let response = super::commands::clear::handle(state.store, ClearRecordsCommand).await?;

    Ok((StatusCode::OK, Json(response)).into_response())
}

// ============================================================================
// Query Handlers (Read Operations)
// ============================================================================

/// List records
///
/// # Endpoint
///
/// `GET /api/csv/records?page=1&limit=10&search=alice`
///
/// Parameters are read as raw pairs so repeated or malformed values never reject the request;
/// the first occurrence of each key is used.
///
/// # Response
///
/// - `200 OK` - `{"records": [...], "pagination": {"total", "page", "limit", "totalPages"}}`
/// - `500 Internal Server Error` - Store failure
#[tracing::instrument(skip(state, params))]
async fn list_records(
    State(state): State<FeatureState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, RecordsApiError> {
    let query = ListRecordsQuery::from_pairs(params);
    let response = super::queries::list::handle(state.store, query).await?;

    tracing::debug!(
        count = response.records.len(),
        total = response.pagination.total,
        "Records listed via API"
    );

    Ok((StatusCode::OK, Json(response)).into_response())
}

async fn list_columns() -> Response {
    let response = super::queries::columns::handle(ListColumnsQuery)
        .await
        .unwrap_or_else(|never| match never {});

    (StatusCode::OK, Json(response)).into_response()
}

// ============================================================================
// Error Handling
// ============================================================================

/// Unified error type for record API endpoints
#[derive(Debug)]
enum RecordsApiError {
    UploadError(UploadCsvError),
    ListError(ListRecordsError),
    ClearError(ClearRecordsError),
    MultipartError(MultipartError),
}

impl From<UploadCsvError> for RecordsApiError {
    fn from(err: UploadCsvError) -> Self {
        Self::UploadError(err)
    }
}

impl From<ListRecordsError> for RecordsApiError {
    fn from(err: ListRecordsError) -> Self {
        Self::ListError(err)
    }
}

impl From<ClearRecordsError> for RecordsApiError {
    fn from(err: ClearRecordsError) -> Self {
        Self::ClearError(err)
    }
}

impl From<MultipartError> for RecordsApiError {
    fn from(err: MultipartError) -> Self {
        Self::MultipartError(err)
    }
}

impl IntoResponse for RecordsApiError {
    fn into_response(self) -> Response {
        match self {
            RecordsApiError::UploadError(UploadCsvError::NoFile)
            | RecordsApiError::UploadError(UploadCsvError::NotCsv) => {
                (StatusCode::BAD_REQUEST, Json(ErrorResponse::new(self.to_string())))
                    .into_response()
            },
            RecordsApiError::UploadError(UploadCsvError::Parse(ref source)) => {
                tracing::error!(error = %source, "CSV parse failure during upload");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(self.to_string())))
                    .into_response()
            },
            RecordsApiError::UploadError(UploadCsvError::Spool(_))
            | RecordsApiError::UploadError(UploadCsvError::Store(_)) => {
                tracing::error!("Upload failed: {}", self);
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(self.to_string())))
                    .into_response()
            },
            RecordsApiError::ListError(ListRecordsError::Database(ref source)) => {
                tracing::error!(error = %source, "Database error during records listing");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(self.to_string())))
                    .into_response()
            },
            RecordsApiError::ClearError(ClearRecordsError::Database(ref source)) => {
                tracing::error!(error = %source, "Database error during records clear");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorResponse::new(self.to_string())))
                    .into_response()
            },
            RecordsApiError::MultipartError(ref err) => {
                let status = err.status();
                if status.is_server_error() {
                    tracing::error!("Multipart read failed: {}", err);
                }
                (status, Json(ErrorResponse::new(err.body_text()))).into_response()
            },
        }
    }
}

impl std::fmt::Display for RecordsApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UploadError(e) => write!(f, "{}", e),
            Self::ListError(e) => write!(f, "{}", e),
            Self::ClearError(e) => write!(f, "{}", e),
            Self::MultipartError(e) => write!(f, "{}", e.body_text()),
        }
    }
}
