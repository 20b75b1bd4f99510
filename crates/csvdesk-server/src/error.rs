//! Server-level error types
//!
//! Feature slices map their own operation errors to responses; this covers what the router
//! itself answers.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{api::response::ErrorResponse, db::DbError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database unavailable: {0}")]
    Unavailable(#[from] DbError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Unavailable(ref e) => {
                tracing::error!("Database health check failed: {}", e);
                (StatusCode::SERVICE_UNAVAILABLE, "Database unavailable".to_string())
            },
            AppError::NotFound(ref path) => (StatusCode::NOT_FOUND, format!("Not found: {}", path)),
        };

        (status, Json(ErrorResponse::new(message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let response = AppError::Unavailable(DbError::config("closed")).into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let response = AppError::NotFound("/nope".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
