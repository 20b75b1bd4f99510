//! HTTP surface: application state and router assembly

pub mod response;

use axum::{
    extract::{DefaultBodyLimit, State},
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use tower_http::compression::CompressionLayer;

use crate::{
    config::Config,
    db::SharedRecordStore,
    error::AppError,
    features, middleware,
    storage::UploadSpool,
};
use response::{HealthResponse, StatusResponse};

/// Prefix every record route is mounted under
pub const API_PREFIX: &str = "/api/csv";

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SharedRecordStore,
    pub spool: UploadSpool,
}

/// Create the application router with all routes and middleware
pub fn create_router(state: AppState, config: &Config) -> Router {
    let feature_state = features::FeatureState {
        store: state.store.clone(),
        spool: state.spool.clone(),
    };

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .with_state(state)
        .nest(API_PREFIX, features::router(feature_state))
        .fallback(not_found)
        // Apply layers from innermost to outermost
        .layer(DefaultBodyLimit::max(config.upload.max_bytes))
        .layer(CompressionLayer::new())
        .layer(middleware::tracing_layer())
        .layer(middleware::cors_layer(&config.cors))
}

async fn root() -> impl IntoResponse {
    Json(StatusResponse {
        status: "OK".to_string(),
    })
}

async fn health(State(state): State<AppState>) -> Result<Response, AppError> {
    state.store.ping().await?;

    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            database: "connected".to_string(),
        }),
    )
        .into_response())
}

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(uri.path().to_string())
}
