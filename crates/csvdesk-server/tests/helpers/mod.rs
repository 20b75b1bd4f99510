//! Test helpers for csvdesk server integration tests
//!
//! - In-memory store setup with migrations applied
//! - A router wired to a temporary upload spool
//! - Hand-built multipart bodies
//! - A store double whose every operation fails

#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use csvdesk_server::{
    api::{self, AppState},
    config::Config,
    db::{self, DbConfig, DbError, DbResult, RecordStore, SharedRecordStore, SqliteRecordStore},
    models::{NewRecord, Record},
    storage::{UploadConfig, UploadSpool},
};
use serde_json::Value;
use std::{path::Path, sync::Arc};
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "csvdesk-test-boundary";

/// A router over a fresh store, plus the spool directory it writes to
pub struct TestApp {
    pub router: Router,
    pub store: SharedRecordStore,
    pub upload_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(Config::default()).await
    }

    pub async fn with_config(config: Config) -> Self {
        let pool = db::create_pool(&DbConfig::in_memory())
            .await
            .expect("Failed to create in-memory pool");
        db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        Self::build(SqliteRecordStore::new(pool).shared(), config).await
    }

    pub async fn with_store(store: SharedRecordStore) -> Self {
        Self::build(store, Config::default()).await
    }

    async fn build(store: SharedRecordStore, mut config: Config) -> Self {
        let upload_dir = tempfile::tempdir().expect("Failed to create upload dir");
        config.upload.dir = upload_dir.path().to_path_buf();

        let spool = UploadSpool::new(&config.upload)
            .await
            .expect("Failed to open upload spool");

        let state = AppState {
            store: store.clone(),
            spool,
        };

        Self {
            router: api::create_router(state, &config),
            store,
            upload_dir,
        }
    }

    /// Send a request and decode the JSON response body
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(
            Request::builder()
                .method("DELETE")
                .uri(uri)
                .body(Body::empty())
                .expect("Failed to build request"),
        )
        .await
    }

    /// Upload `contents` as a CSV file part named `file`
    pub async fn upload_csv(&self, file_name: &str, contents: &[u8]) -> (StatusCode, Value) {
        self.send(multipart_request(&[Part::file(
            "file",
            file_name,
            "text/csv",
            contents,
        )]))
        .await
    }

    pub async fn seed(&self, records: &[NewRecord]) {
        self.store
            .insert_batch(records)
            .await
            .expect("Failed to seed records");
    }

    pub fn spooled_files(&self) -> Vec<String> {
        spooled_files(self.upload_dir.path())
    }
}

pub fn spooled_files(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .expect("Failed to read upload dir")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect()
}

/// One part of a multipart/form-data body
pub struct Part<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

impl<'a> Part<'a> {
    pub fn file(name: &'a str, file_name: &'a str, content_type: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            file_name: Some(file_name),
            content_type: Some(content_type),
            data,
        }
    }

    pub fn text(name: &'a str, value: &'a str) -> Self {
        Self {
            name,
            file_name: None,
            content_type: None,
            data: value.as_bytes(),
        }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();

    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());

        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(file_name) = part.file_name {
            disposition.push_str(&format!("; filename=\"{}\"", file_name));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");

        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {}\r\n", content_type).as_bytes());
        }

        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/csv/upload")
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(multipart_body(parts)))
        .expect("Failed to build multipart request")
}

/// Store whose every operation fails
pub struct FailingStore;

fn failure() -> DbError {
    DbError::Sqlx(sqlx::Error::Protocol("disk I/O error".to_string()))
}

#[async_trait]
impl RecordStore for FailingStore {
    async fn insert_batch(&self, _records: &[NewRecord]) -> DbResult<u64> {
        Err(failure())
    }

    async fn count(&self, _search: Option<&str>) -> DbResult<i64> {
        Err(failure())
    }

    async fn fetch_page(
        &self,
        _search: Option<&str>,
        _limit: i64,
        _offset: i64,
    ) -> DbResult<Vec<Record>> {
        Err(failure())
    }

    async fn clear(&self) -> DbResult<u64> {
        Err(failure())
    }

    async fn ping(&self) -> DbResult<()> {
        Err(failure())
    }
}

pub fn failing_store() -> SharedRecordStore {
    Arc::new(FailingStore)
}
