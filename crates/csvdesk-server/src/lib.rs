//! csvdesk server library
//!
//! HTTP service that ingests CSV uploads, normalizes their headers and cells into a fixed
//! record shape, and serves the stored records back through paginated, searchable listings.
//!
//! # Architecture
//!
//! The server follows a **CQRS (Command Query Responsibility Segregation)** layout:
//!
//! - **Commands** (write operations): upload a CSV file, clear all records
//! - **Queries** (read operations): list records, list columns
//!
//! Uploads pass through the [`ingest`] pipeline (normalize, map fields, build records) before the
//! bulk loader hands the batch to the [`db::RecordStore`].
//!
//! ## Framework Stack
//!
//! - **Axum**: web framework
//! - **SQLx**: SQLite access and embedded migrations
//! - **csv-async**: streaming CSV reader
//! - **Tower**: middleware and service abstractions
//!
//! # Example
//!
//! ```no_run
//! use csvdesk_server::{api, config::Config, db, storage::UploadSpool};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let pool = db::create_pool(&config.database).await?;
//!     db::run_migrations(&pool).await?;
//!
//!     let state = api::AppState {
//!         store: db::SqliteRecordStore::new(pool).shared(),
//!         spool: UploadSpool::new(&config.upload).await?,
//!     };
//!     let app = api::create_router(state, &config);
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:3001").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod cqrs;
pub mod db;
pub mod error;
pub mod features;
pub mod ingest;
pub mod middleware;
pub mod models;
pub mod storage;

// Re-export commonly used types
pub use error::AppError;
