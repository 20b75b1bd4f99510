//! Feature modules implementing the csvdesk API
//!
//! Each feature is a vertical CQRS slice:
//! - `commands/` - write operations (upload, clear)
//! - `queries/` - read operations (list, columns)
//! - `routes.rs` - HTTP route definitions
//!
//! Commands and queries implement the mediator pattern using the `mediator` crate, so each
//! handler can be driven directly or through [`crate::cqrs::build_mediator`].

pub mod records;
pub mod shared;

use axum::Router;

use crate::{db::SharedRecordStore, storage::UploadSpool};

/// Shared state for all feature routes
#[derive(Clone)]
pub struct FeatureState {
    pub store: SharedRecordStore,
    /// Local directory uploads are written to before parsing
    pub spool: UploadSpool,
}

/// Creates the API router with all feature routes mounted
///
/// Record routes sit at the root of whatever prefix the caller nests this router under.
pub fn router(state: FeatureState) -> Router<()> {
    Router::new().merge(records::records_routes().with_state(state))
}
