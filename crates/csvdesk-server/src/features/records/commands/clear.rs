//! Clear records command
//!
//! Deletes every stored record. Clearing an empty store succeeds.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::db::{DbError, SharedRecordStore};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ClearRecordsCommand;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearRecordsResponse {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClearRecordsError {
    #[error("Error clearing records")]
    Database(#[from] DbError),
}

impl Request<Result<ClearRecordsResponse, ClearRecordsError>> for ClearRecordsCommand {}

impl crate::cqrs::middleware::Command for ClearRecordsCommand {}

#[tracing::instrument(skip(store, _command))]
pub async fn handle(
    store: SharedRecordStore,
    _command: ClearRecordsCommand,
) -> Result<ClearRecordsResponse, ClearRecordsError> {
    let deleted = store.clear().await?;

    tracing::info!(deleted, "Records cleared");

    Ok(ClearRecordsResponse {
        message: "All records cleared successfully".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::RecordStore,
        features::shared::test_helpers::{memory_store, FailingStore},
        models::NewRecord,
    };
    use std::sync::Arc;

    #[tokio::test]
    async fn test_clear_is_idempotent() {
        let store = Arc::new(memory_store().await);
        store
            .insert_batch(&[NewRecord::new(1, "Alice", "a@x.com", "hello")])
            .await
            .unwrap();

        for _ in 0..2 {
            let response = handle(store.clone(), ClearRecordsCommand).await.unwrap();
            assert_eq!(response.message, "All records cleared successfully");
            assert_eq!(store.count(None).await.unwrap(), 0);
        }
    }

    #[tokio::test]
    async fn test_clear_failure() {
        let err = handle(Arc::new(FailingStore), ClearRecordsCommand)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Error clearing records");
    }
}
