//! Bulk loader
//!
//! Persists a fully built batch as one unit. The spooled upload is removed only after the
//! batch commits; on failure it is left in place.

use thiserror::Error;
use tracing::{info, instrument, warn};

use crate::{
    db::{DbError, RecordStore},
    models::NewRecord,
    storage::SpooledUpload,
};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("{0}")]
    Store(#[from] DbError),
}

/// Insert `records` in one batch and discard the spooled file, returning the accepted count.
#[instrument(skip(store, records), fields(path = %upload.path.display(), count = records.len()))]
pub async fn load(
    store: &dyn RecordStore,
    upload: &SpooledUpload,
    records: &[NewRecord],
) -> Result<u64, LoadError> {
    let accepted = store.insert_batch(records).await?;

    info!(accepted, "Batch committed");

    if let Err(e) = upload.remove().await {
        warn!(error = %e, "Failed to remove spooled upload after commit");
    }

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::shared::test_helpers::{memory_store, spooled, FailingStore};

    #[tokio::test]
    async fn test_success_removes_spooled_file() {
        let tmp = tempfile::tempdir().unwrap();
        let upload = spooled(tmp.path(), b"name\nAlice\n");
        let store = memory_store().await;

        let records = vec![NewRecord::new(1, "Alice", "", "")];
        let accepted = load(&store, &upload, &records).await.unwrap();

        assert_eq!(accepted, 1);
        assert!(!upload.path.exists());
        assert_eq!(store.count(None).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_keeps_spooled_file() {
        let tmp = tempfile::tempdir().unwrap();
        let upload = spooled(tmp.path(), b"name\nAlice\n");

        let err = load(&FailingStore, &upload, &[NewRecord::default()])
            .await
            .unwrap_err();

        assert!(err.to_string().contains("disk I/O error"));
        assert!(upload.path.exists());
    }

    #[tokio::test]
    async fn test_already_removed_file_is_not_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let upload = spooled(tmp.path(), b"x");
        std::fs::remove_file(&upload.path).unwrap();

        let store = memory_store().await;
        let accepted = load(&store, &upload, &[NewRecord::default()]).await.unwrap();
        assert_eq!(accepted, 1);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let tmp = tempfile::tempdir().unwrap();
        let upload = spooled(tmp.path(), b"name\n");
        let store = memory_store().await;

        assert_eq!(load(&store, &upload, &[]).await.unwrap(), 0);
        assert!(!upload.path.exists());
    }
}
