//! Test helpers and fixtures for store-backed tests

use async_trait::async_trait;
use std::path::Path;

use crate::{
    db::{self, DbConfig, DbError, DbResult, RecordStore, SqliteRecordStore},
    models::{NewRecord, Record},
    storage::SpooledUpload,
};

/// Fresh in-memory store with the schema applied
pub async fn memory_store() -> SqliteRecordStore {
    let pool = db::create_pool(&DbConfig::in_memory())
        .await
        .expect("in-memory pool");
    db::run_migrations(&pool).await.expect("migrations");
    SqliteRecordStore::new(pool)
}

/// Write `data` under `dir` as if the spool had accepted it
pub fn spooled(dir: &Path, data: &[u8]) -> SpooledUpload {
    let path = dir.join("1700000000000-test.csv");
    std::fs::write(&path, data).expect("write spooled file");
    SpooledUpload {
        path,
        original_name: "test.csv".to_string(),
        size: data.len(),
    }
}

/// Store whose every operation fails
#[derive(Debug, Clone, Copy)]
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
