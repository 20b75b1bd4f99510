//! Record persistence
//!
//! [`RecordStore`] is the only way the rest of the server touches stored rows. The SQLite
//! implementation gives these guarantees and no more:
//!
//! - a batch insert is one transaction, so readers see none or all of it;
//! - `count` and `fetch_page` are separate statements, so a concurrent clear or upload can
//!   make them disagree;
//! - clears and uploads are not ordered against each other.
//!
//! A stricter store (snapshot reads, versioning) can be swapped in behind the trait without
//! touching the query handlers.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use std::sync::Arc;

use super::DbResult;
use crate::models::{NewRecord, Record};

/// Rows per multi-row INSERT; six binds each keeps well under SQLite's variable limit.
const INSERT_CHUNK_SIZE: usize = 500;

// `instr` instead of LIKE so `%` and `_` in a search term match literally.
const SEARCH_PREDICATE: &str = r#"
    (?1 IS NULL
     OR instr(lower(name), lower(?1)) > 0
     OR instr(lower(email), lower(?1)) > 0
     OR instr(lower(body), lower(?1)) > 0)
"#;

#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Insert all records atomically, returning how many were stored
    async fn insert_batch(&self, records: &[NewRecord]) -> DbResult<u64>;

    /// Number of records matching `search` (every record when `None`)
    async fn count(&self, search: Option<&str>) -> DbResult<i64>;

    /// Matching records ordered by id, `limit` rows starting at `offset`
    async fn fetch_page(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Record>>;

    /// Delete every record, returning how many were removed
    async fn clear(&self) -> DbResult<u64>;

    async fn ping(&self) -> DbResult<()>;
}

pub type SharedRecordStore = Arc<dyn RecordStore>;

#[derive(Debug, Clone)]
pub struct SqliteRecordStore {
    pool: SqlitePool,
}

impl SqliteRecordStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn shared(self) -> SharedRecordStore {
        Arc::new(self)
    }
}

#[async_trait]
impl RecordStore for SqliteRecordStore {
    #[tracing::instrument(skip(self, records), fields(count = records.len()))]
    async fn insert_batch(&self, records: &[NewRecord]) -> DbResult<u64> {
        if records.is_empty() {
            return Ok(0);
        }

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0u64;

        for chunk in records.chunks(INSERT_CHUNK_SIZE) {
            let mut query_builder: QueryBuilder<Sqlite> = QueryBuilder::new(
                "INSERT INTO csv_records (post_id, name, email, body, created_at, updated_at) ",
            );

            query_builder.push_values(chunk, |mut row, record| {
                row.push_bind(record.post_id)
                    .push_bind(record.name.as_str())
                    .push_bind(record.email.as_str())
                    .push_bind(record.body.as_str())
                    .push_bind(now)
                    .push_bind(now);
            });

            inserted += query_builder
                .build()
                .execute(&mut *tx)
                .await?
                .rows_affected();
        }

        tx.commit().await?;

        Ok(inserted)
    }

    async fn count(&self, search: Option<&str>) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM csv_records WHERE {}", SEARCH_PREDICATE);

        let total = sqlx::query_scalar::<_, i64>(&sql)
            .bind(search)
            .fetch_one(&self.pool)
            .await?;

        Ok(total)
    }

    async fn fetch_page(
        &self,
        search: Option<&str>,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<Record>> {
        let sql = format!(
            r#"
            SELECT id, post_id, name, email, body, created_at, updated_at
            FROM csv_records
            WHERE {}
            ORDER BY id ASC
            LIMIT ?2
            OFFSET ?3
            "#,
            SEARCH_PREDICATE
        );

        let records = sqlx::query_as::<_, Record>(&sql)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(records)
    }

    async fn clear(&self) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM csv_records")
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> DbResult<()> {
        super::health_check(&self.pool).await
    }
}
