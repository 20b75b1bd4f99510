//! List records query
//!
//! Paginated listing with an optional case-insensitive substring filter over name, email, and
//! body. The total and the page are read with separate statements.

use mediator::Request;
use serde::{Deserialize, Serialize};

use crate::{
    db::{DbError, SharedRecordStore},
    features::shared::pagination::{PaginationMetadata, PaginationParams},
    models::Record,
};

/// Query parameters as received; `page` and `limit` stay raw text until coerced
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecordsQuery {
    #[serde(flatten)]
    pub pagination: PaginationParams,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRecordsResponse {
    pub records: Vec<Record>,
    pub pagination: PaginationMetadata,
}

#[derive(Debug, thiserror::Error)]
pub enum ListRecordsError {
    #[error("Error fetching records")]
    Database(#[from] DbError),
}

impl Request<Result<ListRecordsResponse, ListRecordsError>> for ListRecordsQuery {}

impl crate::cqrs::middleware::Query for ListRecordsQuery {}

impl ListRecordsQuery {
    pub fn new(page: Option<&str>, limit: Option<&str>, search: Option<&str>) -> Self {
        Self {
            pagination: PaginationParams::new(page, limit),
            search: search.map(str::to_string),
        }
    }

    /// Build from raw query-string pairs
    ///
    /// The first occurrence of a repeated key wins; unknown keys are ignored.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();

        for (key, value) in pairs {
            let slot = match key.as_str() {
                "page" => &mut query.pagination.page,
                "limit" => &mut query.pagination.limit,
                "search" => &mut query.search,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }

        query
    }

    /// Search filter to apply; the empty string means no filter
    pub fn search_term(&self) -> Option<&str> {
        self.search.as_deref().filter(|term| !term.is_empty())
    }
}

#[tracing::instrument(
    skip(store, query),
    fields(
        page = query.pagination.page(),
        limit = query.pagination.limit(),
        search = ?query.search_term()
    )
)]
pub async fn handle(
    store: SharedRecordStore,
    query: ListRecordsQuery,
) -> Result<ListRecordsResponse, ListRecordsError> {
    let search = query.search_term();
    let limit = query.pagination.limit();

    let total = store.count(search).await?;
    let records = store
        .fetch_page(search, limit, query.pagination.offset())
        .await?;

    tracing::debug!(count = records.len(), total, "Records listed");

    Ok(ListRecordsResponse {
        records,
        pagination: PaginationMetadata::from_params(&query.pagination, total),
    })
}
