//! Shared pagination utilities
//!
//! Query strings carry `page` and `limit` as raw text. Anything absent, non-numeric, or below 1
//! falls back to the default instead of being rejected.
//!
//! # Examples
//!
//! ```rust,ignore
//! use csvdesk_server::features::shared::pagination::{PaginationMetadata, PaginationParams};
//!
//! let params = PaginationParams::new(Some("2"), Some("20"));
//! let offset = params.offset();
//!
//! // After fetching data...
//! let metadata = PaginationMetadata::new(params.page(), params.limit(), 100);
//! ```

use serde::{Deserialize, Serialize};

use crate::ingest::parse_or_default;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;

/// Common pagination request parameters, kept as received
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PaginationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl PaginationParams {
    pub fn new(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: page.map(str::to_string),
            limit: limit.map(str::to_string),
        }
    }

    /// Page number (1-indexed), defaulting to 1
    pub fn page(&self) -> i64 {
        positive_or(self.page.as_deref(), DEFAULT_PAGE)
    }

    /// Items per page, defaulting to 10
    pub fn limit(&self) -> i64 {
        positive_or(self.limit.as_deref(), DEFAULT_LIMIT)
    }

    /// Calculate the offset for SQL OFFSET clause
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

fn positive_or(value: Option<&str>, default: i64) -> i64 {
    match parse_or_default(value, default) {
        n if n >= 1 => n,
        _ => default,
    }
}

/// Pagination metadata for response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaginationMetadata {
    /// Total number of matching items
    pub total: i64,

    /// Current page number (1-indexed)
    pub page: i64,

    /// Items per page
    pub limit: i64,

    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

impl PaginationMetadata {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        Self {
            total,
            page,
            limit,
            total_pages: total_pages(total, limit),
        }
    }

    pub fn from_params(params: &PaginationParams, total: i64) -> Self {
        Self::new(params.page(), params.limit(), total)
    }
}

/// `ceil(total / limit)`, or 0 for an empty result
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 || limit <= 0 {
        return 0;
    }
    total / limit + i64::from(total % limit != 0)
}
