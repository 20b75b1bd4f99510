//! Record construction from mapped rows
//!
//! Coercion never fails. A malformed cell resolves to its field default so one bad row can
//! not abort an upload.

use std::str::FromStr;

use super::field_map::MappedRow;
use crate::models::NewRecord;

/// Parse `value` as `T`, falling back to `default` when absent or unparsable.
pub fn parse_or_default<T: FromStr>(value: Option<&str>, default: T) -> T {
    value.and_then(|v| v.parse().ok()).unwrap_or(default)
}

/// Trimmed text, or empty when absent.
pub fn text_or_empty(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}

pub fn build_record(mapped: &MappedRow) -> NewRecord {
    NewRecord {
        post_id: parse_or_default(mapped.post_id.as_deref(), 0_i64),
        name: text_or_empty(Some(&mapped.name)),
        email: text_or_empty(Some(&mapped.email)),
        body: text_or_empty(Some(&mapped.body)),
    }
}
