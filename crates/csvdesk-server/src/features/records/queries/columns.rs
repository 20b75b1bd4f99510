//! List columns query
//!
//! The exposed columns are fixed, so this query cannot fail.

use mediator::Request;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;

use crate::models::RECORD_COLUMNS;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ListColumnsQuery;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListColumnsResponse {
    pub columns: Vec<String>,
}

impl Request<Result<ListColumnsResponse, Infallible>> for ListColumnsQuery {}

impl crate::cqrs::middleware::Query for ListColumnsQuery {}

pub async fn handle(_query: ListColumnsQuery) -> Result<ListColumnsResponse, Infallible> {
    Ok(ListColumnsResponse {
        columns: RECORD_COLUMNS.iter().map(|c| c.to_string()).collect(),
    })
}
