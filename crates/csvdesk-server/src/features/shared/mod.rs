//! Shared utilities and types for feature modules
//!
//! - **pagination**: page/limit coercion and pagination metadata
//! - **test_helpers**: store fixtures and doubles (test-only)

pub mod pagination;

#[cfg(test)]
pub mod test_helpers;

pub use pagination::{PaginationMetadata, PaginationParams};
