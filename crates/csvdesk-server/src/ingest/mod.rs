//! CSV ingestion pipeline
//!
//! An uploaded file flows through these stages, leaves first:
//!
//! - **normalize**: cleans header and cell text (byte-order mark, surrounding quotes, whitespace)
//! - **field_map**: resolves canonical fields from the accepted header spellings
//! - **builder**: coerces mapped values into a [`NewRecord`](crate::models::NewRecord)
//! - **parser**: reads the file asynchronously and runs the three stages above per row
//! - **loader**: hands the whole batch to the store and removes the spooled file
//!
//! Row-level malformation is never an error. Only an undecodable stream or a store failure
//! aborts an upload.

use std::collections::HashMap;

pub mod builder;
pub mod field_map;
pub mod loader;
pub mod normalize;
pub mod parser;

/// A cleaned row keyed by cleaned header; lives only for the duration of one upload
pub type RawRow = HashMap<String, String>;

pub use builder::{build_record, parse_or_default};
pub use field_map::{CanonicalField, FieldAliases, FieldMapper, MappedRow, DEFAULT_ALIASES};
pub use loader::{load, LoadError};
pub use normalize::{normalize_header, normalize_value};
pub use parser::{read_records, ParseError};
