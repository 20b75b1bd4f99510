pub mod columns;
pub mod list;

pub use columns::{ListColumnsQuery, ListColumnsResponse};
pub use list::{ListRecordsError, ListRecordsQuery, ListRecordsResponse};
