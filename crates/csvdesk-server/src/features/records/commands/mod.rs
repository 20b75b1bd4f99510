pub mod clear;
pub mod upload;

pub use clear::{ClearRecordsCommand, ClearRecordsError, ClearRecordsResponse};
pub use upload::{UploadCsvCommand, UploadCsvError, UploadCsvResponse, UploadedFile};
