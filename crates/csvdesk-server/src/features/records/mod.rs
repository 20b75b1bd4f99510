pub mod commands;
pub mod queries;
pub mod routes;

pub use commands::{
    ClearRecordsCommand, ClearRecordsError, ClearRecordsResponse, UploadCsvCommand,
    UploadCsvError, UploadCsvResponse, UploadedFile,
};

pub use queries::{
    ListColumnsQuery, ListColumnsResponse, ListRecordsError, ListRecordsQuery,
    ListRecordsResponse,
};

pub use routes::records_routes;
