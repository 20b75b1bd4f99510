//! Asynchronous CSV reader
//!
//! Reads a spooled upload row by row with `csv-async`, cleaning and building each row as it
//! arrives. The built batch is buffered in memory and returned whole; nothing is written until
//! the stream has been read to the end.

use csv_async::{AsyncReaderBuilder, StringRecord};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::io::AsyncRead;
use tracing::{debug, instrument};

use super::{
    builder::build_record,
    field_map::FieldMapper,
    normalize::{normalize_header, normalize_value},
    RawRow,
};
use crate::models::NewRecord;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("cannot open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stream could not be decoded (invalid UTF-8, I/O failure mid-read)
    #[error("malformed CSV stream: {0}")]
    Csv(#[from] csv_async::Error),
}

/// Read and build every record in the file at `path`.
#[instrument(fields(path = %path.display()))]
pub async fn read_records(path: &Path) -> Result<Vec<NewRecord>, ParseError> {
    let file = tokio::fs::File::open(path)
        .await
        .map_err(|source| ParseError::Open {
            path: path.to_path_buf(),
            source,
        })?;

    read_from(file, &FieldMapper::default()).await
}

/// Read and build every record from an arbitrary async source.
///
/// The first row is the header row. Rows may be shorter or longer than the header: missing
/// trailing cells leave their headers absent and extra cells are ignored.
pub async fn read_from<R>(source: R, mapper: &FieldMapper) -> Result<Vec<NewRecord>, ParseError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .create_reader(source);

    let headers: Vec<String> = reader.headers().await?.iter().map(normalize_header).collect();

    let mut records = Vec::new();
    let mut line = StringRecord::new();

    while reader.read_record(&mut line).await? {
        let row = clean_row(&headers, &line);
        let record = build_record(&mapper.map_row(&row));

        debug!(
            post_id = record.post_id,
            name = %record.name,
            email = %record.email,
            body_len = record.body.len(),
            "Built record"
        );

        records.push(record);
    }

    debug!(count = records.len(), "CSV stream fully read");

    Ok(records)
}

// Later duplicate headers overwrite earlier ones.
fn clean_row(headers: &[String], line: &StringRecord) -> RawRow {
    headers
        .iter()
        .zip(line.iter())
        .map(|(header, cell)| (header.clone(), normalize_value(cell)))
        .collect()
}
