//! Upload spool
//!
//! Accepted upload parts are written to a local directory before parsing. A spooled file is
//! removed once its rows are committed and kept otherwise, so failed uploads can be inspected.

use chrono::Utc;
use csvdesk_common::{CsvDeskError, Result};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info, instrument};

pub mod config;

pub use config::UploadConfig;

/// Name used when the client sends no usable file name
pub const FALLBACK_FILE_NAME: &str = "upload.csv";

/// Content types accepted for uploads besides a `.csv` file name
pub const CSV_CONTENT_TYPES: [&str; 2] = ["text/csv", "application/vnd.ms-excel"];

const MAX_NAME_ATTEMPTS: i64 = 16;

#[derive(Debug, Clone)]
pub struct UploadSpool {
    dir: PathBuf,
}

/// A file written to the spool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpooledUpload {
    pub path: PathBuf,
    pub original_name: String,
    pub size: usize,
}

impl UploadSpool {
    /// Open the spool, creating its directory if needed.
    pub async fn new(config: &UploadConfig) -> Result<Self> {
        if config.dir.as_os_str().is_empty() {
            return Err(CsvDeskError::config("upload directory cannot be empty"));
        }

        fs::create_dir_all(&config.dir).await?;

        info!(dir = %config.dir.display(), "Upload spool ready");

        Ok(Self {
            dir: config.dir.clone(),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `data` to a fresh `<unix-millis>-<name>` file.
    ///
    /// An existing file is never overwritten; on a name clash the timestamp is bumped.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn persist(&self, original_name: Option<&str>, data: &[u8]) -> Result<SpooledUpload> {
        let base = base_name(original_name);
        let stamp = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let path = self.dir.join(spool_file_name(&base, stamp + attempt));

            let mut file = match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(e.into()),
            };

            file.write_all(data).await?;
            file.flush().await?;

            debug!(path = %path.display(), "Upload spooled");

            return Ok(SpooledUpload {
                path,
                original_name: base,
                size: data.len(),
            });
        }

        Err(CsvDeskError::upload(format!(
            "could not find a free spool name for '{}'",
            base
        )))
    }
}

impl SpooledUpload {
    pub async fn remove(&self) -> std::io::Result<()> {
        fs::remove_file(&self.path).await
    }
}

/// Last path component of a client-supplied file name, or [`FALLBACK_FILE_NAME`].
pub fn base_name(original_name: Option<&str>) -> String {
    original_name
        .and_then(|name| name.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .unwrap_or(FALLBACK_FILE_NAME)
        .to_string()
}

pub fn spool_file_name(base: &str, unix_millis: i64) -> String {
    format!("{}-{}", unix_millis, base)
}

/// Whether an upload part looks like CSV.
///
/// Either signal is enough. A part with neither a file name nor a content type is accepted.
pub fn is_csv(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    if file_name.is_none() && content_type.is_none() {
        return true;
    }

    let by_type = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| {
            let ct = ct.trim();
            CSV_CONTENT_TYPES
                .iter()
                .any(|accepted| ct.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false);

    let by_name = file_name
        .map(|name| name.to_ascii_lowercase().ends_with(".csv"))
        .unwrap_or(false);

    by_type || by_name
}
