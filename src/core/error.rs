//! SDK error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while locating, downloading or wiring in the SDK.
#[derive(Error, Debug)]
pub enum SdkError {
    /// No resolution strategy produced an SDK directory.
    ///
    /// The message is the full multi-line remediation text.
    #[error("{0}")]
    NotFound(String),

    #[error("file or directory already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    #[error("unexpected archive layout: {0}")]
    UnexpectedLayout(String),

    #[error("download failed: {} does not exist after download", .0.display())]
    DownloadFailed(PathBuf),

    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: Box<ureq::Error>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("command failed: {cmd} (exit code: {code:?})")]
    CommandFailed { cmd: String, code: Option<i32> },

    #[error("SDK probe failed: {0}")]
    Probe(String),

    #[error("cannot access {}: no such virtualenv or site directory", .0.display())]
    Vendor(PathBuf),
}

impl SdkError {
    pub(crate) fn http(url: &str, source: ureq::Error) -> Self {
        Self::Http {
            url: url.to_string(),
            source: Box::new(source),
        }
    }
}

pub type Result<T, E = SdkError> = std::result::Result<T, E>;
