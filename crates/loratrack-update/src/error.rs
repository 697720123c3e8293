//! Error types for loratrack-update

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type alias using loratrack-update's error type
pub type Result<T> = std::result::Result<T, UpdateError>;

/// Failures surfaced by the self-updater
///
/// Every variant is a stable kind callers can match on. Nothing in this
/// crate deletes or rewrites the installed binary before one of the
/// replacement variants is reached.
#[derive(Error, Debug)]
pub enum UpdateError {
    /// The listing contained no draft-free, semver-valid release passing the prerelease filter
    #[error("No suitable release found")]
    NoSuitableRelease,

    /// Remote host answered with a non-2xx status
    #[error("HTTP request to {url} failed with status {status}")]
    HttpStatus { url: String, status: u16 },

    /// Request construction, connection, TLS or body read failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The checksum manifest has no line for the archive
    #[error("Checksum not found for {file}")]
    ChecksumNotFound { file: String },

    /// The archive digest differs from the manifest entry
    #[error("Checksum mismatch for {file}: expected {expected}, got {actual}")]
    ChecksumMismatch {
        file: String,
        expected: String,
        actual: String,
    },

    /// No archive entry carries the expected binary leaf name
    #[error("Binary {name} not found in archive")]
    ArchiveEntryNotFound { name: String },

    /// The running executable could not be resolved
    #[error("Cannot locate current executable: {0}")]
    ExecutableNotFound(#[source] std::io::Error),

    /// Windows: the new binary was placed beside the running one
    #[error("New binary staged at {}; restart required to complete the update", .path.display())]
    PendingReplace { path: PathBuf },

    /// POSIX: the atomic rename failed and the new binary was placed beside the old one
    #[error("Could not replace binary ({reason}); new binary saved to {}, replace it manually", .path.display())]
    ManualReplaceRequired { path: PathBuf, reason: String },

    /// The newest admissible release is not newer than the running version
    #[error("Already up to date (current {current}, latest {latest})")]
    AlreadyUpToDate { current: String, latest: String },

    /// The caller's deadline expired before the operation finished
    #[error("Deadline exceeded")]
    DeadlineExceeded,

    /// A tag could not be turned into artifact names
    #[error("Invalid release tag: {tag}")]
    InvalidTag { tag: String },

    /// Invalid configuration file or environment override
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Zip archive error
    #[error("Zip archive error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl UpdateError {
    /// Create an HTTP status error
    pub fn http_status(url: impl Into<String>, status: reqwest::StatusCode) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status: status.as_u16(),
        }
    }

    /// Create a checksum-not-found error
    pub fn checksum_not_found(file: impl Into<String>) -> Self {
        Self::ChecksumNotFound { file: file.into() }
    }

    /// Create an archive-entry-not-found error
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::ArchiveEntryNotFound { name: name.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// HTTP status code, if this is a status error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Path of the side-by-side `.new` binary, for the two outcomes that leave one
    pub fn new_binary_path(&self) -> Option<&Path> {
        match self {
            Self::PendingReplace { path } | Self::ManualReplaceRequired { path, .. } => {
                Some(path.as_path())
            }
            _ => None,
        }
    }

    /// Whether the update is staged and only a restart is required
    pub fn is_pending_replace(&self) -> bool {
        matches!(self, Self::PendingReplace { .. })
    }

    /// Whether this error only reports that nothing needed doing
    pub fn is_already_up_to_date(&self) -> bool {
        matches!(self, Self::AlreadyUpToDate { .. })
    }
}
