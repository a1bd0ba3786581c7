//! Response Store Port - durable storage for submission bundles.
//!
//! The application depends on this trait; adapters (like
//! `CsvResponseStore`) decide the on-disk format and location.

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::survey::SubmissionBundle;

/// Port for persisting submission bundles.
///
/// # Contract
///
/// Implementations must:
/// - Create the containing directory if it doesn't exist
/// - Write all-or-nothing (no partially written bundle under the final name)
/// - Never overwrite an existing bundle; a name clash is an error
/// - Report the resolved path of the written file
#[async_trait]
pub trait ResponseStore: Send + Sync {
    /// Persist a bundle under `bundle.file_name()`.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if a bundle with the same name was persisted before
    /// - `FileTooLarge` if the serialized bundle exceeds the size limit
    /// - `Io`/`PermissionDenied` on filesystem failures
    async fn persist(&self, bundle: &SubmissionBundle) -> Result<PersistedBundle, StorageError>;

    /// Read a persisted bundle back.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the file doesn't exist
    /// - `Malformed` if the content cannot be parsed
    async fn load(&self, path: &FilePath) -> Result<SubmissionBundle, StorageError>;
}

/// Represents a file path (absolute or relative).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePath(PathBuf);

impl FilePath {
    /// Creates a new file path from a PathBuf.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    /// Returns the path as a string (lossy conversion for non-UTF8 paths).
    pub fn to_string_lossy(&self) -> String {
        self.0.to_string_lossy().to_string()
    }

    /// Returns a reference to the inner PathBuf.
    pub fn as_path(&self) -> &std::path::Path {
        &self.0
    }

    /// Returns the file name without the directory.
    pub fn file_name(&self) -> Option<String> {
        self.0
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
    }
}

impl std::fmt::Display for FilePath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_string_lossy())
    }
}

/// Outcome of a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBundle {
    /// Resolved path of the written file.
    pub path: FilePath,

    /// File name only (used in notification subject and body).
    pub file_name: String,

    /// Hex-encoded SHA-256 of the file content.
    pub checksum: String,

    /// File size in bytes.
    pub size_bytes: u64,

    /// Number of records written (header excluded).
    pub record_count: usize,
}

/// Errors that can occur during response storage operations.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// File was not found.
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// A bundle with this name already exists.
    #[error("File already exists: {path}")]
    AlreadyExists { path: String },

    /// Permission denied accessing the file.
    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    /// IO error during file operation.
    #[error("IO error: {message}")]
    Io { message: String },

    /// Bundle could not be serialized or parsed.
    #[error("Malformed response file: {message}")]
    Malformed { message: String },

    /// File is too large.
    #[error("File too large: {size_bytes} bytes (max: {max_bytes})")]
    FileTooLarge { size_bytes: u64, max_bytes: u64 },
}

impl StorageError {
    /// Creates a not found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Creates an already exists error.
    pub fn already_exists(path: impl Into<String>) -> Self {
        Self::AlreadyExists { path: path.into() }
    }

    /// Creates a permission denied error.
    pub fn permission_denied(path: impl Into<String>) -> Self {
        Self::PermissionDenied { path: path.into() }
    }

    /// Creates an IO error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a malformed content error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a file too large error.
    pub fn file_too_large(size_bytes: u64, max_bytes: u64) -> Self {
        Self::FileTooLarge {
            size_bytes,
            max_bytes,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
