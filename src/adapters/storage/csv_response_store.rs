//! CSV Response Store - local filesystem implementation of `ResponseStore`.
//!
//! Writes each submission bundle as one CSV file (header row plus one row per
//! record) into a flat output directory, using atomic, non-overwriting writes
//! and SHA-256 checksums for integrity.

use async_trait::async_trait;
use chrono::NaiveDateTime;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use crate::domain::foundation::{RespondentId, Timestamp, FILE_TIMESTAMP_FORMAT};
use crate::domain::survey::{ResponseRecord, SubmissionBundle};
use crate::ports::{FilePath, PersistedBundle, ResponseStore, StorageError};

/// Maximum serialized bundle size (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for submission bundles.
///
/// # Atomic Writes
///
/// 1. Serialize the whole bundle in memory
/// 2. Write it to a uniquely named `.{name}.{uuid}.tmp` and sync to disk
/// 3. Hard-link the temp file to `{name}`; the link fails if the name is taken
/// 4. Remove the temp file
///
/// A crash leaves at most a hidden temp file behind, never a truncated
/// bundle under its final name. Concurrent writers of the same name each
/// get their own temp file and exactly one of them wins the link.
#[derive(Debug, Clone)]
pub struct CsvResponseStore {
    /// Directory holding all response files.
    base_path: PathBuf,
}

impl CsvResponseStore {
    /// Creates a store writing into `base_path`.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Returns the output directory.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn temp_path(&self, file_name: &str) -> PathBuf {
        self.base_path
            .join(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()))
    }

    async fn ensure_base_dir(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.base_path).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to create output directory {}: {}",
                self.base_path.display(),
                e
            ))
        })
    }

    /// Serializes records to CSV bytes, header first.
    fn encode(bundle: &SubmissionBundle) -> Result<Vec<u8>, StorageError> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for record in bundle.records() {
            writer
                .serialize(record)
                .map_err(|e| StorageError::malformed(e.to_string()))?;
        }
        writer
            .into_inner()
            .map_err(|e| StorageError::io(format!("Failed to flush CSV buffer: {}", e)))
    }

    /// Parses CSV bytes back into records.
    fn decode(bytes: &[u8]) -> Result<Vec<ResponseRecord>, StorageError> {
        let mut reader = csv::Reader::from_reader(bytes);
        reader
            .deserialize::<ResponseRecord>()
            .enumerate()
            .map(|(i, row)| {
                row.map_err(|e| StorageError::malformed(format!("row {}: {}", i + 1, e)))
            })
            .collect()
    }

    fn compute_checksum(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    async fn write_temp(&self, temp_path: &Path, content: &[u8]) -> Result<(), StorageError> {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(temp_path)
            .await
            .map_err(|e| {
                StorageError::io(format!(
                    "Failed to create temp file {}: {}",
                    temp_path.display(),
                    e
                ))
            })?;

        file.write_all(content).await.map_err(|e| {
            StorageError::io(format!(
                "Failed to write to temp file {}: {}",
                temp_path.display(),
                e
            ))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::io(format!(
                "Failed to sync temp file {}: {}",
                temp_path.display(),
                e
            ))
        })
    }

    /// Publishes the temp file under its final name without ever replacing
    /// an existing file.
    async fn publish(&self, temp_path: &Path, final_path: &Path) -> Result<(), StorageError> {
        fs::hard_link(temp_path, final_path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::AlreadyExists => {
                    StorageError::already_exists(final_path.display().to_string())
                }
                std::io::ErrorKind::PermissionDenied => {
                    StorageError::permission_denied(final_path.display().to_string())
                }
                _ => StorageError::io(format!(
                    "Failed to link {} to {}: {}",
                    temp_path.display(),
                    final_path.display(),
                    e
                )),
            })
    }
}

#[async_trait]
impl ResponseStore for CsvResponseStore {
    async fn persist(&self, bundle: &SubmissionBundle) -> Result<PersistedBundle, StorageError> {
        let content = Self::encode(bundle)?;

        let size = content.len() as u64;
        if size > MAX_FILE_SIZE_BYTES {
            return Err(StorageError::file_too_large(size, MAX_FILE_SIZE_BYTES));
        }

        self.ensure_base_dir().await?;

        let file_name = bundle.file_name();
        let temp_path = self.temp_path(&file_name);
        let final_path = self.base_path.join(&file_name);

        let written = match self.write_temp(&temp_path, &content).await {
            Ok(()) => self.publish(&temp_path, &final_path).await,
            Err(e) => Err(e),
        };
        // Best effort: the temp file is hidden and never read back.
        let _ = fs::remove_file(&temp_path).await;
        written?;

        tracing::debug!(
            path = %final_path.display(),
            bytes = size,
            records = bundle.len(),
            "Persisted submission bundle"
        );

        Ok(PersistedBundle {
            path: FilePath::new(final_path),
            file_name,
            checksum: Self::compute_checksum(&content),
            size_bytes: size,
            record_count: bundle.len(),
        })
    }

    async fn load(&self, path: &FilePath) -> Result<SubmissionBundle, StorageError> {
        let bytes = fs::read(path.as_path()).await.map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => StorageError::not_found(path.to_string()),
            std::io::ErrorKind::PermissionDenied => StorageError::permission_denied(path.to_string()),
            _ => StorageError::io(format!("Failed to read {}: {}", path, e)),
        })?;

        let records = Self::decode(&bytes)?;
        let first = records
            .first()
            .ok_or_else(|| StorageError::malformed(format!("{} has no records", path)))?;

        let respondent_id = RespondentId::new(first.respondent_id.clone())
            .map_err(|e| StorageError::malformed(e.to_string()))?;
        let compiled_at = NaiveDateTime::parse_from_str(&first.timestamp, FILE_TIMESTAMP_FORMAT)
            .map(|dt| Timestamp::from_datetime(dt.and_utc()))
            .map_err(|e| {
                StorageError::malformed(format!("bad timestamp '{}': {}", first.timestamp, e))
            })?;
        let profession = first.profession.clone();

        Ok(SubmissionBundle::from_records(
            respondent_id,
            profession,
            compiled_at,
            records,
        ))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
