//! Local Filesystem Artifact Storage - Implementation of ArtifactStorage.
//!
//! Saves rendered exports into one directory under their fixed filenames.
//! Uses atomic writes and SHA-256 checksums for data integrity.

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::ports::{ArtifactStorage, ExportError, ExportedDocument, SavedArtifact};

/// Maximum artifact size allowed (10 MB).
const MAX_ARTIFACT_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Local filesystem storage for exported files.
///
/// # Atomic Writes
///
/// Uses a write-to-temp-then-rename pattern:
/// 1. Write content to `{filename}.tmp`
/// 2. Sync to disk
/// 3. Rename to `{filename}`
///
/// A crash mid-write never leaves a truncated export under the final name.
#[derive(Debug, Clone)]
pub struct LocalArtifactStorage {
    output_dir: PathBuf,
}

impl LocalArtifactStorage {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Computes SHA-256 checksum of the given content.
    pub fn compute_checksum(content: &[u8]) -> String {
        let mut hasher = Sha256::new();
        hasher.update(content);
        hex::encode(hasher.finalize())
    }

    /// Rejects names that would escape the output directory.
    fn artifact_path(&self, filename: &str) -> Result<PathBuf, ExportError> {
        let is_plain = !filename.is_empty()
            && !filename.contains(['/', '\\'])
            && filename != "."
            && filename != "..";
        if !is_plain {
            return Err(ExportError::InvalidFilename(filename.to_string()));
        }
        Ok(self.output_dir.join(filename))
    }

    async fn write_and_rename(
        temp_path: &Path,
        final_path: &Path,
        content: &[u8],
    ) -> Result<(), ExportError> {
        let mut file = fs::File::create(temp_path).await.map_err(|e| {
            ExportError::io(format!("Failed to create temp file {}: {}", temp_path.display(), e))
        })?;

        file.write_all(content).await.map_err(|e| {
            ExportError::io(format!("Failed to write to temp file {}: {}", temp_path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            ExportError::io(format!("Failed to sync temp file {}: {}", temp_path.display(), e))
        })?;
        drop(file);

        fs::rename(temp_path, final_path).await.map_err(|e| {
            ExportError::io(format!(
                "Failed to rename {} to {}: {}",
                temp_path.display(),
                final_path.display(),
                e
            ))
        })
    }

    async fn ensure_output_dir(&self) -> Result<(), ExportError> {
        fs::create_dir_all(&self.output_dir).await.map_err(|e| {
            ExportError::io(format!(
                "Failed to create output directory {}: {}",
                self.output_dir.display(),
                e
            ))
        })
    }
}

#[async_trait]
impl ArtifactStorage for LocalArtifactStorage {
    async fn save(&self, document: &ExportedDocument) -> Result<SavedArtifact, ExportError> {
        let size = document.content.len() as u64;
        if size > MAX_ARTIFACT_SIZE_BYTES {
            return Err(ExportError::io(format!(
                "Artifact too large: {} bytes (max: {})",
                size, MAX_ARTIFACT_SIZE_BYTES
            )));
        }

        let final_path = self.artifact_path(&document.filename)?;
        let temp_path = self.artifact_path(&format!("{}.tmp", document.filename))?;
        self.ensure_output_dir().await?;

        if let Err(err) = Self::write_and_rename(&temp_path, &final_path, &document.content).await {
            if let Err(e) = fs::remove_file(&temp_path).await {
                tracing::debug!("No temp file to clean up at {}: {}", temp_path.display(), e);
            }
            tracing::warn!("Failed to save {}: {}", final_path.display(), err);
            return Err(err);
        }

        tracing::info!("Saved {} ({} bytes)", final_path.display(), size);

        Ok(SavedArtifact {
            path: final_path,
            size_bytes: size,
            checksum: Self::compute_checksum(&document.content),
        })
    }
}
