//! Artifact Storage Port - Saving exported files to disk.
//!
//! Exports are "downloaded" by writing them under a fixed filename into a
//! configured directory. A second save of the same export replaces the first.

use async_trait::async_trait;
use std::path::PathBuf;

use super::export::{ExportError, ExportedDocument};

/// Port for persisting rendered exports.
///
/// # Contract
///
/// Implementations must:
/// - Write atomically (no partial file under the final name on failure)
/// - Report the SHA-256 checksum of the bytes written
#[async_trait]
pub trait ArtifactStorage: Send + Sync {
    async fn save(&self, document: &ExportedDocument) -> Result<SavedArtifact, ExportError>;
}

/// Where an export was written and what it contained.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub path: PathBuf,
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 of the content.
    pub checksum: String,
}
