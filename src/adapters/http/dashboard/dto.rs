//! Data Transfer Objects for dashboard HTTP endpoints.
//!
//! Records, drafts and derived views serialize as-is; the DTOs here cover
//! the session, command results and errors.

use serde::{Deserialize, Serialize};

use crate::application::LoadReport;
use crate::domain::foundation::ErrorCode;
use crate::domain::session::Session;
use crate::ports::SavedArtifact;

// ════════════════════════════════════════════════════════════════════════════════
// Requests
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /api/session`.
///
/// The role stays a plain string so an unknown value is reported as an
/// invalid role rather than a body decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct SignInRequest {
    pub role: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// The signed-in role and what it may do.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionResponse {
    pub role: String,
    pub role_label: String,
    pub heading: String,
    pub can_write: bool,
    pub can_delete: bool,
    pub read_only: bool,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        let capabilities = session.capabilities();
        Self {
            role: session.role().as_str().to_string(),
            role_label: session.role().label().to_string(),
            heading: session.heading(),
            can_write: capabilities.can_write,
            can_delete: capabilities.can_delete,
            read_only: capabilities.is_read_only(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailedLoad {
    pub collection: String,
    pub message: String,
}

/// Row counts loaded at sign-in and any collections that failed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoadSummary {
    pub prospects: usize,
    pub activities: usize,
    pub failed: Vec<FailedLoad>,
}

impl From<&LoadReport> for LoadSummary {
    fn from(report: &LoadReport) -> Self {
        Self {
            prospects: report.prospects,
            activities: report.activities,
            failed: report
                .failures
                .iter()
                .map(|f| FailedLoad {
                    collection: f.collection.to_string(),
                    message: f.error.to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SignInResponse {
    pub session: SessionResponse,
    pub loaded: LoadSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteResponse {
    pub id: String,
    /// False when the row was already gone from the local list.
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SavedArtifactResponse {
    pub filename: String,
    pub path: String,
    pub size_bytes: u64,
    pub checksum: String,
}

impl From<&SavedArtifact> for SavedArtifactResponse {
    fn from(artifact: &SavedArtifact) -> Self {
        Self {
            filename: artifact
                .path
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
            path: artifact.path.to_string_lossy().to_string(),
            size_bytes: artifact.size_bytes,
            checksum: artifact.checksum.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthResponse {
    pub status: String,
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
