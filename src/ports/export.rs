//! Export Port - Rendering report content to downloadable files.
//!
//! The domain describes what an export contains (`ReportDocument`,
//! `Workbook`); renderers turn that content into bytes. Both renderers run
//! in-process, so there is no availability check.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::report::{ReportDocument, Workbook};

/// Renders a titled list of lines as a paginated document.
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// # Errors
    ///
    /// Returns `ExportError::RenderFailed` if the document cannot be laid out.
    async fn render_document(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError>;
}

/// Renders a multi-sheet workbook.
#[async_trait]
pub trait WorkbookRenderer: Send + Sync {
    async fn render_workbook(&self, workbook: &Workbook) -> Result<Vec<u8>, ExportError>;
}

/// Export formats produced by the renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    Pdf,
    Xlsx,
}

impl ExportFormat {
    /// Get the MIME content type for this format.
    pub fn content_type(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }

    /// Get the file extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Xlsx => "xlsx",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pdf" => Ok(ExportFormat::Pdf),
            "xlsx" => Ok(ExportFormat::Xlsx),
            _ => Err(ExportError::UnsupportedFormat(s.to_string())),
        }
    }
}

/// Exported file with content and metadata.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    /// The exported content as bytes.
    pub content: Vec<u8>,
    /// The MIME content type.
    pub content_type: String,
    /// Filename used for download and on disk.
    pub filename: String,
    pub format: ExportFormat,
}

impl ExportedDocument {
    pub fn new(content: Vec<u8>, format: ExportFormat, base_filename: &str) -> Self {
        Self {
            content,
            content_type: format.content_type().to_string(),
            filename: format!("{}.{}", base_filename, format.extension()),
            format,
        }
    }
}

/// Errors that can occur while exporting.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    /// The renderer could not produce the file.
    #[error("{format} rendering failed: {reason}")]
    RenderFailed { format: ExportFormat, reason: String },

    /// Writing the rendered file to disk failed.
    #[error("I/O error during export: {0}")]
    Io(String),

    #[error("Invalid export filename: {0}")]
    InvalidFilename(String),
}

impl ExportError {
    pub fn render_failed(format: ExportFormat, reason: impl Into<String>) -> Self {
        Self::RenderFailed {
            format,
            reason: reason.into(),
        }
    }

    pub fn io(reason: impl Into<String>) -> Self {
        Self::Io(reason.into())
    }
}
