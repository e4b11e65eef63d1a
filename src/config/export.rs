//! Export configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;
use crate::domain::report::DEFAULT_DOCUMENT_TITLE;

/// Where saved exports go and how the document is titled
#[derive(Debug, Clone, Deserialize)]
pub struct ExportConfig {
    /// Directory that receives saved export files
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Title line of the prospect list document
    #[serde(default = "default_document_title")]
    pub document_title: String,
}

impl ExportConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(ValidationError::InvalidOutputDir);
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            document_title: default_document_title(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./exports")
}

fn default_document_title() -> String {
    DEFAULT_DOCUMENT_TITLE.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_config_defaults() {
        let config = ExportConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("./exports"));
        assert_eq!(config.document_title, "Daftar Prospek");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_output_dir_is_invalid() {
        let config = ExportConfig {
            output_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
