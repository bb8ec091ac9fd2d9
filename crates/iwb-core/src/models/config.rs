//! Configuration structures for the extraction pipeline.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{IwbError, Result};

/// Main configuration for the iwb pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IwbConfig {
    /// Document retrieval configuration.
    pub fetch: FetchConfig,

    /// Text recovery configuration.
    pub document: DocumentConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// Document retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Request timeout for remote documents, in seconds.
    pub timeout_secs: u64,

    /// Largest document accepted, in bytes.
    pub max_bytes: u64,

    /// User-Agent sent with remote requests.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            max_bytes: 20 * 1024 * 1024,
            user_agent: format!("iwb/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Text recovery configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Collapse all whitespace runs to single spaces.
    pub normalize_whitespace: bool,

    /// Minimum recovered text length before the document counts as empty.
    pub min_text_length: usize,

    /// Pages expected per document; extra pages are logged, not rejected.
    pub max_pages: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            normalize_whitespace: true,
            min_text_length: 20,
            max_pages: 1,
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Fewer matched scalar fields than this marks a result as low confidence.
    pub min_found_fields: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            min_found_fields: 3,
        }
    }
}

impl IwbConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| IwbError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| IwbError::Config(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: IwbConfig = serde_json::from_str(r#"{"fetch": {"timeout_secs": 5}}"#).unwrap();
        assert_eq!(config.fetch.timeout_secs, 5);
        assert_eq!(config.fetch.max_bytes, 20 * 1024 * 1024);
        assert!(config.document.normalize_whitespace);
        assert_eq!(config.extraction.min_found_fields, 3);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = IwbConfig::default();
        config.document.min_text_length = 42;
        config.save(&path).unwrap();

        let loaded = IwbConfig::from_file(&path).unwrap();
        assert_eq!(loaded.document.min_text_length, 42);
        assert_eq!(loaded.fetch.timeout_secs, 15);
    }

    #[test]
    fn test_invalid_json_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{not json").unwrap();

        let err = IwbConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, IwbError::Config(ref msg) if msg.contains("config.json")));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = IwbConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, IwbError::Io(_)));
    }
}
