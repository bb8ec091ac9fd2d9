//! CLI subcommands and shared helpers.

pub mod batch;
pub mod config;
pub mod output;
pub mod process;

use std::path::{Path, PathBuf};

use tracing::debug;

use iwb_core::error::SourceError;
use iwb_core::models::config::IwbConfig;
use iwb_core::{DocumentHandle, DocumentSource, FileSource};

use crate::fetch::HttpSource;

/// Default location of the configuration file.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("iwb")
        .join("config.json")
}

/// Load the configuration named on the command line, else the default file
/// if it exists, else built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<IwbConfig> {
    if let Some(path) = config_path {
        return Ok(IwbConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(IwbConfig::from_file(&default_path)?)
    } else {
        Ok(IwbConfig::default())
    }
}

/// Retrieve a document and recover its flattened text.
pub async fn load_text(handle: &DocumentHandle, config: &IwbConfig) -> Result<String, SourceError> {
    match handle {
        DocumentHandle::Path(_) => {
            FileSource::new(config.fetch.clone(), config.document.clone()).fetch_text(handle)
        }
        DocumentHandle::Url(url) => {
            let source = HttpSource::new(&config.fetch)?;
            let document = source.fetch(url).await?;
            Ok(document.into_text(&config.document)?)
        }
    }
}

/// Turn a source failure into a message that says which stage failed.
pub fn describe_source_error(handle: &DocumentHandle, err: SourceError) -> anyhow::Error {
    match err {
        SourceError::Fetch(e) => anyhow::anyhow!("Could not retrieve {}: {}", handle, e),
        SourceError::TextExtraction(e) => anyhow::anyhow!("Could not read text from {}: {}", handle, e),
    }
}
