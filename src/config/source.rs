//! Source configuration definitions

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where to load the Swagger document from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SourceConfig {
    /// Local JSON or YAML file
    File { path: PathBuf },

    /// Remote document, fetched over HTTP(S)
    Url { url: String },
}

impl SourceConfig {
    /// Validate the source configuration
    pub fn validate(&self) -> Result<()> {
        match self {
            SourceConfig::File { path } => {
                if path.as_os_str().is_empty() {
                    return Err(anyhow!("Source file path cannot be empty"));
                }
            }
            SourceConfig::Url { url } => {
                if url.is_empty() {
                    return Err(anyhow!("Source URL cannot be empty"));
                }
                if !url.starts_with("http://") && !url.starts_with("https://") {
                    return Err(anyhow!("Invalid source URL format: {}", url));
                }
            }
        }
        Ok(())
    }

    /// Short human readable description
    pub fn describe(&self) -> String {
        match self {
            SourceConfig::File { path } => format!("file {}", path.display()),
            SourceConfig::Url { url } => format!("url {url}"),
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig::File {
            path: PathBuf::from("swagger.json"),
        }
    }
}
