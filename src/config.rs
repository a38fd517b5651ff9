use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Name the plugin is registered under in the host's configuration.
pub const PLUGIN_NAME: &str = "MyFileUtils";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse plugin config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Plugin options, read from the `plugins.MyFileUtils` section of the host
/// configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FileUtilsConfig {
    /// Open and close the resource before falling back to its file name, so
    /// unreadable resources fail instead of yielding an extension.
    pub probe_on_fallback: bool,
    /// Upper bound on the bytes `readFileContent` will load.
    pub max_content_bytes: Option<u64>,
}

impl FileUtilsConfig {
    /// Extracts the plugin section from a full host config document. A missing
    /// section yields the defaults.
    pub fn from_plugin_config(host_config: &Value) -> Result<Self, ConfigError> {
        match host_config.get("plugins").and_then(|p| p.get(PLUGIN_NAME)) {
            Some(section) => Ok(serde_json::from_value(section.clone())?),
            None => Ok(Self::default()),
        }
    }

    /// Loads a host config document (JSON) from disk.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let host_config: Value = serde_json::from_str(&content)?;
        Self::from_plugin_config(&host_config)
    }
}
