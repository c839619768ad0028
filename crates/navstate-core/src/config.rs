use crate::models::{ChannelKind, ChannelRecord};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Fallback data directory when the platform has no data dir
pub const DEFAULT_DATA_DIR: &str = "navstate_data";

/// Configuration loaded from a JSON file
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NavConfig {
    /// Directory holding the persisted documents
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Channel directory: `{ "id": ..., "type": "class" | "import" | ... }`
    #[serde(default)]
    pub channels: Vec<ChannelRecord>,
}

impl NavConfig {
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: Some(data_dir.as_ref().to_path_buf()),
            channels: Vec::new(),
        }
    }

    /// Load config from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: NavConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize config")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to deserialize config")
    }

    /// Configured data dir, else `<platform data dir>/navstate`, else
    /// [`DEFAULT_DATA_DIR`] relative to the working directory.
    pub fn resolved_data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|dir| dir.join("navstate"))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
        })
    }

    /// Channel directory keyed by id. Later records win on duplicate ids.
    pub fn channel_directory(&self) -> HashMap<String, ChannelKind> {
        self.channels
            .iter()
            .map(|record| (record.id.clone(), record.kind))
            .collect()
    }
}
