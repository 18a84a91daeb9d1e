//! Runtime configuration, loaded from an optional YAML file

use crate::extract::{DEFAULT_HIGHLIGHT_CLOSE, DEFAULT_HIGHLIGHT_OPEN};
use crate::graph::Palette;
use crate::markers::DEFAULT_MARKER_PREFIX;
use crate::report::DEFAULT_CITATION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] serde_yaml::Error),
}

/// Which [`CaseStore`](crate::storage::CaseStore) backend to open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    /// One directory per case with a `Summary_<case>.json` record
    #[default]
    Json,
    /// A single `claimgraph.db` in the data directory
    Sqlite,
}

impl std::str::FromStr for StoreKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "sqlite" => Ok(Self::Sqlite),
            other => Err(format!("unknown store kind: {other}")),
        }
    }
}

/// Application settings. Every field is optional in the YAML file.
///
/// ```yaml
/// data_dir: /var/lib/claimgraph
/// store: sqlite
/// marker_prefix: 10UG
/// palette: [red, orange, lime]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub palette: Palette,
    pub marker_prefix: String,
    pub highlight_open: String,
    pub highlight_close: String,
    pub citation: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreKind::default(),
            palette: Palette::default(),
            marker_prefix: DEFAULT_MARKER_PREFIX.to_string(),
            highlight_open: DEFAULT_HIGHLIGHT_OPEN.to_string(),
            highlight_close: DEFAULT_HIGHLIGHT_CLOSE.to_string(),
            citation: DEFAULT_CITATION.to_string(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self, ConfigError> {
        // An empty document parses as null rather than an empty mapping
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_store(mut self, store: StoreKind) -> Self {
        self.store = store;
        self
    }
}

/// `<platform data dir>/claimgraph`, falling back to `~/.local/share`
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default().join(".local/share"))
        .join("claimgraph")
}
