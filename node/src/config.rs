//! Node configuration with TOML file support.

use crate::NodeError;
use heirloom_types::ProtocolParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Configuration for a Heirloom node.
///
/// Can be loaded from a TOML file via [`NodeConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NodeConfig {
    /// Identity the estate creation fee is routed to.
    #[serde(default = "default_treasury")]
    pub treasury: String,

    /// Directory for snapshot persistence.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Protocol parameters; omitted fields fall back wholesale to the
    /// mainnet defaults.
    #[serde(default)]
    pub params: ProtocolParams,

    /// Log format: "human" or "json".
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Write a registry snapshot on shutdown.
    #[serde(default)]
    pub snapshot_on_shutdown: bool,
}

impl NodeConfig {
    pub fn from_toml_file(path: &Path) -> Result<Self, NodeError> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| NodeError::Config(format!("{}: {e}", path.display())))
    }

    /// Default path of the snapshot file inside `data_dir`.
    pub fn snapshot_path(&self) -> PathBuf {
        self.data_dir.join("registry.snapshot")
    }
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            treasury: default_treasury(),
            data_dir: default_data_dir(),
            params: ProtocolParams::default(),
            log_format: default_log_format(),
            log_level: default_log_level(),
            snapshot_on_shutdown: false,
        }
    }
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_treasury() -> String {
    "heirloom-treasury".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./heirloom_data")
}

fn default_log_format() -> String {
    "human".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
