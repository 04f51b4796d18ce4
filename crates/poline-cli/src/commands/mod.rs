//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use poline_core::PolineConfig;
use tracing::debug;

/// Default configuration file location.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("poline")
        .join("config.json")
}

/// Resolve the configuration file path from the global `--config` flag.
pub fn config_path(config_path: Option<&str>) -> PathBuf {
    config_path.map(PathBuf::from).unwrap_or_else(default_config_path)
}

/// Load configuration: an explicit path must exist, the default path is
/// optional.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<PolineConfig> {
    match config_path {
        Some(path) => Ok(PolineConfig::from_file(Path::new(path))?),
        None => {
            let path = default_config_path();
            if path.exists() {
                debug!("Using configuration from {}", path.display());
                Ok(PolineConfig::from_file(&path)?)
            } else {
                Ok(PolineConfig::default())
            }
        }
    }
}
