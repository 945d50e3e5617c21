//! Tool settings loading

use anyhow::Result;
use scenepanel_core::DEFAULT_CONFIG_PATH;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Main settings structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub source: SourceSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSettings {
    /// Path of the controller configuration document
    #[serde(default = "default_config_path")]
    pub path: PathBuf,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            path: default_config_path(),
        }
    }
}

fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

/// Load settings from file, falling back to defaults when it does not exist
pub fn load_settings(path: &Path) -> Result<Settings> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    } else {
        info!(
            path = %path.display(),
            "Settings file not found, using defaults"
        );
        Ok(Settings::default())
    }
}

/// Save default settings to file
pub fn save_default_settings(path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(&Settings::default())?;
    std::fs::write(path, content)?;
    Ok(())
}
