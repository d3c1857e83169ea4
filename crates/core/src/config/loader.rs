//! Build settings file loading

use super::schema::BuildSettings;
use crate::error::{Error, Result};
use std::path::Path;

/// Build settings wrapper
#[derive(Debug, Clone)]
pub struct Config {
    pub settings: BuildSettings,
    pub path: Option<String>,
}

impl Config {
    /// Load build settings from a file path or use defaults
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config_path = path.map(String::from).or_else(find_config_file);

        let settings = if let Some(ref p) = config_path {
            load_config_file(p)?
        } else {
            BuildSettings::default()
        };

        Ok(Self {
            settings,
            path: config_path,
        })
    }

    /// Stock settings only (no file)
    pub fn default() -> Self {
        Self {
            settings: BuildSettings::default(),
            path: None,
        }
    }
}

/// Find a settings file in standard locations
fn find_config_file() -> Option<String> {
    let candidates = [
        "passgen-android.toml",
        ".passgen-android.toml",
        ".config/passgen-android.toml",
    ];

    candidates
        .into_iter()
        .find(|candidate| Path::new(candidate).exists())
        .map(String::from)
}

/// Load and parse a TOML settings file
fn load_config_file(path: &str) -> Result<BuildSettings> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read settings file {}: {}", path, e)))?;

    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse settings file {}: {}", path, e)))
}
