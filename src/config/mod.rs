//! Configuration module for SearchAPI
//!
//! Handles loading and validating settings from YAML files and environment variables.
//! Settings are loaded once at start-up and handed to the components that need them.

mod settings;

pub use settings::*;

use crate::error::Result;
use std::path::PathBuf;
use tracing::info;

/// Load settings from the first settings file found, or use defaults
pub fn load() -> Result<Settings> {
    let mut settings = match locate_settings_file() {
        Some(path) => {
            info!("Loading settings from: {}", path.display());
            Settings::from_file(&path)?
        }
        None => {
            info!("No settings file found, using defaults");
            Settings::default()
        }
    };
    settings.merge_env();
    settings.validate()?;
    Ok(settings)
}

fn locate_settings_file() -> Option<PathBuf> {
    // Environment variable wins over the default locations
    if let Ok(path) = std::env::var("SEARCHAPI_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let mut paths = vec![
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/searchapi/settings.yml"),
    ];
    if let Some(dir) = dirs::config_dir() {
        paths.push(dir.join("searchapi/settings.yml"));
    }
    paths.into_iter().find(|p| p.exists())
}
