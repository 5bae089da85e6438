use super::paths::{ensure_parent, get_settings_path};
use crate::kernel::services::ports::settings::Settings;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot determine settings directory")]
    NoConfigDir,
}

pub fn ensure_settings_file() -> Result<PathBuf, SettingsError> {
    let path = get_settings_path().ok_or(SettingsError::NoConfigDir)?;
    write_default_if_missing(&path)?;
    Ok(path)
}

pub fn write_default_if_missing(path: &Path) -> Result<(), SettingsError> {
    if path.exists() {
        return Ok(());
    }
    ensure_parent(path)?;
    let content = serde_json::to_string_pretty(&Settings::default())?;
    std::fs::write(path, content)?;
    Ok(())
}

pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let data = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&data)?)
}

/// User settings, or defaults when the file is missing or unreadable.
pub fn load_settings() -> Settings {
    let Some(path) = get_settings_path() else {
        return Settings::default();
    };
    if !path.exists() {
        return Settings::default();
    }
    match load_settings_from(&path) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!(path = %path.display(), error = %err, "failed to load settings, using defaults");
            Settings::default()
        }
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/settings.rs"]
mod tests;
