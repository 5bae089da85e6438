//! Application paths.
//!
//! - data:   <data_dir>/livepreview/logs
//! - config: <config_dir>/livepreview/settings.json
//!
//! `data_dir`/`config_dir` come from `dirs` (XDG on Linux, Application Support on macOS,
//! %APPDATA% on Windows).

use std::path::{Path, PathBuf};

pub(crate) const APP_NAME: &str = "livepreview";
pub(crate) const LOG_DIR: &str = "logs";
pub(crate) const SETTINGS_FILE: &str = "settings.json";

fn get_app_data_dir() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join(APP_NAME))
}

pub fn get_log_dir() -> Option<PathBuf> {
    get_app_data_dir().map(|p| p.join(LOG_DIR))
}

pub fn get_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(APP_NAME).join(SETTINGS_FILE))
}

fn ensure_dir(dir: Option<PathBuf>, what: &str) -> std::io::Result<PathBuf> {
    let dir = dir.ok_or_else(|| {
        std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("Cannot determine {what} directory"),
        )
    })?;

    if !dir.exists() {
        std::fs::create_dir_all(&dir)?;
    }

    Ok(dir)
}

pub fn ensure_log_dir() -> std::io::Result<PathBuf> {
    ensure_dir(get_log_dir(), "log")
}

pub(crate) fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Canonical form of a path that may not exist yet (its parent must).
pub(crate) fn normalize(path: &Path) -> PathBuf {
    if let Ok(canonical) = path.canonicalize() {
        return canonical;
    }
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    match (parent.canonicalize(), path.file_name()) {
        (Ok(parent), Some(name)) => parent.join(name),
        _ => path.to_path_buf(),
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/paths.rs"]
mod tests;
