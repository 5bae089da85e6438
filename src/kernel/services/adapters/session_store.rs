//! Session persistence.
//!
//! A session is the file tree plus every document history, written as one JSON file.
//! Writes go to a sibling temp file first and are renamed into place.

use super::paths::ensure_parent;
use crate::models::{DocumentHistory, FileTree, NodeId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const SESSION_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub version: u32,
    pub tree: FileTree,
    #[serde(default)]
    pub histories: FxHashMap<NodeId, DocumentHistory>,
}

impl Session {
    pub fn new(tree: FileTree, histories: FxHashMap<NodeId, DocumentHistory>) -> Self {
        Self {
            version: SESSION_VERSION,
            tree,
            histories,
        }
    }
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("session format error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("unsupported session version {0}")]
    UnsupportedVersion(u32),
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn save_session(path: &Path, session: &Session) -> Result<(), SessionError> {
    ensure_parent(path)?;
    let data = serde_json::to_vec(session)?;
    let tmp = temp_path(path);
    std::fs::write(&tmp, data)?;
    std::fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), "session saved");
    Ok(())
}

pub fn load_session(path: &Path) -> Result<Session, SessionError> {
    let data = std::fs::read(path)?;
    let session: Session = serde_json::from_slice(&data)?;
    if session.version > SESSION_VERSION {
        return Err(SessionError::UnsupportedVersion(session.version));
    }
    Ok(session)
}

pub fn load_session_if_exists(path: &Path) -> Result<Option<Session>, SessionError> {
    if !path.exists() {
        return Ok(None);
    }
    load_session(path).map(Some)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/session_store.rs"]
mod tests;
