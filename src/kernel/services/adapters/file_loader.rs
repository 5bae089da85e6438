//! Reads a project directory from disk into a `FileTree`.

use super::paths::normalize;
use crate::kernel::services::ports::PreviewConfig;
use crate::models::{FileNode, FileTree};
use rustc_hash::FxHashSet;
use std::io;
use std::path::{Path, PathBuf};

pub fn should_ignore(name: &str) -> bool {
    matches!(
        name,
        ".DS_Store"
            | ".Spotlight-V100"
            | ".Trashes"
            | ".fseventsd"
            | ".TemporaryItems"
            | "Thumbs.db"
            | "desktop.ini"
            | ".git"
    )
}

/// Children are sorted by name so the scan order is reproducible across platforms.
/// Files that are not valid UTF-8 are skipped.
pub fn load_tree(root: &Path, config: &PreviewConfig) -> io::Result<FileTree> {
    load_tree_skipping(root, config, &[])
}

/// Like `load_tree`, but leaves out the given paths (e.g. a bundle output inside the project).
pub fn load_tree_skipping(
    root: &Path,
    config: &PreviewConfig,
    skip: &[PathBuf],
) -> io::Result<FileTree> {
    let root = root.canonicalize()?;
    let skip: FxHashSet<PathBuf> = skip.iter().map(|p| normalize(p)).collect();
    Ok(FileTree::from_nodes(load_dir(&root, config, &skip)?))
}

fn load_dir(
    path: &Path,
    config: &PreviewConfig,
    skip: &FxHashSet<PathBuf>,
) -> io::Result<Vec<FileNode>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(path)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().to_string();
        if should_ignore(&name) {
            continue;
        }
        let child_path = entry.path();
        if skip.contains(&child_path) {
            continue;
        }
        let is_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        entries.push((name, is_dir, child_path));
    }
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut nodes = Vec::with_capacity(entries.len());
    for (name, is_dir, child_path) in entries {
        if is_dir {
            if config.is_excluded_dir(&name) {
                continue;
            }
            let children = load_dir(&child_path, config, skip)?;
            nodes.push(FileNode::folder_with(name, children));
            continue;
        }

        match std::fs::read_to_string(&child_path) {
            Ok(content) => nodes.push(FileNode::file(name, content)),
            Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                tracing::warn!(path = %child_path.display(), "skipping non-UTF-8 file");
            }
            Err(err) => return Err(err),
        }
    }
    Ok(nodes)
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/file_loader.rs"]
mod tests;
