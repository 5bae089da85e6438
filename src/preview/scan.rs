//! Asset discovery.
//!
//! Collection order is pre-order, child order. It is also the injection order, so
//! scripts run in the order they are scanned.

use crate::kernel::services::ports::PreviewConfig;
use crate::models::{FileNode, FileTree, WalkControl};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AssetKind {
    Html,
    Css,
    Js,
}

pub fn classify(node: &FileNode, config: &PreviewConfig) -> Option<AssetKind> {
    node.content()?;
    let ext = node.extension()?;
    let matches = |exts: &[String]| exts.iter().any(|e| e.eq_ignore_ascii_case(&ext));

    if matches(&config.html_extensions) {
        Some(AssetKind::Html)
    } else if matches(&config.css_extensions) {
        Some(AssetKind::Css)
    } else if matches(&config.js_extensions) {
        Some(AssetKind::Js)
    } else {
        None
    }
}

#[derive(Debug, Default)]
pub struct AssetScan<'a> {
    pub html: Vec<&'a FileNode>,
    pub css: Vec<&'a FileNode>,
    pub js: Vec<&'a FileNode>,
}

impl<'a> AssetScan<'a> {
    /// Configured entry names win in their configured order; otherwise the first html file.
    pub fn select_entry(&self, config: &PreviewConfig) -> Option<&'a FileNode> {
        config
            .entry_names
            .iter()
            .find_map(|entry| {
                self.html
                    .iter()
                    .find(|n| n.name().eq_ignore_ascii_case(entry))
            })
            .or_else(|| self.html.first())
            .copied()
    }
}

pub fn scan<'a>(tree: &'a FileTree, config: &PreviewConfig) -> AssetScan<'a> {
    let mut assets = AssetScan::default();

    tree.walk(|node, _depth| {
        if node.is_folder() {
            if config.is_excluded_dir(node.name()) {
                return WalkControl::SkipChildren;
            }
            return WalkControl::Continue;
        }

        match classify(node, config) {
            Some(AssetKind::Html) => assets.html.push(node),
            Some(AssetKind::Css) => assets.css.push(node),
            Some(AssetKind::Js) => assets.js.push(node),
            None => {}
        }
        WalkControl::Continue
    });

    assets
}

#[cfg(test)]
#[path = "../../tests/unit/preview/scan.rs"]
mod tests;
