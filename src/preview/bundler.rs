use super::fingerprint::fingerprint;
use super::inject::{inject, script_block, style_block};
use super::scan::scan;
use crate::kernel::services::ports::PreviewConfig;
use crate::models::{FileNode, FileTree};
use std::time::SystemTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bundle {
    /// Self-contained document; empty when the tree has no html entry point.
    pub html: String,
    pub css_files: Vec<String>,
    pub js_files: Vec<String>,
    /// Path of the selected entry document.
    pub entry: Option<String>,
    /// Differs from the previous bundle produced by the same bundler.
    pub changed: bool,
    pub fingerprint: Option<u64>,
    /// Per-bundler pass counter, starting at 1.
    pub sequence: u64,
    pub timestamp: SystemTime,
}

impl Bundle {
    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }
}

/// Turns a file tree into one renderable document and tracks whether it changed.
///
/// Each project owns its own bundler; the previous fingerprint is private state.
pub struct PreviewBundler {
    config: PreviewConfig,
    last_fingerprint: Option<u64>,
    previous: Option<Bundle>,
    sequence: u64,
}

impl PreviewBundler {
    pub fn new(config: PreviewConfig) -> Self {
        Self {
            config,
            last_fingerprint: None,
            previous: None,
            sequence: 0,
        }
    }

    pub fn config(&self) -> &PreviewConfig {
        &self.config
    }

    pub fn previous(&self) -> Option<&Bundle> {
        self.previous.as_ref()
    }

    /// Forget the previous pass; the next bundle reports `changed` if it is non-empty.
    pub fn reset(&mut self) {
        self.last_fingerprint = None;
        self.previous = None;
    }

    pub fn bundle(&mut self, tree: &FileTree) -> Bundle {
        let assets = scan(tree, &self.config);
        self.sequence += 1;

        let bundle = match assets.select_entry(&self.config) {
            None => Bundle {
                html: String::new(),
                css_files: Vec::new(),
                js_files: Vec::new(),
                entry: None,
                changed: self.last_fingerprint.is_some(),
                fingerprint: None,
                sequence: self.sequence,
                timestamp: SystemTime::now(),
            },
            Some(entry) => {
                let fp = fingerprint(entry, &assets.css, &assets.js);
                let styles = join_blocks(&assets.css, style_block);
                let scripts = join_blocks(&assets.js, script_block);
                let html = inject(entry.content().unwrap_or_default(), &styles, &scripts);

                Bundle {
                    html,
                    css_files: names(&assets.css),
                    js_files: names(&assets.js),
                    entry: Some(entry.path().to_string()),
                    changed: self.last_fingerprint != Some(fp),
                    fingerprint: Some(fp),
                    sequence: self.sequence,
                    timestamp: SystemTime::now(),
                }
            }
        };

        tracing::debug!(
            sequence = bundle.sequence,
            entry = bundle.entry.as_deref().unwrap_or("-"),
            css = bundle.css_files.len(),
            js = bundle.js_files.len(),
            changed = bundle.changed,
            "preview bundle"
        );

        self.last_fingerprint = bundle.fingerprint;
        self.previous = Some(bundle.clone());
        bundle
    }
}

fn join_blocks(nodes: &[&FileNode], block: fn(&str, &str) -> String) -> String {
    nodes
        .iter()
        .map(|n| block(n.name(), n.content().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("\n")
}

fn names(nodes: &[&FileNode]) -> Vec<String> {
    nodes.iter().map(|n| n.name().to_string()).collect()
}

#[cfg(test)]
#[path = "../../tests/unit/preview/bundler.rs"]
mod tests;
