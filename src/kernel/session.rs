//! Project session: the current tree, its preview bundler and document histories.
//!
//! Every tree mutation rebundles immediately. History commits lag behind through the
//! debouncer, and autosave is debounced separately.

use crate::kernel::services::adapters::session_store::Session;
use crate::kernel::services::bus::{EventSender, PreviewEvent};
use crate::kernel::services::ports::Settings;
use crate::models::{Debouncer, FileTree, HistoryStore, NodeId};
use crate::preview::{Bundle, PreviewBundler};
use std::time::{Duration, Instant};

pub struct ProjectSession {
    tree: FileTree,
    bundler: PreviewBundler,
    history: HistoryStore,
    autosave: Debouncer<(), ()>,
    events: Option<EventSender>,
}

impl ProjectSession {
    pub fn new(tree: FileTree, settings: &Settings) -> Self {
        Self {
            tree,
            bundler: PreviewBundler::new(settings.preview.clone()),
            history: HistoryStore::new(settings.history.clone()),
            autosave: Debouncer::new(Duration::from_millis(settings.session.autosave_ms)),
            events: None,
        }
    }

    pub fn restore(session: Session, settings: &Settings) -> Self {
        let mut restored = Self::new(session.tree, settings);
        restored.history = HistoryStore::with_histories(settings.history.clone(), session.histories);
        restored
    }

    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    pub fn tree(&self) -> &FileTree {
        &self.tree
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn last_bundle(&self) -> Option<&Bundle> {
        self.bundler.previous()
    }

    pub fn rebundle(&mut self) -> Bundle {
        let bundle = self.bundler.bundle(&self.tree);
        self.emit(PreviewEvent::BundleReady(bundle.clone()));
        bundle
    }

    /// Applies a structural operation, e.g. `|t| t.move_node(a, b, DropPosition::Inside)`.
    pub fn apply<F>(&mut self, now: Instant, mutate: F) -> Bundle
    where
        F: FnOnce(&FileTree) -> FileTree,
    {
        let tree = mutate(&self.tree);
        self.replace_tree(tree, now)
    }

    /// Tracked documents whose on-tree content no longer matches their history (an agent
    /// write through `apply`) get that content committed as a new undo step.
    pub fn replace_tree(&mut self, tree: FileTree, now: Instant) -> Bundle {
        self.tree = tree;
        self.history.retain_tree(&self.tree);
        let committed = self.history.observe_tree(&self.tree);
        self.report_commits(&committed);
        self.autosave.touch((), (), now);
        self.rebundle()
    }

    /// Live edit from the editor: the tree updates now, the history entry after the quiet period.
    pub fn edit(&mut self, id: NodeId, content: String, now: Instant) -> Option<Bundle> {
        let current = self.tree.find_by_id(id)?.content()?;
        self.history.open(id, current);
        self.history.record_live(id, content.clone(), now);
        let tree = self.tree.set_content(id, content);
        Some(self.replace_tree(tree, now))
    }

    pub fn undo(&mut self, id: NodeId, now: Instant) -> Option<Bundle> {
        self.open_from_tree(id);
        let content = self.history.undo(id)?;
        let tree = self.tree.set_content(id, content);
        Some(self.replace_tree(tree, now))
    }

    pub fn redo(&mut self, id: NodeId, now: Instant) -> Option<Bundle> {
        self.open_from_tree(id);
        let content = self.history.redo(id)?;
        let tree = self.tree.set_content(id, content);
        Some(self.replace_tree(tree, now))
    }

    fn open_from_tree(&mut self, id: NodeId) {
        if let Some(content) = self.tree.find_by_id(id).and_then(|n| n.content()) {
            self.history.open(id, content);
        }
    }

    /// Commits live edits whose quiet period has elapsed.
    pub fn tick(&mut self, now: Instant) -> Vec<NodeId> {
        let committed = self.history.tick(now);
        self.report_commits(&committed);
        committed
    }

    /// Editor lost focus or saved: commit that document right away.
    pub fn blur(&mut self, id: NodeId) -> bool {
        let committed = self.history.flush(id);
        if committed {
            self.report_commits(&[id]);
        }
        committed
    }

    /// Checkpoint at the end of an agent run: prune empty folders and rebundle.
    pub fn finish_run(&mut self, now: Instant) -> Bundle {
        let pruned = self.tree.prune_empty_folders();
        self.replace_tree(pruned, now)
    }

    pub fn autosave_due(&mut self, now: Instant) -> bool {
        !self.autosave.due(now).is_empty()
    }

    /// Commits every pending edit and returns a persistable snapshot.
    pub fn snapshot(&mut self) -> Session {
        let committed = self.history.flush_all();
        self.report_commits(&committed);
        Session::new(self.tree.clone(), self.history.histories().clone())
    }

    fn report_commits(&self, ids: &[NodeId]) {
        if !ids.is_empty() {
            self.emit(PreviewEvent::HistoryCommitted { ids: ids.to_vec() });
        }
    }

    fn emit(&self, event: PreviewEvent) {
        if let Some(events) = &self.events {
            events.send(event);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/kernel/session.rs"]
mod tests;
