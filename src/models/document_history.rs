//! 文档历史（撤销/重做）
//!
//! 每个文件身份一份历史，保存的是整份内容快照：
//! - `past`：旧快照，最旧的在前
//! - `future`：被撤销的快照，提交新内容时清空
//! - `last_committed`：最近一次提交的内容
//!
//! 输入中的实时内容先进入防抖器，静默期结束（或失焦/保存）才提交到历史。

use super::debounce::Debouncer;
use super::file_tree::{FileTree, NodeId};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// 静默多久后提交实时内容（毫秒）
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// 每个文档最多保留的撤销步数
pub const DEFAULT_MAX_ENTRIES: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    pub debounce_ms: u64,
    pub max_entries: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

impl HistoryConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHistory {
    past: Vec<String>,
    future: Vec<String>,
    last_committed: String,
}

impl DocumentHistory {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            past: Vec::new(),
            future: Vec::new(),
            last_committed: content.into(),
        }
    }

    pub fn last_committed(&self) -> &str {
        &self.last_committed
    }

    pub fn past(&self) -> &[String] {
        &self.past
    }

    pub fn future(&self) -> &[String] {
        &self.future
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// 内容未变化时不产生历史条目；返回是否真正提交
    pub fn commit(&mut self, content: String) -> bool {
        if content == self.last_committed {
            return false;
        }
        let previous = std::mem::replace(&mut self.last_committed, content);
        self.past.push(previous);
        self.future.clear();
        true
    }

    pub fn undo(&mut self) -> Option<String> {
        let previous = self.past.pop()?;
        let current = std::mem::replace(&mut self.last_committed, previous);
        self.future.push(current);
        Some(self.last_committed.clone())
    }

    pub fn redo(&mut self) -> Option<String> {
        let next = self.future.pop()?;
        let current = std::mem::replace(&mut self.last_committed, next);
        self.past.push(current);
        Some(self.last_committed.clone())
    }

    /// 丢弃最旧的快照，使 `past` 不超过 `max_entries`
    pub fn trim(&mut self, max_entries: usize) {
        if self.past.len() > max_entries {
            let excess = self.past.len() - max_entries;
            self.past.drain(..excess);
        }
    }
}

/// 一个项目内所有文档的历史
pub struct HistoryStore {
    config: HistoryConfig,
    docs: FxHashMap<NodeId, DocumentHistory>,
    live: Debouncer<NodeId, String>,
}

impl HistoryStore {
    pub fn new(config: HistoryConfig) -> Self {
        Self::with_histories(config, FxHashMap::default())
    }

    /// 从会话恢复
    pub fn with_histories(config: HistoryConfig, docs: FxHashMap<NodeId, DocumentHistory>) -> Self {
        let live = Debouncer::new(config.debounce());
        Self { config, docs, live }
    }

    pub fn config(&self) -> &HistoryConfig {
        &self.config
    }

    pub fn histories(&self) -> &FxHashMap<NodeId, DocumentHistory> {
        &self.docs
    }

    pub fn get(&self, id: NodeId) -> Option<&DocumentHistory> {
        self.docs.get(&id)
    }

    /// 首次见到某个文档时以当前内容作为 `last_committed`；已存在则保持不变
    pub fn open(&mut self, id: NodeId, current: &str) -> &DocumentHistory {
        self.docs
            .entry(id)
            .or_insert_with(|| DocumentHistory::new(current))
    }

    pub fn commit(&mut self, id: NodeId, content: String) -> bool {
        self.live.take(&id);
        self.commit_inner(id, content)
    }

    fn commit_inner(&mut self, id: NodeId, content: String) -> bool {
        let max_entries = self.config.max_entries;
        match self.docs.get_mut(&id) {
            Some(history) => {
                let committed = history.commit(content);
                if committed {
                    history.trim(max_entries);
                    tracing::debug!(%id, depth = history.past.len(), "history commit");
                }
                committed
            }
            None => {
                self.docs.insert(id, DocumentHistory::new(content));
                false
            }
        }
    }

    /// 记录未提交的实时内容
    pub fn record_live(&mut self, id: NodeId, content: String, now: Instant) {
        self.live.touch(id, content, now);
    }

    /// 实时内容优先，否则返回最近提交的内容
    pub fn live_content(&self, id: NodeId) -> Option<&str> {
        self.live
            .peek(&id)
            .map(String::as_str)
            .or_else(|| self.docs.get(&id).map(|h| h.last_committed()))
    }

    pub fn has_pending(&self, id: NodeId) -> bool {
        self.live.is_pending(&id)
    }

    pub fn next_deadline(&self, now: Instant) -> Option<Duration> {
        self.live.next_deadline(now)
    }

    /// 提交所有静默期已满的文档，返回产生了新历史条目的 id
    pub fn tick(&mut self, now: Instant) -> Vec<NodeId> {
        let due = self.live.due(now);
        self.commit_all(due)
    }

    pub fn flush(&mut self, id: NodeId) -> bool {
        match self.live.take(&id) {
            Some(content) => self.commit_inner(id, content),
            None => false,
        }
    }

    pub fn flush_all(&mut self) -> Vec<NodeId> {
        let pending = self.live.drain();
        self.commit_all(pending)
    }

    fn commit_all(&mut self, entries: Vec<(NodeId, String)>) -> Vec<NodeId> {
        entries
            .into_iter()
            .filter_map(|(id, content)| self.commit_inner(id, content).then_some(id))
            .collect()
    }

    /// 撤销前先提交该文档的实时内容，保证撤销的是最近一次编辑
    pub fn undo(&mut self, id: NodeId) -> Option<String> {
        self.flush(id);
        self.docs.get_mut(&id)?.undo()
    }

    pub fn redo(&mut self, id: NodeId) -> Option<String> {
        self.flush(id);
        self.docs.get_mut(&id)?.redo()
    }

    /// 实时内容与已提交内容不同
    fn has_uncommitted_change(&self, id: NodeId) -> bool {
        match (self.live.peek(&id), self.docs.get(&id)) {
            (Some(live), Some(history)) => live != history.last_committed(),
            _ => false,
        }
    }

    pub fn can_undo(&self, id: NodeId) -> bool {
        self.has_uncommitted_change(id)
            || self.docs.get(&id).is_some_and(DocumentHistory::can_undo)
    }

    pub fn can_redo(&self, id: NodeId) -> bool {
        !self.has_uncommitted_change(id)
            && self.docs.get(&id).is_some_and(DocumentHistory::can_redo)
    }

    pub fn forget(&mut self, id: NodeId) {
        self.docs.remove(&id);
        self.live.take(&id);
    }

    /// 树上内容与历史不一致的已跟踪文档（外部写入，例如 agent 的输出）：
    /// 先提交挂起的实时内容，再把树上的内容作为新的一步提交
    pub fn observe_tree(&mut self, tree: &FileTree) -> Vec<NodeId> {
        let changed: Vec<(NodeId, String)> = tree
            .iter()
            .filter_map(|node| {
                let content = node.content()?;
                let known = self.live_content(node.id())?;
                (known != content).then(|| (node.id(), content.to_string()))
            })
            .collect();

        let mut committed = Vec::new();
        for (id, content) in changed {
            let flushed = self.flush(id);
            if self.commit_inner(id, content) || flushed {
                committed.push(id);
            }
        }
        committed
    }

    /// 丢弃已不在树中的文档历史
    pub fn retain_tree(&mut self, tree: &FileTree) {
        let ids = tree.ids();
        let stale: Vec<NodeId> = self
            .docs
            .keys()
            .copied()
            .filter(|id| !ids.contains(id))
            .collect();
        for id in stale {
            self.forget(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/document_history.rs"]
mod tests;
