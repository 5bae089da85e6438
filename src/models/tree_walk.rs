//! 树遍历
//!
//! 前序、按子节点顺序遍历。打包器的资源扫描、统计和搜索都基于这里，
//! 遍历顺序就是"扫描顺序"。

use super::file_tree::{FileNode, FileTree, NodeId};
use rustc_hash::FxHashSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum WalkControl {
    Continue,
    /// 不进入当前节点的子节点
    SkipChildren,
    Stop,
}

/// 对一组兄弟节点做前序遍历，回调参数为 (节点, 深度)
pub fn walk_nodes<'a, F>(nodes: &'a [FileNode], mut visit: F)
where
    F: FnMut(&'a FileNode, usize) -> WalkControl,
{
    let mut stack: Vec<(&'a FileNode, usize)> = nodes.iter().rev().map(|n| (n, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        match visit(node, depth) {
            WalkControl::Stop => return,
            WalkControl::SkipChildren => continue,
            WalkControl::Continue => {}
        }

        if let Some(children) = node.children() {
            for child in children.iter().rev() {
                stack.push((child, depth + 1));
            }
        }
    }
}

/// 前序迭代器
pub struct PreOrder<'a> {
    stack: Vec<&'a FileNode>,
}

impl<'a> PreOrder<'a> {
    fn new(nodes: &'a [FileNode]) -> Self {
        Self {
            stack: nodes.iter().rev().collect(),
        }
    }
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = &'a FileNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        if let Some(children) = node.children() {
            self.stack.extend(children.iter().rev());
        }
        Some(node)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeStats {
    pub files: usize,
    pub folders: usize,
    pub total_bytes: usize,
    pub max_depth: usize,
}

impl FileNode {
    /// 以自身为根的前序迭代
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(std::slice::from_ref(self))
    }
}

impl FileTree {
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder::new(self.roots())
    }

    pub fn walk<'a, F>(&'a self, visit: F)
    where
        F: FnMut(&'a FileNode, usize) -> WalkControl,
    {
        walk_nodes(self.roots(), visit);
    }

    pub fn stats(&self) -> TreeStats {
        let mut stats = TreeStats::default();
        self.walk(|node, depth| {
            match node.content() {
                Some(content) => {
                    stats.files += 1;
                    stats.total_bytes += content.len();
                }
                None => stats.folders += 1,
            }
            stats.max_depth = stats.max_depth.max(depth);
            WalkControl::Continue
        });
        stats
    }

    /// 名称包含 `query`（不区分大小写）的节点，按扫描顺序返回
    pub fn search(&self, query: &str) -> Vec<&FileNode> {
        let needle = query.to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.iter()
            .filter(|n| n.name().to_lowercase().contains(&needle))
            .collect()
    }

    pub fn ids(&self) -> FxHashSet<NodeId> {
        self.iter().map(|n| n.id()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/models/tree_walk.rs"]
mod tests;
