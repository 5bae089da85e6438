//! 数据模型层

pub mod debounce;
pub mod document_history;
pub mod file_tree;
pub mod tree_walk;

pub use debounce::Debouncer;
pub use document_history::{DocumentHistory, HistoryConfig, HistoryStore};
pub use file_tree::{
    DropPosition, FileNode, FileTree, FileTreeError, NodeBody, NodeId, NodeKind, NodePatch,
};
pub use tree_walk::{walk_nodes, PreOrder, TreeStats, WalkControl};
