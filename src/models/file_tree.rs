//! 文件树数据模型
//!
//! 树是不可变快照：所有结构操作接收 `&self`，返回新的 `FileTree`。
//! - `id` 是身份（移动、重命名后保持不变）
//! - `path` 是派生字段，由每个结构操作负责重算
//! - 找不到节点、非法移动等情况一律返回原树（`try_*` 版本返回具体错误）

use compact_str::CompactString;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(Uuid);

impl NodeId {
    /// 分配新的身份；随机 UUID，删除后不会被复用
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    File,
    Folder,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropPosition {
    Before,
    After,
    Inside,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FileTreeError {
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    #[error("parent {0} is not a folder")]
    ParentNotFolder(NodeId),
    #[error("cannot move node into its own subtree")]
    MoveIntoDescendant,
    #[error("node id {0} already exists")]
    DuplicateId(NodeId),
}

/// 文件携带内容，文件夹携带有序子节点，二者互斥
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NodeBody {
    File {
        #[serde(default)]
        content: String,
    },
    Folder {
        #[serde(default)]
        children: Vec<FileNode>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileNode {
    id: NodeId,
    name: CompactString,
    #[serde(default)]
    path: String,
    #[serde(flatten)]
    body: NodeBody,
}

impl FileNode {
    pub fn file(name: impl Into<CompactString>, content: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: NodeId::new(),
            path: name.to_string(),
            name,
            body: NodeBody::File {
                content: content.into(),
            },
        }
    }

    pub fn folder(name: impl Into<CompactString>) -> Self {
        Self::folder_with(name, Vec::new())
    }

    pub fn folder_with(name: impl Into<CompactString>, children: Vec<FileNode>) -> Self {
        let name = name.into();
        let mut node = Self {
            id: NodeId::new(),
            path: String::new(),
            name,
            body: NodeBody::Folder { children },
        };
        assign_paths(&mut node, "");
        node
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn body(&self) -> &NodeBody {
        &self.body
    }

    pub fn kind(&self) -> NodeKind {
        match self.body {
            NodeBody::File { .. } => NodeKind::File,
            NodeBody::Folder { .. } => NodeKind::Folder,
        }
    }

    pub fn is_folder(&self) -> bool {
        self.kind() == NodeKind::Folder
    }

    pub fn content(&self) -> Option<&str> {
        match &self.body {
            NodeBody::File { content } => Some(content),
            NodeBody::Folder { .. } => None,
        }
    }

    pub fn children(&self) -> Option<&[FileNode]> {
        match &self.body {
            NodeBody::File { .. } => None,
            NodeBody::Folder { children } => Some(children),
        }
    }

    /// 小写扩展名（不含点）；没有扩展名或以点开头的隐藏文件返回 None
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    /// 在以自身为根的子树中查找
    pub fn find(&self, id: NodeId) -> Option<&FileNode> {
        self.iter().find(|n| n.id == id)
    }

    /// 深拷贝子树，并为其中每个节点分配新的 id
    pub fn duplicate(&self) -> FileNode {
        let body = match &self.body {
            NodeBody::File { content } => NodeBody::File {
                content: content.clone(),
            },
            NodeBody::Folder { children } => NodeBody::Folder {
                children: children.iter().map(FileNode::duplicate).collect(),
            },
        };
        FileNode {
            id: NodeId::new(),
            name: self.name.clone(),
            path: self.path.clone(),
            body,
        }
    }

    fn parent_prefix(&self) -> String {
        self.path
            .strip_suffix(self.name.as_str())
            .unwrap_or_default()
            .to_string()
    }
}

/// 结构操作的字段合并；文件夹上的 `content` 会被忽略
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NodePatch {
    pub name: Option<CompactString>,
    pub content: Option<String>,
}

impl NodePatch {
    pub fn rename(name: impl Into<CompactString>) -> Self {
        Self {
            name: Some(name.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            name: None,
            content: Some(content.into()),
        }
    }
}

/// 有序、有根的文件树；根是隐式的，`roots` 是根的子节点
///
/// 序列化为节点数组；反序列化时重算所有 `path`，持久化数据中的 `path` 只作参考
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FileNode>", into = "Vec<FileNode>")]
pub struct FileTree {
    roots: Vec<FileNode>,
}

impl From<Vec<FileNode>> for FileTree {
    fn from(nodes: Vec<FileNode>) -> Self {
        Self::from_nodes(nodes)
    }
}

impl From<FileTree> for Vec<FileNode> {
    fn from(tree: FileTree) -> Self {
        tree.roots
    }
}

impl FileTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_nodes(nodes: Vec<FileNode>) -> Self {
        let mut roots = nodes;
        for node in &mut roots {
            assign_paths(node, "");
        }
        Self { roots }
    }

    pub fn roots(&self) -> &[FileNode] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    pub fn find_by_id(&self, id: NodeId) -> Option<&FileNode> {
        self.iter().find(|n| n.id == id)
    }

    pub fn find_by_path(&self, path: &str) -> Option<&FileNode> {
        self.iter().find(|n| n.path == path)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.find_by_id(id).is_some()
    }

    /// 父节点 id；根层节点或不存在的节点返回 None
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.iter()
            .find(|n| n.children().is_some_and(|c| c.iter().any(|child| child.id == id)))
            .map(|n| n.id)
    }

    pub fn try_create(
        &self,
        parent: Option<NodeId>,
        node: FileNode,
    ) -> Result<FileTree, FileTreeError> {
        let mut existing = self.ids();
        for incoming in node.iter() {
            if !existing.insert(incoming.id) {
                return Err(FileTreeError::DuplicateId(incoming.id));
            }
        }

        let mut tree = self.clone();
        let mut node = node;
        match parent {
            None => {
                assign_paths(&mut node, "");
                tree.roots.push(node);
            }
            Some(parent_id) => {
                let parent = find_mut(&mut tree.roots, parent_id)
                    .ok_or(FileTreeError::NodeNotFound(parent_id))?;
                let prefix = format!("{}/", parent.path);
                match &mut parent.body {
                    NodeBody::Folder { children } => {
                        assign_paths(&mut node, &prefix);
                        children.push(node);
                    }
                    NodeBody::File { .. } => return Err(FileTreeError::ParentNotFolder(parent_id)),
                }
            }
        }
        Ok(tree)
    }

    pub fn create(&self, parent: Option<NodeId>, node: FileNode) -> FileTree {
        self.or_unchanged("create", self.try_create(parent, node))
    }

    pub fn try_remove(&self, id: NodeId) -> Result<FileTree, FileTreeError> {
        let mut tree = self.clone();
        let (siblings, index) =
            locate_mut(&mut tree.roots, id).ok_or(FileTreeError::NodeNotFound(id))?;
        siblings.remove(index);
        Ok(tree)
    }

    pub fn remove(&self, id: NodeId) -> FileTree {
        self.or_unchanged("remove", self.try_remove(id))
    }

    pub fn try_update(&self, id: NodeId, patch: NodePatch) -> Result<FileTree, FileTreeError> {
        let mut tree = self.clone();
        let node = find_mut(&mut tree.roots, id).ok_or(FileTreeError::NodeNotFound(id))?;

        if let Some(new_content) = patch.content {
            if let NodeBody::File { content } = &mut node.body {
                *content = new_content;
            }
        }

        if let Some(name) = patch.name {
            if name != node.name {
                let prefix = node.parent_prefix();
                node.name = name;
                assign_paths(node, &prefix);
            }
        }

        Ok(tree)
    }

    pub fn update(&self, id: NodeId, patch: NodePatch) -> FileTree {
        self.or_unchanged("update", self.try_update(id, patch))
    }

    pub fn rename(&self, id: NodeId, name: impl Into<CompactString>) -> FileTree {
        self.update(id, NodePatch::rename(name))
    }

    pub fn set_content(&self, id: NodeId, content: impl Into<String>) -> FileTree {
        self.update(id, NodePatch::content(content))
    }

    pub fn try_move(
        &self,
        dragged: NodeId,
        target: NodeId,
        position: DropPosition,
    ) -> Result<FileTree, FileTreeError> {
        if dragged == target {
            return Err(FileTreeError::MoveIntoDescendant);
        }

        let dragged_node = self
            .find_by_id(dragged)
            .ok_or(FileTreeError::NodeNotFound(dragged))?;
        let target_node = self
            .find_by_id(target)
            .ok_or(FileTreeError::NodeNotFound(target))?;
        if dragged_node.find(target).is_some() {
            return Err(FileTreeError::MoveIntoDescendant);
        }

        let position = match position {
            DropPosition::Inside if !target_node.is_folder() => DropPosition::After,
            other => other,
        };

        let mut tree = self.clone();
        let mut moving = {
            let (siblings, index) = locate_mut(&mut tree.roots, dragged)
                .ok_or(FileTreeError::NodeNotFound(dragged))?;
            siblings.remove(index)
        };

        match position {
            DropPosition::Inside => {
                let folder =
                    find_mut(&mut tree.roots, target).ok_or(FileTreeError::NodeNotFound(target))?;
                let prefix = format!("{}/", folder.path);
                match &mut folder.body {
                    NodeBody::Folder { children } => {
                        assign_paths(&mut moving, &prefix);
                        children.push(moving);
                    }
                    NodeBody::File { .. } => return Err(FileTreeError::ParentNotFolder(target)),
                }
            }
            DropPosition::Before | DropPosition::After => {
                let (siblings, index) = locate_mut(&mut tree.roots, target)
                    .ok_or(FileTreeError::NodeNotFound(target))?;
                let prefix = siblings[index].parent_prefix();
                assign_paths(&mut moving, &prefix);
                let at = if position == DropPosition::Before {
                    index
                } else {
                    index + 1
                };
                siblings.insert(at, moving);
            }
        }

        Ok(tree)
    }

    pub fn move_node(&self, dragged: NodeId, target: NodeId, position: DropPosition) -> FileTree {
        self.or_unchanged("move", self.try_move(dragged, target, position))
    }

    /// 自底向上删除所有空文件夹（只在工作流检查点调用）
    pub fn prune_empty_folders(&self) -> FileTree {
        let mut tree = self.clone();
        prune(&mut tree.roots);
        tree
    }

    fn or_unchanged(&self, op: &'static str, result: Result<FileTree, FileTreeError>) -> FileTree {
        match result {
            Ok(tree) => tree,
            Err(err) => {
                tracing::debug!(op, error = %err, "file tree operation ignored");
                self.clone()
            }
        }
    }
}

fn assign_paths(node: &mut FileNode, prefix: &str) {
    node.path = format!("{prefix}{}", node.name);
    if let NodeBody::Folder { children } = &mut node.body {
        let child_prefix = format!("{}/", node.path);
        for child in children {
            assign_paths(child, &child_prefix);
        }
    }
}

fn find_mut(nodes: &mut [FileNode], id: NodeId) -> Option<&mut FileNode> {
    for node in nodes.iter_mut() {
        if node.id == id {
            return Some(node);
        }
        if let NodeBody::Folder { children } = &mut node.body {
            if let Some(found) = find_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

/// 返回包含 `id` 的兄弟列表及其下标
fn locate_mut(nodes: &mut Vec<FileNode>, id: NodeId) -> Option<(&mut Vec<FileNode>, usize)> {
    if let Some(index) = nodes.iter().position(|n| n.id == id) {
        return Some((nodes, index));
    }
    for node in nodes.iter_mut() {
        if let NodeBody::Folder { children } = &mut node.body {
            if let Some(found) = locate_mut(children, id) {
                return Some(found);
            }
        }
    }
    None
}

fn prune(nodes: &mut Vec<FileNode>) {
    nodes.retain_mut(|node| match &mut node.body {
        NodeBody::File { .. } => true,
        NodeBody::Folder { children } => {
            prune(children);
            !children.is_empty()
        }
    });
}

#[cfg(test)]
#[path = "../../tests/unit/models/file_tree.rs"]
mod tests;
