use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::error::{CreateFolderError, FetchError};
use crate::node::{Node, NodeId};
use crate::sort::{SortCriterion, sort_nodes};

/// External data layer the picker browses.
///
/// The session itself is sans-IO (see [`crate::FetchRequest`]); this trait only backs the
/// `*_with` convenience drivers on [`crate::PickerSession`].
#[allow(async_fn_in_trait)]
pub trait NodeSource {
    /// Top-level roots, in display order.
    async fn fetch_roots(&self) -> Result<Vec<Node>, FetchError>;
    /// Children of `folder`, sorted by `sort`.
    async fn fetch_children(
        &self,
        folder: &NodeId,
        sort: SortCriterion,
    ) -> Result<Vec<Node>, FetchError>;
    /// Path from a root down to `node`, root first.
    async fn fetch_path(&self, node: &NodeId) -> Result<Vec<Node>, FetchError>;
    /// Create folder `name` inside `parent` and return the created node.
    async fn create_folder(&self, parent: &NodeId, name: &str) -> Result<Node, CreateFolderError>;
}

/// In-memory tree implementing [`NodeSource`].
#[derive(Debug, Default)]
pub struct MemorySource {
    nodes: RefCell<HashMap<NodeId, Node>>,
    order: RefCell<Vec<NodeId>>,
    broken: RefCell<HashSet<NodeId>>,
    next_id: Cell<u64>,
}

impl MemorySource {
    /// Empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tree pre-populated with `nodes`.
    pub fn with_nodes(nodes: impl IntoIterator<Item = Node>) -> Self {
        let source = Self::new();
        for node in nodes {
            source.insert(node);
        }
        source
    }

    /// Add or replace a node.
    pub fn insert(&self, node: Node) {
        let mut nodes = self.nodes.borrow_mut();
        if !nodes.contains_key(&node.id) {
            self.order.borrow_mut().push(node.id.clone());
        }
        nodes.insert(node.id.clone(), node);
    }

    /// Look up a node.
    pub fn get(&self, id: &NodeId) -> Option<Node> {
        self.nodes.borrow().get(id).cloned()
    }

    /// Make listing `folder` fail with a transport error until [`Self::repair`] is called.
    pub fn break_listing(&self, folder: impl Into<NodeId>) {
        self.broken.borrow_mut().insert(folder.into());
    }

    /// Undo [`Self::break_listing`].
    pub fn repair(&self, folder: &NodeId) {
        self.broken.borrow_mut().remove(folder);
    }

    fn children_of(&self, parent: Option<&NodeId>) -> Vec<Node> {
        let nodes = self.nodes.borrow();
        self.order
            .borrow()
            .iter()
            .filter_map(|id| nodes.get(id))
            .filter(|n| n.parent_id.as_ref() == parent)
            .cloned()
            .collect()
    }
}

impl NodeSource for MemorySource {
    async fn fetch_roots(&self) -> Result<Vec<Node>, FetchError> {
        Ok(self.children_of(None))
    }

    async fn fetch_children(
        &self,
        folder: &NodeId,
        sort: SortCriterion,
    ) -> Result<Vec<Node>, FetchError> {
        let node = self
            .get(folder)
            .ok_or_else(|| FetchError::NotFound(folder.clone()))?;
        if !node.is_container() {
            return Err(FetchError::NotFound(folder.clone()));
        }
        if self.broken.borrow().contains(folder) {
            return Err(FetchError::Transport(format!("listing {folder} failed")));
        }
        let mut children = self.children_of(Some(folder));
        sort_nodes(&mut children, sort);
        Ok(children)
    }

    async fn fetch_path(&self, node: &NodeId) -> Result<Vec<Node>, FetchError> {
        let nodes = self.nodes.borrow();
        let mut path = Vec::new();
        let mut cursor = Some(node.clone());
        while let Some(id) = cursor {
            if path.len() > nodes.len() {
                return Err(FetchError::Transport(format!("cyclic parent chain at {id}")));
            }
            let n = nodes.get(&id).ok_or(FetchError::NotFound(id))?;
            cursor = n.parent_id.clone();
            path.push(n.clone());
        }
        path.reverse();
        Ok(path)
    }

    async fn create_folder(&self, parent: &NodeId, name: &str) -> Result<Node, CreateFolderError> {
        let parent_node = self
            .get(parent)
            .ok_or_else(|| CreateFolderError::Other(format!("folder {parent} not found")))?;
        if !parent_node.can_write() {
            return Err(CreateFolderError::PermissionDenied);
        }
        let lowered = name.to_lowercase();
        let clash = self
            .children_of(Some(parent))
            .iter()
            .any(|n| n.name.to_lowercase() == lowered);
        if clash {
            return Err(CreateFolderError::DuplicateName(name.to_string()));
        }

        let seq = self.next_id.get() + 1;
        self.next_id.set(seq);
        let node = Node::folder(format!("{parent}/new-{seq}"), name)
            .with_parent(parent.clone())
            .with_updated_at(Utc::now());
        self.insert(node.clone());
        Ok(node)
    }
}
