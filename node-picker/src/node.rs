use bitflags::bitflags;
use chrono::{DateTime, Utc};

/// Stable identity of a node, as assigned by the external data layer.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind of a node in the browsed tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Regular file (leaf).
    File,
    /// Folder that can be entered.
    Folder,
    /// Top-level root shown in the virtual root list (e.g. "Home", "Shared with me").
    Root,
}

impl NodeKind {
    /// Whether nodes of this kind can be entered.
    ///
    /// Roots behave like folders once the user opens them from the root list.
    pub fn is_container(self) -> bool {
        matches!(self, NodeKind::Folder | NodeKind::Root)
    }
}

bitflags! {
    /// Capability flags granted on a node by the backend.
    ///
    /// The picker never computes these; it only consumes them in predicates and to gate
    /// the create-folder form.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Permissions: u8 {
        /// Contents may be listed / read.
        const READ = 1 << 0;
        /// New children may be written into this folder.
        const WRITE = 1 << 1;
        /// The node may be shared.
        const SHARE = 1 << 2;
        /// The node may be deleted or moved away.
        const DELETE = 1 << 3;
    }
}

/// Immutable snapshot of a file, folder or root supplied by the external data layer.
///
/// The picker never mutates a node in place; a changed node is modelled as a replacement
/// entry in the children list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Node {
    /// Identity.
    pub id: NodeId,
    /// Display name.
    pub name: String,
    /// Kind.
    pub kind: NodeKind,
    /// Size in bytes, when known. Folders usually leave this unset.
    pub size: Option<u64>,
    /// Last update timestamp, when known.
    pub updated_at: Option<DateTime<Utc>>,
    /// Parent back-reference (`None` for roots).
    pub parent_id: Option<NodeId>,
    /// Capabilities granted on this node.
    pub permissions: Permissions,
}

impl Node {
    /// Create a node with read/write permissions and no metadata.
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            size: None,
            updated_at: None,
            parent_id: None,
            permissions: Permissions::READ | Permissions::WRITE,
        }
    }

    /// Convenience constructor for a folder.
    pub fn folder(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Folder)
    }

    /// Convenience constructor for a file.
    pub fn file(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::File)
    }

    /// Convenience constructor for a top-level root.
    pub fn root(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, name, NodeKind::Root)
    }

    /// Set the parent back-reference.
    pub fn with_parent(mut self, parent: impl Into<NodeId>) -> Self {
        self.parent_id = Some(parent.into());
        self
    }

    /// Set the size in bytes.
    pub fn with_size(mut self, size: u64) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the last update timestamp.
    pub fn with_updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    /// Replace the permission set.
    pub fn with_permissions(mut self, permissions: Permissions) -> Self {
        self.permissions = permissions;
        self
    }

    /// Whether the node can be entered.
    pub fn is_container(&self) -> bool {
        self.kind.is_container()
    }

    /// Whether new folders may be created inside this node.
    pub fn can_write(&self) -> bool {
        self.is_container() && self.permissions.contains(Permissions::WRITE)
    }
}
