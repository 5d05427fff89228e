use std::collections::HashSet;

use crate::node::{Node, NodeId, NodeKind, Permissions};

type PredicateFn = dyn Fn(&Node) -> bool + 'static;

/// Decides which nodes are acceptable selection targets.
///
/// Validity only gates *selection*. A folder that fails the predicate can still be opened,
/// so a constrained picker lets the user browse through invalid folders to reach valid
/// descendants.
pub struct ValidityEvaluator {
    predicate: Option<Box<PredicateFn>>,
    can_select_opened_folder: bool,
}

impl std::fmt::Debug for ValidityEvaluator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidityEvaluator")
            .field("has_predicate", &self.predicate.is_some())
            .field("can_select_opened_folder", &self.can_select_opened_folder)
            .finish()
    }
}

impl Default for ValidityEvaluator {
    fn default() -> Self {
        Self::new(false)
    }
}

impl ValidityEvaluator {
    /// Evaluator that accepts every node.
    pub fn new(can_select_opened_folder: bool) -> Self {
        Self {
            predicate: None,
            can_select_opened_folder,
        }
    }

    /// Evaluator with a caller-supplied predicate.
    pub fn with_predicate<F>(can_select_opened_folder: bool, predicate: F) -> Self
    where
        F: Fn(&Node) -> bool + 'static,
    {
        Self {
            predicate: Some(Box::new(predicate)),
            can_select_opened_folder,
        }
    }

    /// Replace the predicate.
    pub fn set_predicate<F>(&mut self, predicate: F)
    where
        F: Fn(&Node) -> bool + 'static,
    {
        self.predicate = Some(Box::new(predicate));
    }

    /// Whether the currently opened folder may count as the implicit pick.
    pub fn can_select_opened_folder(&self) -> bool {
        self.can_select_opened_folder
    }

    /// Whether `node` may be picked by a click.
    pub fn is_selectable(&self, node: &Node) -> bool {
        self.predicate.as_ref().is_none_or(|p| p(node))
    }

    /// Whether the opened `folder` becomes the implicit pick.
    pub fn is_opened_folder_selectable(&self, folder: &Node) -> bool {
        self.can_select_opened_folder && self.is_selectable(folder)
    }
}

/// Stock predicates for common picker flavours.
pub mod predicates {
    use super::*;

    /// Accept folders only.
    pub fn folders_only() -> impl Fn(&Node) -> bool + 'static {
        |node| node.kind == NodeKind::Folder
    }

    /// Accept files only.
    pub fn files_only() -> impl Fn(&Node) -> bool + 'static {
        |node| node.kind == NodeKind::File
    }

    /// Accept containers the user may write into (move/copy destinations).
    pub fn writable_folders() -> impl Fn(&Node) -> bool + 'static {
        |node| node.is_container() && node.permissions.contains(Permissions::WRITE)
    }

    /// Reject the given nodes and anything whose parent is one of them.
    ///
    /// Only the direct parent link is checked; deeper descendants are unknown to a node
    /// snapshot and must be filtered by a richer predicate if the backend exposes ancestry.
    pub fn excluding<I>(ids: I) -> impl Fn(&Node) -> bool + 'static
    where
        I: IntoIterator<Item = NodeId>,
    {
        let excluded: HashSet<NodeId> = ids.into_iter().collect();
        move |node| {
            !excluded.contains(&node.id)
                && node
                    .parent_id
                    .as_ref()
                    .is_none_or(|parent| !excluded.contains(parent))
        }
    }

    /// Accept a node only when both predicates accept it.
    pub fn all_of<A, B>(a: A, b: B) -> impl Fn(&Node) -> bool + 'static
    where
        A: Fn(&Node) -> bool + 'static,
        B: Fn(&Node) -> bool + 'static,
    {
        move |node| a(node) && b(node)
    }
}

#[cfg(test)]
mod tests {
    use super::predicates::*;
    use super::*;
    use crate::test_util::{file, folder};

    #[test]
    fn default_predicate_accepts_everything() {
        let v = ValidityEvaluator::new(true);
        assert!(v.is_selectable(&file("a")));
        assert!(v.is_opened_folder_selectable(&folder("d")));
    }

    #[test]
    fn opened_folder_requires_flag_and_predicate() {
        let v = ValidityEvaluator::new(false);
        assert!(!v.is_opened_folder_selectable(&folder("d")));

        let v = ValidityEvaluator::with_predicate(true, |n: &Node| n.name != "blocked");
        assert!(v.is_opened_folder_selectable(&folder("ok")));
        assert!(!v.is_opened_folder_selectable(&folder("blocked")));
    }

    #[test]
    fn folders_only_rejects_files() {
        let v = ValidityEvaluator::with_predicate(false, folders_only());
        assert!(!v.is_selectable(&file("a.txt")));
        assert!(v.is_selectable(&folder("a")));
    }

    #[test]
    fn writable_folders_checks_permission() {
        let v = ValidityEvaluator::with_predicate(true, writable_folders());
        let ro = folder("ro").with_permissions(Permissions::READ);
        assert!(!v.is_selectable(&ro));
        assert!(v.is_selectable(&folder("rw")));
        assert!(!v.is_selectable(&file("f")));
    }

    #[test]
    fn excluding_rejects_sources_and_their_children() {
        let v = ValidityEvaluator::with_predicate(
            true,
            all_of(folders_only(), excluding([NodeId::new("src")])),
        );
        assert!(!v.is_selectable(&folder("src")));
        assert!(!v.is_selectable(&folder("child").with_parent("src")));
        assert!(v.is_selectable(&folder("other").with_parent("root")));
    }
}
