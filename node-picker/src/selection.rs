use indexmap::IndexMap;

use crate::node::{Node, NodeId};
use crate::validity::ValidityEvaluator;

/// How many nodes a picker may return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SelectionMode {
    /// Exactly one node; clicking another node replaces the pick.
    #[default]
    Single,
    /// Several nodes, toggled by clicks, optionally capped.
    Multiple,
}

/// Why a click did not change the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    /// The validity predicate rejected the node.
    NotSelectable,
    /// Adding the node would exceed the selection limit.
    LimitReached,
    /// The clicked id is not part of the current listing.
    UnknownNode,
}

/// Effect of a click on the selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The node was added to the explicit picks.
    Picked,
    /// The node was removed from the explicit picks.
    Unpicked,
    /// The node replaced the previous single pick.
    Replaced,
    /// Nothing changed.
    Rejected(RejectReason),
}

/// Selection state of one picker session.
///
/// Explicit picks keep click order. While there are none, the effective selection falls back
/// to the implicit pick: the opened folder, when it is selectable.
#[derive(Clone, Debug)]
pub struct SelectionStore {
    mode: SelectionMode,
    max_count: Option<usize>,
    default_pick: Option<Node>,
    explicit: IndexMap<NodeId, Node>,
}

impl SelectionStore {
    /// Create an empty store.
    ///
    /// `Single` always caps at one; a `Some(0)` limit is raised to one.
    pub fn new(mode: SelectionMode, max_count: Option<usize>) -> Self {
        let max_count = match mode {
            SelectionMode::Single => Some(1),
            SelectionMode::Multiple => max_count.map(|n| n.max(1)),
        };
        Self {
            mode,
            max_count,
            default_pick: None,
            explicit: IndexMap::new(),
        }
    }

    /// Selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// Upper bound on the number of picks (`None` = unlimited).
    pub fn max_count(&self) -> Option<usize> {
        self.max_count
    }

    /// The implicit pick, if any.
    pub fn default_pick(&self) -> Option<&Node> {
        self.default_pick.as_ref()
    }

    /// Explicit picks in click order.
    pub fn explicit_picks(&self) -> impl Iterator<Item = &Node> {
        self.explicit.values()
    }

    /// Number of explicit picks.
    pub fn explicit_len(&self) -> usize {
        self.explicit.len()
    }

    /// Whether `id` is an explicit pick.
    pub fn is_picked(&self, id: &NodeId) -> bool {
        self.explicit.contains_key(id)
    }

    /// A folder was opened: explicit picks are dropped and the folder becomes the implicit
    /// pick when it is selectable.
    pub fn on_folder_opened(&mut self, folder: &Node, validity: &ValidityEvaluator) {
        self.explicit.clear();
        self.default_pick = validity
            .is_opened_folder_selectable(folder)
            .then(|| folder.clone());
    }

    /// The virtual root list was opened. The list itself is never an implicit pick.
    pub fn on_returned_to_root(&mut self) {
        self.clear();
    }

    /// Drop every pick, implicit included.
    pub fn clear(&mut self) {
        self.explicit.clear();
        self.default_pick = None;
    }

    /// Apply a click on `node`.
    pub fn on_node_clicked(&mut self, node: &Node, validity: &ValidityEvaluator) -> ClickOutcome {
        match self.mode {
            SelectionMode::Single => {
                if self.explicit.len() == 1 && self.explicit.contains_key(&node.id) {
                    self.explicit.clear();
                    return ClickOutcome::Unpicked;
                }
                if !validity.is_selectable(node) {
                    return ClickOutcome::Rejected(RejectReason::NotSelectable);
                }
                let had_pick = !self.explicit.is_empty();
                self.explicit.clear();
                self.explicit.insert(node.id.clone(), node.clone());
                if had_pick {
                    ClickOutcome::Replaced
                } else {
                    ClickOutcome::Picked
                }
            }
            SelectionMode::Multiple => {
                if self.explicit.shift_remove(&node.id).is_some() {
                    // An empty explicit set falls back to the implicit pick.
                    return ClickOutcome::Unpicked;
                }
                if !validity.is_selectable(node) {
                    return ClickOutcome::Rejected(RejectReason::NotSelectable);
                }
                if self.is_at_limit() {
                    return ClickOutcome::Rejected(RejectReason::LimitReached);
                }
                self.explicit.insert(node.id.clone(), node.clone());
                ClickOutcome::Picked
            }
        }
    }

    /// Whether another explicit pick would exceed the limit.
    pub fn is_at_limit(&self) -> bool {
        self.max_count.is_some_and(|max| self.explicit.len() >= max)
    }

    /// Nodes returned on confirm: the explicit picks, else the implicit pick, else nothing.
    pub fn effective_selection(&self) -> Vec<&Node> {
        if !self.explicit.is_empty() {
            return self.explicit.values().collect();
        }
        self.default_pick.iter().collect()
    }

    /// Ids of [`Self::effective_selection`].
    pub fn effective_ids(&self) -> Vec<NodeId> {
        self.effective_selection()
            .into_iter()
            .map(|n| n.id.clone())
            .collect()
    }

    /// Whether confirming now would return an acceptable selection.
    pub fn is_confirm_enabled(&self) -> bool {
        let len = self.effective_selection().len();
        len > 0 && self.max_count.is_none_or(|max| len <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{file, folder};
    use crate::validity::predicates::folders_only;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn names(store: &SelectionStore) -> Vec<String> {
        store
            .effective_selection()
            .into_iter()
            .map(|n| n.name.clone())
            .collect()
    }

    #[test]
    fn single_mode_falls_back_to_opened_folder() {
        let validity = ValidityEvaluator::new(true);
        let mut store = SelectionStore::new(SelectionMode::Single, None);
        let f = folder("F");
        let c = file("C");

        store.on_folder_opened(&f, &validity);
        assert_eq!(names(&store), vec!["F"]);
        assert!(store.is_confirm_enabled());

        assert_eq!(store.on_node_clicked(&c, &validity), ClickOutcome::Picked);
        assert_eq!(names(&store), vec!["C"]);

        assert_eq!(store.on_node_clicked(&c, &validity), ClickOutcome::Unpicked);
        assert_eq!(names(&store), vec!["F"]);
    }

    #[test]
    fn single_mode_replaces_previous_pick() {
        let validity = ValidityEvaluator::new(false);
        let mut store = SelectionStore::new(SelectionMode::Single, Some(5));
        assert_eq!(store.max_count(), Some(1));
        store.on_node_clicked(&file("a"), &validity);
        assert_eq!(
            store.on_node_clicked(&file("b"), &validity),
            ClickOutcome::Replaced
        );
        assert_eq!(names(&store), vec!["b"]);
    }

    #[test]
    fn single_mode_invalid_click_keeps_existing_pick() {
        let validity = ValidityEvaluator::with_predicate(false, folders_only());
        let mut store = SelectionStore::new(SelectionMode::Single, None);
        store.on_node_clicked(&folder("d"), &validity);
        assert_eq!(
            store.on_node_clicked(&file("f"), &validity),
            ClickOutcome::Rejected(RejectReason::NotSelectable)
        );
        assert_eq!(names(&store), vec!["d"]);
    }

    #[test]
    fn multiple_mode_blocks_additions_past_limit() {
        let validity = ValidityEvaluator::new(false);
        let mut store = SelectionStore::new(SelectionMode::Multiple, Some(3));
        for n in ["A", "B", "C"] {
            assert_eq!(
                store.on_node_clicked(&file(n), &validity),
                ClickOutcome::Picked
            );
        }
        assert!(store.is_confirm_enabled());
        assert_eq!(
            store.on_node_clicked(&file("D"), &validity),
            ClickOutcome::Rejected(RejectReason::LimitReached)
        );
        assert_eq!(names(&store), vec!["A", "B", "C"]);
        assert!(store.is_confirm_enabled());
    }

    #[test]
    fn multiple_mode_unpicking_last_pick_reverts_to_opened_folder() {
        let validity = ValidityEvaluator::new(true);
        let mut store = SelectionStore::new(SelectionMode::Multiple, None);
        let f = folder("F");
        store.on_folder_opened(&f, &validity);
        store.on_node_clicked(&file("a"), &validity);
        store.on_node_clicked(&file("b"), &validity);
        assert_eq!(names(&store), vec!["a", "b"]);

        store.on_node_clicked(&file("a"), &validity);
        store.on_node_clicked(&file("b"), &validity);
        assert_eq!(names(&store), vec!["F"]);
    }

    #[test]
    fn invalid_file_click_is_a_no_op() {
        let validity = ValidityEvaluator::with_predicate(false, folders_only());
        let mut store = SelectionStore::new(SelectionMode::Multiple, None);
        assert_eq!(
            store.on_node_clicked(&file("f"), &validity),
            ClickOutcome::Rejected(RejectReason::NotSelectable)
        );
        assert!(store.effective_selection().is_empty());
        assert!(!store.is_confirm_enabled());
    }

    #[test]
    fn opening_folder_resets_explicit_picks() {
        let validity = ValidityEvaluator::new(false);
        let mut store = SelectionStore::new(SelectionMode::Multiple, None);
        store.on_node_clicked(&file("a"), &validity);
        store.on_folder_opened(&folder("next"), &validity);
        assert_eq!(store.explicit_len(), 0);
        assert!(store.default_pick().is_none());
        assert!(!store.is_confirm_enabled());
    }

    #[test]
    fn root_list_is_never_an_implicit_pick() {
        let validity = ValidityEvaluator::new(true);
        let mut store = SelectionStore::new(SelectionMode::Single, None);
        store.on_folder_opened(&folder("F"), &validity);
        store.on_returned_to_root();
        assert!(store.effective_selection().is_empty());
    }

    #[derive(Clone, Debug)]
    enum Event {
        Open(usize),
        Click(usize),
        Root,
    }

    fn arb_event() -> impl Strategy<Value = Event> {
        prop_oneof![
            1 => (0usize..4).prop_map(Event::Open),
            6 => (0usize..10).prop_map(Event::Click),
            1 => Just(Event::Root),
        ]
    }

    proptest! {
        #[test]
        fn explicit_picks_never_exceed_limit(
            multiple in any::<bool>(),
            max in proptest::option::of(0usize..5),
            can_select_opened in any::<bool>(),
            events in proptest::collection::vec(arb_event(), 0..64),
        ) {
            let mode = if multiple { SelectionMode::Multiple } else { SelectionMode::Single };
            let validity = ValidityEvaluator::with_predicate(
                can_select_opened,
                |n: &Node| !n.name.ends_with('7'),
            );
            let mut store = SelectionStore::new(mode, max);
            for event in events {
                match event {
                    Event::Open(i) => store.on_folder_opened(&folder(&format!("dir{i}")), &validity),
                    Event::Click(i) => {
                        store.on_node_clicked(&file(&format!("file{i}")), &validity);
                    }
                    Event::Root => store.on_returned_to_root(),
                }
                if let Some(limit) = store.max_count() {
                    prop_assert!(store.explicit_len() <= limit);
                }
                prop_assert!(store.explicit_picks().all(|n| !n.name.ends_with('7')));
                prop_assert_eq!(
                    store.is_confirm_enabled(),
                    !store.effective_selection().is_empty()
                );
            }
        }
    }
}
