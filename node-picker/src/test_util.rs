//! Shared fixtures for unit tests.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use crate::node::{Node, NodeKind};

pub(crate) fn folder(name: &str) -> Node {
    Node::folder(name, name)
}

pub(crate) fn file(name: &str) -> Node {
    Node::file(name, name)
}

pub(crate) fn arb_kind() -> impl Strategy<Value = NodeKind> {
    prop_oneof![
        4 => Just(NodeKind::Folder),
        4 => Just(NodeKind::File),
        1 => Just(NodeKind::Root),
    ]
}

/// Small name/size/time domains so that ties are frequent.
pub(crate) fn arb_node() -> impl Strategy<Value = Node> {
    (
        "[a-cA-C]{0,3}",
        arb_kind(),
        proptest::option::of(0u64..8),
        proptest::option::of(0i64..8),
        0u32..1_000_000,
    )
        .prop_map(|(name, kind, size, updated, salt)| {
            let mut node = Node::new(format!("{name}-{salt}"), name, kind);
            node.size = size;
            node.updated_at = updated.and_then(|s| Utc.timestamp_opt(s, 0).single());
            node
        })
}
