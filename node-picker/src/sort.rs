use std::cmp::Ordering;

use crate::node::{Node, NodeKind};

/// Sort criteria for a folder listing.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SortCriterion {
    /// Case-insensitive name, A to Z (folders first).
    #[default]
    NameAsc,
    /// Case-insensitive name, Z to A (folders first).
    NameDesc,
    /// Oldest update first (folders first).
    UpdatedAsc,
    /// Newest update first (folders first).
    UpdatedDesc,
    /// Smallest first; files and folders interleaved.
    SizeAsc,
    /// Largest first; files and folders interleaved.
    SizeDesc,
}

impl SortCriterion {
    /// All criteria, in menu order.
    pub const ALL: [SortCriterion; 6] = [
        SortCriterion::NameAsc,
        SortCriterion::NameDesc,
        SortCriterion::UpdatedAsc,
        SortCriterion::UpdatedDesc,
        SortCriterion::SizeAsc,
        SortCriterion::SizeDesc,
    ];

    /// Whether the key is compared ascending.
    pub fn is_ascending(self) -> bool {
        matches!(
            self,
            SortCriterion::NameAsc | SortCriterion::UpdatedAsc | SortCriterion::SizeAsc
        )
    }

    /// Whether folders are grouped ahead of files regardless of direction.
    ///
    /// Only the size criteria interleave kinds.
    pub fn groups_by_kind(self) -> bool {
        !matches!(self, SortCriterion::SizeAsc | SortCriterion::SizeDesc)
    }

    /// The same key in the opposite direction.
    pub fn reversed(self) -> Self {
        match self {
            SortCriterion::NameAsc => SortCriterion::NameDesc,
            SortCriterion::NameDesc => SortCriterion::NameAsc,
            SortCriterion::UpdatedAsc => SortCriterion::UpdatedDesc,
            SortCriterion::UpdatedDesc => SortCriterion::UpdatedAsc,
            SortCriterion::SizeAsc => SortCriterion::SizeDesc,
            SortCriterion::SizeDesc => SortCriterion::SizeAsc,
        }
    }
}

fn kind_rank(kind: NodeKind) -> u8 {
    match kind {
        NodeKind::Folder => 0,
        NodeKind::File => 1,
        // Roots only live in the root list; they rank with unrecognized kinds.
        NodeKind::Root => 2,
    }
}

/// Order two nodes under `criterion`.
///
/// `Ordering::Equal` is a genuine tie: callers keep their storage order for equal nodes.
pub fn compare(a: &Node, b: &Node, criterion: SortCriterion) -> Ordering {
    if criterion.groups_by_kind() {
        let by_kind = kind_rank(a.kind).cmp(&kind_rank(b.kind));
        if by_kind != Ordering::Equal {
            return by_kind;
        }
    }

    let ord = match criterion {
        SortCriterion::NameAsc | SortCriterion::NameDesc => {
            a.name.to_lowercase().cmp(&b.name.to_lowercase())
        }
        // `None` orders before any timestamp.
        SortCriterion::UpdatedAsc | SortCriterion::UpdatedDesc => a.updated_at.cmp(&b.updated_at),
        SortCriterion::SizeAsc | SortCriterion::SizeDesc => {
            a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0))
        }
    };

    if criterion.is_ascending() {
        ord
    } else {
        ord.reverse()
    }
}

/// Stable full sort. Only used when the criterion itself changes or a listing arrives
/// out of order; single additions go through [`crate::insert_sorted`].
pub fn sort_nodes(nodes: &mut [Node], criterion: SortCriterion) {
    nodes.sort_by(|a, b| compare(a, b, criterion));
}

/// Whether `nodes` is already ordered under `criterion`.
pub fn is_sorted(nodes: &[Node], criterion: SortCriterion) -> bool {
    nodes
        .windows(2)
        .all(|w| compare(&w[0], &w[1], criterion) != Ordering::Greater)
}
