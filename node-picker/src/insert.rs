//! Order-preserving insertion into an already sorted listing.
//!
//! A single new node is placed with an insertion-index search instead of a full re-sort,
//! so equal-ranked siblings keep the relative order the listing already had.

use std::cmp::Ordering;

use crate::node::Node;
use crate::sort::{SortCriterion, compare};

/// Index at which `new_node` keeps `sorted` ordered under `criterion`.
///
/// Returns the index of the first element ranked strictly after `new_node`, or
/// `sorted.len()` when there is none. Existing equal-ranked elements therefore stay ahead
/// of the new node.
pub fn find_insertion_index(sorted: &[Node], new_node: &Node, criterion: SortCriterion) -> usize {
    sorted
        .iter()
        .position(|element| compare(new_node, element, criterion) == Ordering::Less)
        .unwrap_or(sorted.len())
}

/// Binary-search form of [`find_insertion_index`]; returns the identical index for any
/// sorted input.
pub fn find_insertion_index_binary(
    sorted: &[Node],
    new_node: &Node,
    criterion: SortCriterion,
) -> usize {
    sorted.partition_point(|element| compare(new_node, element, criterion) != Ordering::Less)
}

/// Insert `new_node` into `sorted` at its insertion index and return that index.
pub fn insert_sorted(sorted: &mut Vec<Node>, new_node: Node, criterion: SortCriterion) -> usize {
    let index = find_insertion_index_binary(sorted, &new_node, criterion);
    debug_assert_eq!(index, find_insertion_index(sorted, &new_node, criterion));
    sorted.insert(index, new_node);
    index
}
