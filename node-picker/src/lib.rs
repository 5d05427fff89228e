#![deny(missing_docs)]
//! Headless folder/file picker core.
//!
//! The crate models the state of a "choose a destination" or "pick files" dialog over a
//! remote tree (roots, folders and files supplied by an external data layer) without
//! rendering anything:
//!
//! - sorting with folders grouped ahead of files, and order-preserving insertion of new
//!   nodes into an already sorted listing
//! - navigation between the root list, folders and breadcrumbs, with stale fetch results
//!   dropped by generation
//! - single or multiple selection bounded by a pick limit and a validity predicate, where
//!   the opened folder can act as the implicit pick
//! - an inline create-folder form
//!
//! A [`PickerSession`] ties everything together. The host forwards [`PickerEvent`]s, executes
//! the returned [`FetchRequest`]s / [`CreateFolderRequest`]s and renders [`PickerView`].
//!
//! ```
//! use node_picker::{FetchPayload, Node, PickerConfig, PickerSession};
//!
//! let mut session = PickerSession::new(PickerConfig::new().can_select_opened_folder(true));
//! let requests = session.start();
//! let home = Node::root("home", "Home");
//! session.complete_fetch(requests[0].ticket, Ok(FetchPayload::Roots(vec![home.clone()])));
//!
//! let requests = session.open(&home).unwrap();
//! session.complete_fetch(requests[0].ticket, Ok(FetchPayload::Children(Vec::new())));
//! assert!(session.view().is_confirm_enabled);
//! assert_eq!(session.confirm().unwrap(), vec![home]);
//! ```

mod config;
mod create_folder;
mod error;
mod filter;
mod insert;
mod navigation;
mod node;
mod selection;
mod session;
mod sort;
mod source;
mod validity;

#[cfg(feature = "tracing")]
pub mod logging;

#[cfg(test)]
mod test_util;

pub use config::PickerConfig;
pub use create_folder::{
    CreateCompletion, CreateFolderRequest, CreateFolderState, CreateFolderSubflow,
    CreateFolderView, CreateTicket,
};
pub use error::{CreateFolderError, FetchError, PickerError, PickerResult};
pub use filter::SearchFilter;
pub use insert::{find_insertion_index, find_insertion_index_binary, insert_sorted};
pub use navigation::{
    FetchApplied, FetchKind, FetchPayload, FetchRequest, FetchSlot, FetchTicket, LoadStatus,
    Location, NavigationController, PathResolver, StartLocation,
};
pub use node::{Node, NodeId, NodeKind, Permissions};
pub use selection::{ClickOutcome, RejectReason, SelectionMode, SelectionStore};
pub use session::{PickerEvent, PickerOutcome, PickerSession, PickerView};
pub use sort::{SortCriterion, compare, is_sorted, sort_nodes};
pub use source::{MemorySource, NodeSource};
pub use validity::{ValidityEvaluator, predicates};
