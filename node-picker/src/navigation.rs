use std::collections::HashMap;

use crate::error::FetchError;
use crate::node::{Node, NodeId};
use crate::sort::{SortCriterion, is_sorted, sort_nodes};

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

/// Where a picker session starts.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum StartLocation {
    /// The virtual list of top-level roots.
    #[default]
    Roots,
    /// Deep link into a folder; breadcrumbs are hydrated through a path fetch.
    Folder(NodeId),
}

/// What the user is currently looking at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// The virtual root list.
    Roots,
    /// Inside a folder (or root).
    Folder(NodeId),
}

/// Which collaborator call a ticket belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FetchSlot {
    /// `fetch_roots`.
    Roots,
    /// `fetch_children`.
    Children,
    /// `fetch_path`.
    Path,
}

/// Correlates a fetch completion with the navigation step that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FetchTicket {
    generation: u64,
    slot: FetchSlot,
}

impl FetchTicket {
    /// Navigation generation that issued the request.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Collaborator call the ticket belongs to.
    pub fn slot(&self) -> FetchSlot {
        self.slot
    }
}

/// Collaborator call requested from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchKind {
    /// List the top-level roots.
    Roots,
    /// List the children of a folder, sorted by the active criterion.
    Children(NodeId),
    /// Ordered path from a root down to the node.
    Path(NodeId),
}

/// A fetch the host must execute and report back through its ticket.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// Ticket to hand back with the result.
    pub ticket: FetchTicket,
    /// What to fetch.
    pub kind: FetchKind,
}

/// Successful fetch result.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchPayload {
    /// Result of [`FetchKind::Roots`].
    Roots(Vec<Node>),
    /// Result of [`FetchKind::Children`] (one page).
    Children(Vec<Node>),
    /// Result of [`FetchKind::Path`], root first.
    Path(Vec<Node>),
}

impl FetchPayload {
    fn slot(&self) -> FetchSlot {
        match self {
            FetchPayload::Roots(_) => FetchSlot::Roots,
            FetchPayload::Children(_) => FetchSlot::Children,
            FetchPayload::Path(_) => FetchSlot::Path,
        }
    }
}

/// Loading state of the current location.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Requests for the current location are in flight.
    Loading,
    /// Every request for the current location completed.
    Loaded,
    /// A request failed; the UI offers a retry.
    Failed {
        /// Human-readable failure.
        message: String,
    },
}

/// Effect of feeding a fetch completion back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchApplied {
    /// The completion belonged to a location the user already left; ignored.
    Stale,
    /// The listing (roots or children) was replaced.
    Listing,
    /// A deep-linked folder became known; the selection store must be told.
    FolderResolved(Node),
    /// Breadcrumbs were refreshed for an already known folder.
    PathUpdated,
    /// The fetch failed; selection state is untouched.
    Failed(FetchError),
}

const MAX_PATH_DEPTH: usize = 256;

/// Rebuilds breadcrumb paths by walking `parent_id` links through nodes seen in a session.
#[derive(Clone, Debug, Default)]
pub struct PathResolver {
    known: HashMap<NodeId, Node>,
    memo: HashMap<NodeId, Vec<Node>>,
}

impl PathResolver {
    /// Remember a node snapshot.
    pub fn record(&mut self, node: &Node) {
        let changed = self.known.get(&node.id).is_none_or(|old| old != node);
        if changed {
            self.memo.clear();
        }
        self.known.insert(node.id.clone(), node.clone());
    }

    /// Remember several snapshots.
    pub fn record_all<'a>(&mut self, nodes: impl IntoIterator<Item = &'a Node>) {
        for node in nodes {
            self.record(node);
        }
    }

    /// Look up a remembered node.
    pub fn get(&self, id: &NodeId) -> Option<&Node> {
        self.known.get(id)
    }

    /// Path from a root to `id`, or `None` when a link is unknown or the chain is cyclic.
    pub fn resolve(&mut self, id: &NodeId) -> Option<Vec<Node>> {
        if let Some(path) = self.memo.get(id) {
            return Some(path.clone());
        }

        let mut chain: Vec<Node> = Vec::new();
        let mut prefix: Vec<Node> = Vec::new();
        let mut cursor = id.clone();
        loop {
            if chain.len() >= MAX_PATH_DEPTH {
                return None;
            }
            let node = self.known.get(&cursor)?;
            chain.push(node.clone());
            match &node.parent_id {
                None => break,
                Some(parent) => {
                    if let Some(path) = self.memo.get(parent) {
                        prefix = path.clone();
                        break;
                    }
                    cursor = parent.clone();
                }
            }
        }

        chain.reverse();
        prefix.extend(chain);
        self.memo.insert(id.clone(), prefix.clone());
        Some(prefix)
    }
}

/// Tracks the opened folder, its ancestors and its listing, and issues fetch requests.
///
/// Every transition starts a new generation; completions carrying an older generation are
/// dropped, so out-of-order transport results can never overwrite the current listing.
#[derive(Clone, Debug)]
pub struct NavigationController {
    location: Location,
    current: Option<Node>,
    path: Vec<Node>,
    children: Vec<Node>,
    generation: u64,
    outstanding: Vec<FetchSlot>,
    needs_path: bool,
    status: LoadStatus,
    resolver: PathResolver,
}

impl Default for NavigationController {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationController {
    /// Controller positioned at the root list with nothing loaded.
    pub fn new() -> Self {
        Self {
            location: Location::Roots,
            current: None,
            path: Vec::new(),
            children: Vec::new(),
            generation: 0,
            outstanding: Vec::new(),
            needs_path: false,
            status: LoadStatus::Idle,
            resolver: PathResolver::default(),
        }
    }

    /// Current location.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Whether the root list is shown.
    pub fn is_at_root(&self) -> bool {
        matches!(self.location, Location::Roots)
    }

    /// The opened folder, once known.
    pub fn current_folder(&self) -> Option<&Node> {
        self.current.as_ref()
    }

    /// Breadcrumbs, root first, ending with the opened folder.
    pub fn path(&self) -> &[Node] {
        &self.path
    }

    /// Listing of the current location (roots at the root list).
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Node> {
        &mut self.children
    }

    /// Loading state of the current location.
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Latest issued generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Nodes seen so far in this session.
    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    /// Position the controller at `start`.
    pub fn start(&mut self, start: &StartLocation) -> Vec<FetchRequest> {
        match start {
            StartLocation::Roots => self.back_to_root(),
            StartLocation::Folder(id) => self.open_deep_link(id.clone()),
        }
    }

    /// Enter `node`. Returns `None` (and changes nothing) for nodes that cannot be entered.
    pub fn open(&mut self, node: &Node) -> Option<Vec<FetchRequest>> {
        if !node.is_container() {
            return None;
        }
        self.resolver.record(node);

        let is_direct_child = match &self.current {
            Some(current) => node.parent_id.as_ref() == Some(&current.id),
            None => self.is_at_root() && node.parent_id.is_none(),
        };
        if is_direct_child {
            // A provisional trail stays provisional until a path fetch hydrates it.
            self.path.push(node.clone());
        } else if let Some(path) = self.resolver.resolve(&node.id) {
            self.path = path;
            self.needs_path = false;
        } else {
            self.path = vec![node.clone()];
            self.needs_path = true;
        }

        self.location = Location::Folder(node.id.clone());
        self.current = Some(node.clone());
        self.children.clear();
        Some(self.issue_folder_requests(node.id.clone()))
    }

    /// Enter the breadcrumb at `index`, truncating the path instead of re-fetching it.
    ///
    /// A trail that still lacks its ancestors keeps requesting a path fetch.
    pub fn open_via_breadcrumb(&mut self, index: usize) -> Option<Vec<FetchRequest>> {
        let node = self.path.get(index)?.clone();
        if !node.is_container() {
            return None;
        }
        self.path.truncate(index + 1);
        self.location = Location::Folder(node.id.clone());
        self.current = Some(node.clone());
        self.children.clear();
        Some(self.issue_folder_requests(node.id))
    }

    /// Show the virtual root list.
    pub fn back_to_root(&mut self) -> Vec<FetchRequest> {
        self.location = Location::Roots;
        self.current = None;
        self.path.clear();
        self.needs_path = false;
        let generation = self.next_generation();
        trace_navigation_requested(generation, "roots");
        vec![self.request(generation, FetchSlot::Roots, FetchKind::Roots)]
    }

    /// Jump straight into folder `id`; the folder node itself arrives with the path fetch.
    pub fn open_deep_link(&mut self, id: NodeId) -> Vec<FetchRequest> {
        self.location = Location::Folder(id.clone());
        self.children.clear();
        match self.resolver.resolve(&id) {
            Some(path) => {
                self.current = path.last().cloned();
                self.path = path;
                self.needs_path = false;
            }
            None => {
                self.current = None;
                self.path.clear();
                self.needs_path = true;
            }
        }
        self.issue_folder_requests(id)
    }

    /// Re-issue the requests for the current location under a new generation.
    pub fn retry(&mut self) -> Vec<FetchRequest> {
        match self.location.clone() {
            Location::Roots => self.back_to_root(),
            Location::Folder(id) => self.issue_folder_requests(id),
        }
    }

    /// Feed a completion back. Children that arrive out of `criterion` order are re-sorted.
    pub fn complete(
        &mut self,
        ticket: FetchTicket,
        result: Result<FetchPayload, FetchError>,
        criterion: SortCriterion,
    ) -> FetchApplied {
        if ticket.generation != self.generation {
            trace_fetch_dropped_stale(ticket.generation, self.generation, ticket.slot);
            return FetchApplied::Stale;
        }
        let Some(pos) = self.outstanding.iter().position(|s| *s == ticket.slot) else {
            trace_fetch_dropped_stale(ticket.generation, self.generation, ticket.slot);
            return FetchApplied::Stale;
        };
        if let Ok(payload) = &result {
            if payload.slot() != ticket.slot {
                return self.fail(FetchError::Transport(format!(
                    "payload does not match {:?} request",
                    ticket.slot
                )));
            }
        }
        self.outstanding.remove(pos);

        let applied = match result {
            Ok(FetchPayload::Roots(roots)) => {
                self.resolver.record_all(&roots);
                self.children = roots;
                FetchApplied::Listing
            }
            Ok(FetchPayload::Children(mut children)) => {
                self.resolver.record_all(&children);
                if !is_sorted(&children, criterion) {
                    sort_nodes(&mut children, criterion);
                }
                self.children = children;
                FetchApplied::Listing
            }
            Ok(FetchPayload::Path(path)) => {
                self.resolver.record_all(&path);
                self.apply_path(path)
            }
            Err(err) if ticket.slot == FetchSlot::Path => self.recover_path(err),
            Err(err) => return self.fail(err),
        };

        if let FetchApplied::Failed(err) = &applied {
            return self.fail(err.clone());
        }
        if self.outstanding.is_empty() && !matches!(self.status, LoadStatus::Failed { .. }) {
            self.status = LoadStatus::Loaded;
        }
        applied
    }

    fn apply_path(&mut self, path: Vec<Node>) -> FetchApplied {
        let Location::Folder(target) = &self.location else {
            return FetchApplied::Stale;
        };
        if path.last().map(|n| &n.id) != Some(target) {
            return FetchApplied::Failed(FetchError::NotFound(target.clone()));
        }
        self.needs_path = false;
        let resolved_now = self.current.is_none();
        self.current = path.last().cloned();
        self.path = path;
        match (&self.current, resolved_now) {
            (Some(folder), true) => FetchApplied::FolderResolved(folder.clone()),
            _ => FetchApplied::PathUpdated,
        }
    }

    /// A failed path fetch is recoverable when the parent chain is already known.
    fn recover_path(&mut self, err: FetchError) -> FetchApplied {
        let Location::Folder(target) = self.location.clone() else {
            return FetchApplied::Stale;
        };
        match self.resolver.resolve(&target) {
            Some(path) => self.apply_path(path),
            None if self.current.is_some() => {
                // Breadcrumbs stay provisional; the listing is still usable.
                trace_fetch_failed(self.generation, &err);
                FetchApplied::PathUpdated
            }
            None => FetchApplied::Failed(err),
        }
    }

    fn fail(&mut self, err: FetchError) -> FetchApplied {
        trace_fetch_failed(self.generation, &err);
        self.outstanding.clear();
        self.status = LoadStatus::Failed {
            message: err.to_string(),
        };
        FetchApplied::Failed(err)
    }

    fn issue_folder_requests(&mut self, id: NodeId) -> Vec<FetchRequest> {
        let generation = self.next_generation();
        trace_navigation_requested(generation, id.as_str());
        let mut requests = vec![self.request(
            generation,
            FetchSlot::Children,
            FetchKind::Children(id.clone()),
        )];
        if self.needs_path {
            requests.push(self.request(generation, FetchSlot::Path, FetchKind::Path(id)));
        }
        requests
    }

    fn next_generation(&mut self) -> u64 {
        self.generation = self.generation.saturating_add(1);
        self.outstanding.clear();
        self.status = LoadStatus::Loading;
        self.generation
    }

    fn request(&mut self, generation: u64, slot: FetchSlot, kind: FetchKind) -> FetchRequest {
        self.outstanding.push(slot);
        FetchRequest {
            ticket: FetchTicket { generation, slot },
            kind,
        }
    }
}

#[cfg(feature = "tracing")]
fn trace_navigation_requested(generation: u64, target: &str) {
    trace!(
        event = "navigation.requested",
        generation, target, "navigation requested"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_navigation_requested(_generation: u64, _target: &str) {}

#[cfg(feature = "tracing")]
fn trace_fetch_dropped_stale(generation: u64, current_generation: u64, slot: FetchSlot) {
    trace!(
        event = "fetch.dropped_stale",
        generation, current_generation, ?slot, "fetch dropped stale completion"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_fetch_dropped_stale(_generation: u64, _current_generation: u64, _slot: FetchSlot) {}

#[cfg(feature = "tracing")]
fn trace_fetch_failed(generation: u64, err: &FetchError) {
    debug!(event = "fetch.failed", generation, error = %err, "fetch failed");
}

#[cfg(not(feature = "tracing"))]
fn trace_fetch_failed(_generation: u64, _err: &FetchError) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{file, folder};
    use pretty_assertions::assert_eq;

    const NAME: SortCriterion = SortCriterion::NameAsc;

    fn home() -> Node {
        Node::root("home", "Home")
    }

    fn docs() -> Node {
        Node::folder("docs", "Docs").with_parent("home")
    }

    fn ok_children(nodes: Vec<Node>) -> Result<FetchPayload, FetchError> {
        Ok(FetchPayload::Children(nodes))
    }

    #[test]
    fn open_from_root_list_pushes_path_and_requests_children_only() {
        let mut nav = NavigationController::new();
        let roots = nav.back_to_root();
        nav.complete(roots[0].ticket, Ok(FetchPayload::Roots(vec![home()])), NAME);

        let requests = nav.open(&home()).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].kind, FetchKind::Children(NodeId::new("home")));
        assert_eq!(nav.path().len(), 1);

        let requests = nav.open(&docs()).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            nav.path().iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["home", "docs"]
        );
        assert_eq!(nav.location(), &Location::Folder(NodeId::new("docs")));
    }

    #[test]
    fn opening_a_file_is_ignored() {
        let mut nav = NavigationController::new();
        assert!(nav.open(&file("a.txt")).is_none());
        assert!(nav.is_at_root());
    }

    #[test]
    fn stale_children_are_dropped() {
        let mut nav = NavigationController::new();
        nav.back_to_root();
        let first = nav.open(&home()).unwrap();
        let second = nav.open(&docs()).unwrap();

        // Second listing lands first, then the first one resolves late.
        let applied = nav.complete(second[0].ticket, ok_children(vec![file("d.txt")]), NAME);
        assert_eq!(applied, FetchApplied::Listing);
        let applied = nav.complete(first[0].ticket, ok_children(vec![file("h.txt")]), NAME);
        assert_eq!(applied, FetchApplied::Stale);

        assert_eq!(nav.children()[0].name, "d.txt");
        assert_eq!(nav.status(), &LoadStatus::Loaded);
    }

    #[test]
    fn unsorted_children_are_sorted_on_arrival() {
        let mut nav = NavigationController::new();
        let req = nav.open(&home()).unwrap();
        nav.complete(
            req[0].ticket,
            ok_children(vec![file("b"), folder("z"), file("a")]),
            NAME,
        );
        let names: Vec<_> = nav.children().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names, vec!["z", "a", "b"]);
    }

    #[test]
    fn breadcrumb_truncates_path() {
        let mut nav = NavigationController::new();
        nav.open(&home());
        nav.open(&docs());
        let deep = Node::folder("deep", "Deep").with_parent("docs");
        nav.open(&deep);
        assert_eq!(nav.path().len(), 3);

        let requests = nav.open_via_breadcrumb(0).unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(nav.path().len(), 1);
        assert_eq!(nav.current_folder().map(|n| n.id.as_str()), Some("home"));
        assert!(nav.open_via_breadcrumb(5).is_none());
    }

    #[test]
    fn deep_link_resolves_folder_from_path_fetch() {
        let mut nav = NavigationController::new();
        let requests = nav.start(&StartLocation::Folder(NodeId::new("docs")));
        assert_eq!(requests.len(), 2);
        assert!(nav.current_folder().is_none());

        let path_ticket = requests[1].ticket;
        let applied = nav.complete(
            path_ticket,
            Ok(FetchPayload::Path(vec![home(), docs()])),
            NAME,
        );
        assert_eq!(applied, FetchApplied::FolderResolved(docs()));
        assert_eq!(nav.status(), &LoadStatus::Loading);

        nav.complete(requests[0].ticket, ok_children(vec![]), NAME);
        assert_eq!(nav.status(), &LoadStatus::Loaded);
        assert_eq!(nav.path().len(), 2);
    }

    #[test]
    fn failed_listing_can_be_retried() {
        let mut nav = NavigationController::new();
        let requests = nav.open(&home()).unwrap();
        let applied = nav.complete(
            requests[0].ticket,
            Err(FetchError::Transport("offline".into())),
            NAME,
        );
        assert!(matches!(applied, FetchApplied::Failed(_)));
        assert!(matches!(nav.status(), LoadStatus::Failed { .. }));

        let retry = nav.retry();
        assert_eq!(retry.len(), 1);
        assert!(retry[0].ticket.generation() > requests[0].ticket.generation());
        nav.complete(retry[0].ticket, ok_children(vec![file("x")]), NAME);
        assert_eq!(nav.status(), &LoadStatus::Loaded);
    }

    #[test]
    fn deep_link_reuses_known_parent_chain() {
        let mut nav = NavigationController::new();
        nav.open(&home());
        let req = nav.open(&docs()).unwrap();
        nav.complete(req[0].ticket, ok_children(vec![]), NAME);
        nav.back_to_root();

        let requests = nav.open_deep_link(NodeId::new("docs"));
        // Chain already known: no path fetch needed.
        assert_eq!(requests.len(), 1);
        assert_eq!(nav.path().len(), 2);
        assert_eq!(nav.current_folder().map(|n| n.id.as_str()), Some("docs"));
    }

    #[test]
    fn failed_path_fetch_for_unknown_folder_is_reported() {
        let mut nav = NavigationController::new();
        let requests = nav.open_deep_link(NodeId::new("ghost"));
        let applied = nav.complete(
            requests[1].ticket,
            Err(FetchError::NotFound(NodeId::new("ghost"))),
            NAME,
        );
        assert_eq!(
            applied,
            FetchApplied::Failed(FetchError::NotFound(NodeId::new("ghost")))
        );
        // The remaining children completion belongs to a failed generation.
        let late = nav.complete(requests[0].ticket, ok_children(vec![]), NAME);
        assert_eq!(late, FetchApplied::Stale);
    }

    #[test]
    fn provisional_trail_keeps_requesting_path_below_it() {
        let mut nav = NavigationController::new();
        let deep = Node::folder("deep", "Deep").with_parent("hidden");
        let requests = nav.open(&deep).unwrap();
        assert_eq!(requests.len(), 2);
        let applied = nav.complete(
            requests[1].ticket,
            Err(FetchError::Transport("offline".into())),
            NAME,
        );
        assert_eq!(applied, FetchApplied::PathUpdated);
        assert_eq!(nav.path().len(), 1);

        let c = Node::folder("c", "C").with_parent("deep");
        let requests = nav.open(&c).unwrap();
        let kinds: Vec<_> = requests.iter().map(|r| r.kind.clone()).collect();
        assert_eq!(
            kinds,
            vec![
                FetchKind::Children(NodeId::new("c")),
                FetchKind::Path(NodeId::new("c")),
            ]
        );

        let top = Node::root("top", "Top");
        let hidden = Node::folder("hidden", "Hidden").with_parent("top");
        let applied = nav.complete(
            requests[1].ticket,
            Ok(FetchPayload::Path(vec![top, hidden, deep, c])),
            NAME,
        );
        assert_eq!(applied, FetchApplied::PathUpdated);
        assert_eq!(
            nav.path().iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["top", "hidden", "deep", "c"]
        );
    }

    #[test]
    fn provisional_breadcrumb_still_requests_path() {
        let mut nav = NavigationController::new();
        let deep = Node::folder("deep", "Deep").with_parent("hidden");
        let requests = nav.open(&deep).unwrap();
        nav.complete(
            requests[1].ticket,
            Err(FetchError::Transport("offline".into())),
            NAME,
        );
        nav.open(&Node::folder("c", "C").with_parent("deep"));

        let requests = nav.open_via_breadcrumb(0).unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].kind, FetchKind::Path(NodeId::new("deep")));
    }

    #[test]
    fn renamed_snapshot_refreshes_memoized_path() {
        let mut resolver = PathResolver::default();
        resolver.record(&home());
        resolver.record(&docs());
        assert_eq!(resolver.resolve(&NodeId::new("docs")).unwrap()[1].name, "Docs");

        resolver.record(&Node::folder("docs", "Documents").with_parent("home"));
        let path = resolver.resolve(&NodeId::new("docs")).unwrap();
        assert_eq!(path[1].name, "Documents");
    }

    #[test]
    fn resolver_walks_parent_links_and_rejects_cycles() {
        let mut resolver = PathResolver::default();
        resolver.record(&home());
        resolver.record(&docs());
        resolver.record(&Node::folder("deep", "Deep").with_parent("docs"));
        let path = resolver.resolve(&NodeId::new("deep")).unwrap();
        assert_eq!(
            path.iter().map(|n| n.id.as_str()).collect::<Vec<_>>(),
            vec!["home", "docs", "deep"]
        );

        resolver.record(&Node::folder("a", "a").with_parent("b"));
        resolver.record(&Node::folder("b", "b").with_parent("a"));
        assert!(resolver.resolve(&NodeId::new("a")).is_none());
        assert!(resolver.resolve(&NodeId::new("missing")).is_none());
    }
}
