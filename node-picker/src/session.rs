//! Picker session: the event reducer a hosting UI drives.
//!
//! The session owns navigation, selection, the create-folder form and the search filter for
//! one picker invocation. It performs no IO: transitions return [`FetchRequest`]s and
//! [`CreateFolderRequest`]s which the host executes and feeds back through
//! [`PickerSession::complete_fetch`] and [`PickerSession::complete_create_folder`]. The
//! `*_with` helpers do that round trip against a [`NodeSource`].

use crate::config::PickerConfig;
use crate::create_folder::{
    CreateCompletion, CreateFolderRequest, CreateFolderState, CreateFolderSubflow,
    CreateFolderView, CreateTicket,
};
use crate::error::{CreateFolderError, FetchError, PickerError, PickerResult};
use crate::filter::SearchFilter;
use crate::insert::insert_sorted;
use crate::navigation::{
    FetchApplied, FetchKind, FetchPayload, FetchRequest, FetchTicket, LoadStatus, Location,
    NavigationController, StartLocation,
};
use crate::node::{Node, NodeId};
use crate::selection::{ClickOutcome, RejectReason, SelectionMode, SelectionStore};
use crate::sort::{SortCriterion, sort_nodes};
use crate::source::NodeSource;
use crate::validity::ValidityEvaluator;

#[cfg(feature = "tracing")]
use tracing::{debug, info, trace};

/// User intent forwarded by the hosting UI.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerEvent {
    /// Enter a folder or root from the listing.
    Open(Node),
    /// Enter the breadcrumb at this index.
    OpenBreadcrumb(usize),
    /// Show the virtual root list.
    BackToRoot,
    /// Selection click on a listed node.
    Click(NodeId),
    /// Re-issue the failed fetches of the current location.
    Retry,
    /// Change the sort criterion.
    SetSort(SortCriterion),
    /// Change the search query.
    SetSearch(String),
    /// Show the create-folder form.
    OpenCreateFolder,
    /// Edit the create-folder name.
    SetCreateFolderName(String),
    /// Close the create-folder form.
    CancelCreateFolder,
    /// Submit the create-folder form.
    SubmitCreateFolder,
    /// Confirm the effective selection.
    Confirm,
    /// Close the picker without confirming.
    Cancel,
}

/// What the host has to do after an event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PickerOutcome {
    /// Nothing; re-render the view.
    None,
    /// Execute these fetches and report back with [`PickerSession::complete_fetch`].
    Fetch(Vec<FetchRequest>),
    /// Execute this creation and report back with [`PickerSession::complete_create_folder`].
    CreateFolder(CreateFolderRequest),
    /// The user confirmed these nodes; the session is finished.
    Confirmed(Vec<Node>),
    /// The user closed the picker; the session is finished.
    Closed,
}

/// Render-ready snapshot of a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PickerView {
    /// Root list or opened folder.
    pub location: Location,
    /// Breadcrumbs, root first.
    pub current_path: Vec<Node>,
    /// Sorted children matching the search query.
    pub children: Vec<Node>,
    /// Ids of the nodes a confirm would return.
    pub effective_selection_ids: Vec<NodeId>,
    /// Whether the confirm button is enabled.
    pub is_confirm_enabled: bool,
    /// Size of the effective selection.
    pub picked_count: usize,
    /// Pick limit (`None` = unlimited).
    pub max_count: Option<usize>,
    /// Create-folder form.
    pub create_folder: CreateFolderView,
    /// Loading state of the listing.
    pub load_status: LoadStatus,
    /// Active sort criterion.
    pub sort: SortCriterion,
    /// Whether the "new folder" action is available.
    pub can_create_folder: bool,
}

/// One picker invocation.
#[derive(Debug)]
pub struct PickerSession {
    start: StartLocation,
    sort: SortCriterion,
    validity: ValidityEvaluator,
    navigation: NavigationController,
    selection: SelectionStore,
    create_folder: CreateFolderSubflow,
    filter: SearchFilter,
    finished: bool,
    result: Option<PickerResult<Vec<Node>>>,
}

impl PickerSession {
    /// Create a session. Nothing is fetched until [`Self::start`].
    pub fn new(mut config: PickerConfig) -> Self {
        let validity = config.take_validity();
        Self {
            start: config.start.clone(),
            sort: config.sort,
            validity,
            navigation: NavigationController::new(),
            selection: SelectionStore::new(config.mode, config.max_count),
            create_folder: CreateFolderSubflow::default(),
            filter: SearchFilter::new(config.search),
            finished: false,
            result: None,
        }
    }

    /// Selection mode.
    pub fn mode(&self) -> SelectionMode {
        self.selection.mode()
    }

    /// Active sort criterion.
    pub fn sort(&self) -> SortCriterion {
        self.sort
    }

    /// Navigation state.
    pub fn navigation(&self) -> &NavigationController {
        &self.navigation
    }

    /// Selection state.
    pub fn selection(&self) -> &SelectionStore {
        &self.selection
    }

    /// Create-folder form state.
    pub fn create_folder_state(&self) -> &CreateFolderState {
        self.create_folder.state()
    }

    /// Active search filter.
    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }

    /// Whether a confirm or cancel already ended the session.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Move to the configured start location.
    pub fn start(&mut self) -> Vec<FetchRequest> {
        if self.finished {
            return Vec::new();
        }
        self.create_folder.cancel();
        let start = self.start.clone();
        let requests = self.navigation.start(&start);
        match self.navigation.current_folder() {
            Some(folder) => self.selection.on_folder_opened(folder, &self.validity),
            // A deep-linked folder is reported later through `FetchApplied::FolderResolved`.
            None => self.selection.on_returned_to_root(),
        }
        requests
    }

    /// Apply one UI event.
    pub fn handle_event(&mut self, event: PickerEvent) -> PickerOutcome {
        if self.finished {
            return PickerOutcome::None;
        }
        match event {
            PickerEvent::Open(node) => self
                .open(&node)
                .map_or(PickerOutcome::None, PickerOutcome::Fetch),
            PickerEvent::OpenBreadcrumb(index) => self
                .open_breadcrumb(index)
                .map_or(PickerOutcome::None, PickerOutcome::Fetch),
            PickerEvent::BackToRoot => PickerOutcome::Fetch(self.back_to_root()),
            PickerEvent::Click(id) => {
                self.click(&id);
                PickerOutcome::None
            }
            PickerEvent::Retry => PickerOutcome::Fetch(self.retry()),
            PickerEvent::SetSort(criterion) => {
                self.set_sort(criterion);
                PickerOutcome::None
            }
            PickerEvent::SetSearch(query) => {
                self.set_search(query);
                PickerOutcome::None
            }
            PickerEvent::OpenCreateFolder => {
                self.open_create_folder();
                PickerOutcome::None
            }
            PickerEvent::SetCreateFolderName(name) => {
                self.set_create_folder_name(name);
                PickerOutcome::None
            }
            PickerEvent::CancelCreateFolder => {
                self.cancel_create_folder();
                PickerOutcome::None
            }
            PickerEvent::SubmitCreateFolder => self
                .submit_create_folder()
                .map_or(PickerOutcome::None, PickerOutcome::CreateFolder),
            PickerEvent::Confirm => match self.confirm() {
                Ok(nodes) => PickerOutcome::Confirmed(nodes),
                Err(_) => PickerOutcome::None,
            },
            PickerEvent::Cancel => {
                self.cancel();
                PickerOutcome::Closed
            }
        }
    }

    /// Enter `node`. Files are ignored.
    pub fn open(&mut self, node: &Node) -> Option<Vec<FetchRequest>> {
        if self.finished {
            return None;
        }
        let requests = self.navigation.open(node)?;
        self.create_folder.cancel();
        self.selection.on_folder_opened(node, &self.validity);
        Some(requests)
    }

    /// Enter the breadcrumb at `index`.
    pub fn open_breadcrumb(&mut self, index: usize) -> Option<Vec<FetchRequest>> {
        if self.finished {
            return None;
        }
        let requests = self.navigation.open_via_breadcrumb(index)?;
        self.create_folder.cancel();
        if let Some(folder) = self.navigation.current_folder() {
            self.selection.on_folder_opened(folder, &self.validity);
        }
        Some(requests)
    }

    /// Show the virtual root list.
    pub fn back_to_root(&mut self) -> Vec<FetchRequest> {
        if self.finished {
            return Vec::new();
        }
        self.create_folder.cancel();
        self.selection.on_returned_to_root();
        self.navigation.back_to_root()
    }

    /// Selection click on the listed node `id`.
    pub fn click(&mut self, id: &NodeId) -> ClickOutcome {
        if self.finished {
            return ClickOutcome::Rejected(RejectReason::UnknownNode);
        }
        self.create_folder.dismiss_form();
        let Some(node) = self.navigation.children().iter().find(|n| &n.id == id) else {
            trace_click_rejected(id, RejectReason::UnknownNode);
            return ClickOutcome::Rejected(RejectReason::UnknownNode);
        };
        let outcome = self.selection.on_node_clicked(node, &self.validity);
        if let ClickOutcome::Rejected(reason) = outcome {
            trace_click_rejected(id, reason);
        }
        outcome
    }

    /// Re-issue the fetches of the current location.
    pub fn retry(&mut self) -> Vec<FetchRequest> {
        if self.finished {
            return Vec::new();
        }
        self.navigation.retry()
    }

    /// Change the sort criterion and re-sort the loaded children.
    pub fn set_sort(&mut self, criterion: SortCriterion) {
        if self.finished {
            return;
        }
        self.sort = criterion;
        sort_nodes(self.navigation.children_mut(), criterion);
    }

    /// Change the search query.
    pub fn set_search(&mut self, query: impl Into<String>) {
        if self.finished {
            return;
        }
        self.filter = SearchFilter::new(query);
    }

    /// Show the create-folder form. Returns `false` when creating is not possible here.
    pub fn open_create_folder(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.create_folder.open_form(self.navigation.current_folder())
    }

    /// Edit the create-folder name.
    pub fn set_create_folder_name(&mut self, name: impl Into<String>) {
        if self.finished {
            return;
        }
        self.create_folder.set_name(name);
    }

    /// Close the create-folder form.
    pub fn cancel_create_folder(&mut self) {
        if self.finished {
            return;
        }
        self.create_folder.cancel();
    }

    /// Submit the create-folder form for the opened folder.
    pub fn submit_create_folder(&mut self) -> Option<CreateFolderRequest> {
        if self.finished {
            return None;
        }
        let parent = self.navigation.current_folder()?.clone();
        self.create_folder.submit(&parent)
    }

    /// Feed a fetch result back.
    pub fn complete_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<FetchPayload, FetchError>,
    ) -> FetchApplied {
        if self.finished {
            return FetchApplied::Stale;
        }
        let applied = self.navigation.complete(ticket, result, self.sort);
        if let FetchApplied::FolderResolved(folder) = &applied {
            self.selection.on_folder_opened(folder, &self.validity);
        }
        applied
    }

    /// Feed a create-folder result back.
    ///
    /// On success the folder is inserted in sort order and auto-selected. A result for a
    /// folder the user already left is discarded.
    pub fn complete_create_folder(
        &mut self,
        ticket: CreateTicket,
        result: Result<Node, CreateFolderError>,
    ) -> CreateCompletion {
        let parent_id = match self.create_folder.state() {
            CreateFolderState::Submitting { parent_id, .. } => parent_id.clone(),
            _ => return CreateCompletion::Stale,
        };
        let still_there = self
            .navigation
            .current_folder()
            .is_some_and(|f| f.id == parent_id);
        if self.finished || !still_there {
            self.create_folder.cancel();
            return CreateCompletion::Stale;
        }

        let completion = self.create_folder.complete(ticket, result);
        match &completion {
            CreateCompletion::Created(node) => {
                // A refresh may already have listed the new folder; replace that entry.
                let children = self.navigation.children_mut();
                children.retain(|n| n.id != node.id);
                let index = insert_sorted(children, node.clone(), self.sort);
                trace_folder_created(&node.id, index);
                if !self.selection.is_picked(&node.id) {
                    self.selection.on_node_clicked(node, &self.validity);
                }
            }
            CreateCompletion::Failed(err) => trace_folder_create_failed(&parent_id, err),
            CreateCompletion::Stale => {}
        }
        completion
    }

    /// Finish with the effective selection.
    pub fn confirm(&mut self) -> PickerResult<Vec<Node>> {
        if self.finished || !self.selection.is_confirm_enabled() {
            return Err(PickerError::ConfirmDisabled);
        }
        let nodes: Vec<Node> = self
            .selection
            .effective_selection()
            .into_iter()
            .cloned()
            .collect();
        trace_session_finished("confirmed", nodes.len());
        self.finish(Ok(nodes.clone()));
        Ok(nodes)
    }

    /// Finish without a selection.
    pub fn cancel(&mut self) {
        if self.finished {
            return;
        }
        trace_session_finished("closed", 0);
        self.finish(Err(PickerError::Cancelled));
    }

    /// Take the final result once the session is finished.
    pub fn take_result(&mut self) -> Option<PickerResult<Vec<Node>>> {
        self.result.take()
    }

    fn finish(&mut self, result: PickerResult<Vec<Node>>) {
        self.finished = true;
        self.create_folder.cancel();
        self.result = Some(result);
    }

    /// Sorted children that match the search query.
    pub fn visible_children(&self) -> Vec<&Node> {
        self.filter.apply(self.navigation.children())
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> PickerView {
        let effective_selection_ids = self.selection.effective_ids();
        PickerView {
            location: self.navigation.location().clone(),
            current_path: self.navigation.path().to_vec(),
            children: self.visible_children().into_iter().cloned().collect(),
            picked_count: effective_selection_ids.len(),
            effective_selection_ids,
            is_confirm_enabled: self.selection.is_confirm_enabled(),
            max_count: self.selection.max_count(),
            create_folder: self.create_folder.view(),
            load_status: self.navigation.status().clone(),
            sort: self.sort,
            can_create_folder: self
                .navigation
                .current_folder()
                .is_some_and(Node::can_write),
        }
    }

    /// [`Self::start`], then run the fetches against `source`.
    pub async fn start_with<S: NodeSource>(&mut self, source: &S) -> Vec<FetchApplied> {
        let requests = self.start();
        self.execute_fetches(source, requests).await
    }

    /// [`Self::open`], then run the fetches against `source`.
    pub async fn open_with<S: NodeSource>(
        &mut self,
        source: &S,
        node: &Node,
    ) -> Option<Vec<FetchApplied>> {
        let requests = self.open(node)?;
        Some(self.execute_fetches(source, requests).await)
    }

    /// [`Self::retry`], then run the fetches against `source`.
    pub async fn retry_with<S: NodeSource>(&mut self, source: &S) -> Vec<FetchApplied> {
        let requests = self.retry();
        self.execute_fetches(source, requests).await
    }

    /// [`Self::submit_create_folder`], then run the creation against `source`.
    pub async fn create_folder_with<S: NodeSource>(
        &mut self,
        source: &S,
    ) -> Option<CreateCompletion> {
        let request = self.submit_create_folder()?;
        let result = source
            .create_folder(&request.parent_id, &request.name)
            .await;
        Some(self.complete_create_folder(request.ticket, result))
    }

    /// Run `requests` against `source` in order and feed every result back.
    pub async fn execute_fetches<S: NodeSource>(
        &mut self,
        source: &S,
        requests: Vec<FetchRequest>,
    ) -> Vec<FetchApplied> {
        let mut applied = Vec::with_capacity(requests.len());
        for request in requests {
            let result = match &request.kind {
                FetchKind::Roots => source.fetch_roots().await.map(FetchPayload::Roots),
                FetchKind::Children(id) => source
                    .fetch_children(id, self.sort)
                    .await
                    .map(FetchPayload::Children),
                FetchKind::Path(id) => source.fetch_path(id).await.map(FetchPayload::Path),
            };
            applied.push(self.complete_fetch(request.ticket, result));
        }
        applied
    }
}

#[cfg(feature = "tracing")]
fn trace_click_rejected(id: &NodeId, reason: RejectReason) {
    trace!(
        event = "selection.click_rejected",
        node = %id, ?reason, "selection click rejected"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_click_rejected(_id: &NodeId, _reason: RejectReason) {}

#[cfg(feature = "tracing")]
fn trace_folder_created(id: &NodeId, index: usize) {
    debug!(event = "folder.created", node = %id, index, "folder created");
}

#[cfg(not(feature = "tracing"))]
fn trace_folder_created(_id: &NodeId, _index: usize) {}

#[cfg(feature = "tracing")]
fn trace_folder_create_failed(parent: &NodeId, err: &CreateFolderError) {
    debug!(
        event = "folder.create_failed",
        parent = %parent, error = %err, "folder creation failed"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_folder_create_failed(_parent: &NodeId, _err: &CreateFolderError) {}

#[cfg(feature = "tracing")]
fn trace_session_finished(outcome: &'static str, picked: usize) {
    info!(
        event = "session.finished",
        outcome, picked, "picker session finished"
    );
}

#[cfg(not(feature = "tracing"))]
fn trace_session_finished(_outcome: &'static str, _picked: usize) {}
