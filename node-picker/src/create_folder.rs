use crate::error::CreateFolderError;
use crate::node::{Node, NodeId};

/// Correlates a create-folder completion with the submission that issued it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CreateTicket(u64);

/// Call the host must make: `create_folder(parent_id, name)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateFolderRequest {
    /// Ticket to hand back with the result.
    pub ticket: CreateTicket,
    /// Folder the new folder goes into.
    pub parent_id: NodeId,
    /// Trimmed folder name.
    pub name: String,
}

/// Inline "new folder" form state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum CreateFolderState {
    /// No form shown.
    #[default]
    Hidden,
    /// Form shown; the user is typing.
    FormOpen {
        /// Typed name.
        name: String,
        /// Error from the last submission, cleared on the next keystroke.
        error: Option<CreateFolderError>,
    },
    /// Waiting for the backend.
    Submitting {
        /// Submitted name, restored into the form on failure.
        name: String,
        /// Parent the request targets.
        parent_id: NodeId,
        /// In-flight ticket.
        ticket: CreateTicket,
    },
}

/// Effect of feeding a create-folder completion back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CreateCompletion {
    /// The completion no longer matches the form (user navigated or cancelled); ignored.
    Stale,
    /// The folder was created; the form is hidden again.
    Created(Node),
    /// The backend refused; the form is open again with the error and the typed name.
    Failed(CreateFolderError),
}

/// Ephemeral create-folder form scoped to the opened folder.
#[derive(Clone, Debug, Default)]
pub struct CreateFolderSubflow {
    state: CreateFolderState,
    next_ticket: u64,
}

impl CreateFolderSubflow {
    /// Current state.
    pub fn state(&self) -> &CreateFolderState {
        &self.state
    }

    /// Whether the form (or a submission) is active.
    pub fn is_active(&self) -> bool {
        !matches!(self.state, CreateFolderState::Hidden)
    }

    /// Whether a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        matches!(self.state, CreateFolderState::Submitting { .. })
    }

    /// Show an empty form inside `folder`.
    ///
    /// Refused (returns `false`) without an opened folder, without write access, or while a
    /// submission is in flight.
    pub fn open_form(&mut self, folder: Option<&Node>) -> bool {
        let writable = folder.is_some_and(Node::can_write);
        if !writable || self.is_submitting() {
            return false;
        }
        self.state = CreateFolderState::FormOpen {
            name: String::new(),
            error: None,
        };
        true
    }

    /// Replace the typed name; any displayed error is cleared.
    pub fn set_name(&mut self, value: impl Into<String>) {
        if let CreateFolderState::FormOpen { name, error } = &mut self.state {
            *name = value.into();
            *error = None;
        }
    }

    /// Close the form, discarding the typed name. An in-flight submission is abandoned.
    pub fn cancel(&mut self) {
        self.state = CreateFolderState::Hidden;
    }

    /// A selection click closes an open form. In-flight submissions are kept.
    pub fn dismiss_form(&mut self) {
        if matches!(self.state, CreateFolderState::FormOpen { .. }) {
            self.state = CreateFolderState::Hidden;
        }
    }

    /// Submit the typed name for `parent`.
    ///
    /// A second submit while submitting is a no-op. Names that can never be valid are
    /// rejected locally and surfaced as a form error.
    pub fn submit(&mut self, parent: &Node) -> Option<CreateFolderRequest> {
        let CreateFolderState::FormOpen { name, error } = &mut self.state else {
            return None;
        };
        let trimmed = name.trim().to_string();
        if !is_valid_folder_name(&trimmed) {
            *error = Some(CreateFolderError::InvalidName);
            return None;
        }
        if !parent.can_write() {
            *error = Some(CreateFolderError::PermissionDenied);
            return None;
        }

        self.next_ticket = self.next_ticket.wrapping_add(1);
        let ticket = CreateTicket(self.next_ticket);
        self.state = CreateFolderState::Submitting {
            name: trimmed.clone(),
            parent_id: parent.id.clone(),
            ticket,
        };
        Some(CreateFolderRequest {
            ticket,
            parent_id: parent.id.clone(),
            name: trimmed,
        })
    }

    /// Feed the backend result back.
    pub fn complete(
        &mut self,
        ticket: CreateTicket,
        result: Result<Node, CreateFolderError>,
    ) -> CreateCompletion {
        let CreateFolderState::Submitting {
            name,
            ticket: pending,
            ..
        } = &self.state
        else {
            return CreateCompletion::Stale;
        };
        if *pending != ticket {
            return CreateCompletion::Stale;
        }

        match result {
            Ok(node) => {
                self.state = CreateFolderState::Hidden;
                CreateCompletion::Created(node)
            }
            Err(err) => {
                self.state = CreateFolderState::FormOpen {
                    name: name.clone(),
                    error: Some(err.clone()),
                };
                CreateCompletion::Failed(err)
            }
        }
    }

    /// Snapshot for rendering.
    pub fn view(&self) -> CreateFolderView {
        match &self.state {
            CreateFolderState::Hidden => CreateFolderView::default(),
            CreateFolderState::FormOpen { name, error } => CreateFolderView {
                visible: true,
                name: name.clone(),
                error: error.as_ref().map(ToString::to_string),
                submitting: false,
            },
            CreateFolderState::Submitting { name, .. } => CreateFolderView {
                visible: true,
                name: name.clone(),
                error: None,
                submitting: true,
            },
        }
    }
}

/// Render-ready snapshot of the create-folder form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CreateFolderView {
    /// Whether the form is shown.
    pub visible: bool,
    /// Name field content.
    pub name: String,
    /// Inline error message.
    pub error: Option<String>,
    /// Whether the submit button should show progress.
    pub submitting: bool,
}

fn is_valid_folder_name(name: &str) -> bool {
    !(name.is_empty()
        || name == "."
        || name == ".."
        || name.contains('/')
        || name.contains('\\')
        || name.contains('\0'))
}
