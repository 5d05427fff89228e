//! Error types for the picker core.
//!
//! Selection constraint violations (limit reached, invalid node clicked) are not errors;
//! they are reported as [`crate::ClickOutcome::Rejected`] values.

use thiserror::Error;

use crate::node::NodeId;

/// Result type for picker operations.
pub type PickerResult<T> = Result<T, PickerError>;

/// Failure reported by the external data layer while fetching roots, children or a path.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The requested node does not exist (anymore).
    #[error("node not found: {0}")]
    NotFound(NodeId),
    /// The backend refused to list the node.
    #[error("permission denied: {0}")]
    PermissionDenied(NodeId),
    /// Transport or backend failure.
    #[error("transport error: {0}")]
    Transport(String),
}

/// Failure creating a folder. The display text is shown under the create-folder form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CreateFolderError {
    /// Name rejected before reaching the backend.
    #[error("Invalid folder name")]
    InvalidName,
    /// A sibling with this name already exists.
    #[error("A folder named '{0}' already exists")]
    DuplicateName(String),
    /// The parent folder does not grant write access.
    #[error("You are not allowed to create folders here")]
    PermissionDenied,
    /// Backend failure.
    #[error("Failed to create folder: {0}")]
    Other(String),
}

/// Errors returned by a picker session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    /// The user closed the picker.
    #[error("cancelled")]
    Cancelled,
    /// Confirm was requested while the current selection cannot be confirmed.
    #[error("confirm is disabled for the current selection")]
    ConfirmDisabled,
    /// A navigation fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// Creating a folder failed.
    #[error(transparent)]
    CreateFolder(#[from] CreateFolderError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_folder_errors_read_as_inline_messages() {
        assert_eq!(
            CreateFolderError::DuplicateName("X".into()).to_string(),
            "A folder named 'X' already exists"
        );
        let err: PickerError = CreateFolderError::InvalidName.into();
        assert_eq!(err.to_string(), "Invalid folder name");
    }
}
