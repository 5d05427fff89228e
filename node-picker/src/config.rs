use crate::navigation::StartLocation;
use crate::node::{Node, NodeId};
use crate::selection::SelectionMode;
use crate::sort::SortCriterion;
use crate::validity::ValidityEvaluator;

type PredicateFn = dyn Fn(&Node) -> bool + 'static;

/// Picker configuration.
///
/// ```
/// use node_picker::{PickerConfig, SelectionMode, predicates};
///
/// let config = PickerConfig::new()
///     .mode(SelectionMode::Multiple)
///     .max_count(Some(3))
///     .can_select_opened_folder(true)
///     .validity(predicates::folders_only());
/// assert_eq!(config.max_count_value(), Some(3));
/// ```
pub struct PickerConfig {
    pub(crate) mode: SelectionMode,
    pub(crate) max_count: Option<usize>,
    pub(crate) can_select_opened_folder: bool,
    pub(crate) sort: SortCriterion,
    pub(crate) start: StartLocation,
    pub(crate) validity: Option<Box<PredicateFn>>,
    pub(crate) search: String,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PickerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PickerConfig")
            .field("mode", &self.mode)
            .field("max_count", &self.max_count)
            .field("can_select_opened_folder", &self.can_select_opened_folder)
            .field("sort", &self.sort)
            .field("start", &self.start)
            .field("has_validity", &self.validity.is_some())
            .field("search", &self.search)
            .finish()
    }
}

impl PickerConfig {
    /// Single pick, unlimited browsing from the root list, name ascending.
    pub fn new() -> Self {
        Self {
            mode: SelectionMode::Single,
            max_count: None,
            can_select_opened_folder: false,
            sort: SortCriterion::NameAsc,
            start: StartLocation::Roots,
            validity: None,
            search: String::new(),
        }
    }

    /// Selection mode.
    pub fn mode(mut self, mode: SelectionMode) -> Self {
        self.mode = mode;
        self
    }

    /// Pick limit for `Multiple` (ignored by `Single`). `Some(0)` is raised to one.
    pub fn max_count(mut self, max: Option<usize>) -> Self {
        self.max_count = max.map(|n| n.max(1));
        self
    }

    /// Whether the opened folder counts as the implicit pick.
    pub fn can_select_opened_folder(mut self, enabled: bool) -> Self {
        self.can_select_opened_folder = enabled;
        self
    }

    /// Initial sort criterion.
    pub fn sort(mut self, criterion: SortCriterion) -> Self {
        self.sort = criterion;
        self
    }

    /// Start at the root list.
    pub fn start_at_roots(mut self) -> Self {
        self.start = StartLocation::Roots;
        self
    }

    /// Start inside folder `id` (deep link).
    pub fn start_in(mut self, id: impl Into<NodeId>) -> Self {
        self.start = StartLocation::Folder(id.into());
        self
    }

    /// Selection predicate.
    pub fn validity<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&Node) -> bool + 'static,
    {
        self.validity = Some(Box::new(predicate));
        self
    }

    /// Initial search query.
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    /// Effective pick limit after mode normalization.
    pub fn max_count_value(&self) -> Option<usize> {
        match self.mode {
            SelectionMode::Single => Some(1),
            SelectionMode::Multiple => self.max_count,
        }
    }

    pub(crate) fn take_validity(&mut self) -> ValidityEvaluator {
        let mut evaluator = ValidityEvaluator::new(self.can_select_opened_folder);
        if let Some(predicate) = self.validity.take() {
            evaluator.set_predicate(predicate);
        }
        evaluator
    }
}
