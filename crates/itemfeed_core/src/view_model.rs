use crate::{ListPhase, Record, RunId};

/// Snapshot of [`crate::ListState`] handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListViewModel {
    pub phase: ListPhase,
    /// Absent until a run succeeds.
    pub items: Option<Vec<Record>>,
    pub is_loading: bool,
    /// Empty unless the latest terminal state was an error.
    pub error_message: String,
    pub last_run: Option<RunId>,
}

impl ListViewModel {
    pub fn item_count(&self) -> usize {
        self.items.as_ref().map_or(0, Vec::len)
    }

    pub fn has_error(&self) -> bool {
        !self.error_message.is_empty()
    }
}
