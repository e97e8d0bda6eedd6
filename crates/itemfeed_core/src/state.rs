use crate::view_model::ListViewModel;
use crate::{Record, RunId};

/// Lifecycle of the list as seen by a consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Observable list state: the latest items, the loading flag and the error text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListState {
    phase: ListPhase,
    items: Option<Vec<Record>>,
    error_message: String,
    next_run_id: RunId,
    last_run: Option<RunId>,
    dirty: bool,
}

impl ListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> ListViewModel {
        ListViewModel {
            phase: self.phase,
            items: self.items.clone(),
            is_loading: self.is_loading(),
            error_message: self.error_message.clone(),
            last_run: self.last_run,
        }
    }

    pub fn phase(&self) -> ListPhase {
        self.phase
    }

    pub fn items(&self) -> Option<&[Record]> {
        self.items.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.phase == ListPhase::Loading
    }

    pub fn error_message(&self) -> &str {
        &self.error_message
    }

    /// Returns whether anything observable changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn begin_run(&mut self) -> RunId {
        self.next_run_id += 1;
        let run_id = self.next_run_id;
        self.last_run = Some(run_id);
        self.enter_loading();
        run_id
    }

    pub(crate) fn enter_loading(&mut self) {
        if self.phase != ListPhase::Loading {
            self.phase = ListPhase::Loading;
            self.dirty = true;
        }
    }

    pub(crate) fn apply_success(&mut self, items: Vec<Record>) {
        self.phase = ListPhase::Loaded;
        self.items = Some(items);
        self.error_message.clear();
        self.dirty = true;
    }

    pub(crate) fn apply_error(&mut self, message: String) {
        self.phase = ListPhase::Failed;
        self.items = None;
        self.error_message = message;
        self.dirty = true;
    }
}
