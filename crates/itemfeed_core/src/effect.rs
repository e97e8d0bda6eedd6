use crate::RunId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Start one fetch pipeline run tagged with `run_id`.
    StartFetch { run_id: RunId },
}
