use crate::Record;

/// Identifies one invocation of the fetch pipeline.
pub type RunId = u64;

/// State emitted by one fetch pipeline run.
///
/// A run emits `Loading` once, then exactly one of `Success` or `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineResult {
    Loading,
    Success(Vec<Record>),
    Error(String),
}

impl PipelineResult {
    pub fn value(&self) -> Option<&[Record]> {
        match self {
            PipelineResult::Success(items) => Some(items),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            PipelineResult::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, PipelineResult::Loading)
    }
}
