use std::fmt;
use std::io;

use itemfeed_core::{PipelineResult, RunId};

/// One state emitted by a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineEvent {
    pub run_id: RunId,
    pub result: PipelineResult,
}

/// Why the remote source could not produce records.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("network error ({kind}): {message}")]
    Network {
        kind: NetworkFailure,
        message: String,
    },
    #[error("failed to decode payload: {0}")]
    Decode(String),
}

impl SourceError {
    pub(crate) fn network(kind: NetworkFailure, message: impl Into<String>) -> Self {
        Self::Network {
            kind,
            message: message.into(),
        }
    }

    pub fn network_kind(&self) -> Option<&NetworkFailure> {
        match self {
            SourceError::Network { kind, .. } => Some(kind),
            SourceError::Decode(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkFailure {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Connection,
}

impl fmt::Display for NetworkFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkFailure::InvalidUrl => write!(f, "invalid url"),
            NetworkFailure::HttpStatus(code) => write!(f, "http status {code}"),
            NetworkFailure::Timeout => write!(f, "timeout"),
            NetworkFailure::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            NetworkFailure::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            NetworkFailure::Connection => write!(f, "connection error"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine worker: {0}")]
    Startup(#[from] io::Error),
    #[error("engine worker has stopped")]
    Stopped,
}
