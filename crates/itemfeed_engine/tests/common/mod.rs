#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use itemfeed_core::Record;
use itemfeed_engine::{NetworkFailure, PipelineEvent, RemoteSource, ResultSink, SourceError};

/// Serves canned responses in order, repeating the last one.
pub struct ScriptedSource {
    responses: Vec<Result<Vec<Record>, SourceError>>,
    delay: Duration,
    calls: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(responses: Vec<Result<Vec<Record>, SourceError>>) -> Self {
        Self {
            responses,
            delay: Duration::ZERO,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn ok(records: Vec<Record>) -> Self {
        Self::new(vec![Ok(records)])
    }

    pub fn offline() -> Self {
        Self::new(vec![Err(SourceError::Network {
            kind: NetworkFailure::Connection,
            message: "connection refused".to_string(),
        })])
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl RemoteSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        let index = call.min(self.responses.len() - 1);
        self.responses[index].clone()
    }
}

#[derive(Default)]
pub struct TestSink {
    events: Arc<Mutex<Vec<PipelineEvent>>>,
}

impl TestSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<PipelineEvent> {
        self.events.lock().unwrap().drain(..).collect()
    }
}

impl ResultSink for TestSink {
    fn emit(&self, event: PipelineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// The raw feed from the pipeline scenarios, in wire order.
pub fn raw_feed() -> Vec<Record> {
    vec![
        Record::new(1, 2, "Item 3"),
        Record::new(2, 1, ""),
        Record::new(3, 1, "Item 1"),
    ]
}

pub fn cleaned_feed() -> Vec<Record> {
    vec![Record::new(3, 1, "Item 1"), Record::new(1, 2, "Item 3")]
}

/// A source whose fetch panics instead of returning.
pub struct PanickingSource;

#[async_trait::async_trait]
impl RemoteSource for PanickingSource {
    async fn fetch(&self) -> Result<Vec<Record>, SourceError> {
        panic!("feed parser blew up");
    }
}
