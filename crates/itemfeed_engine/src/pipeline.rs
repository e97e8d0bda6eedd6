use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::{mpsc, Arc};

use futures_util::FutureExt;
use itemfeed_core::{clean, PipelineResult, RunId};
use itemfeed_logging::{feed_error, feed_info, feed_warn};

use crate::{PipelineEvent, RemoteSource};

/// Message published for every failed run; the cause only goes to the log.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to download data";

/// Receives the states emitted by pipeline runs.
pub trait ResultSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

pub struct ChannelResultSink {
    tx: mpsc::Sender<PipelineEvent>,
}

impl ChannelResultSink {
    pub fn new(tx: mpsc::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }
}

impl ResultSink for ChannelResultSink {
    fn emit(&self, event: PipelineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Fetches from a [`RemoteSource`] and cleans the result.
#[derive(Clone)]
pub struct FetchPipeline {
    source: Arc<dyn RemoteSource>,
}

impl FetchPipeline {
    pub fn new(source: Arc<dyn RemoteSource>) -> Self {
        Self { source }
    }

    /// Emits `Loading`, then exactly one of `Success` or `Error`, into `sink`.
    ///
    /// A source that panics ends the run with `Error` like any other failure.
    pub async fn run(&self, run_id: RunId, sink: &dyn ResultSink) {
        sink.emit(PipelineEvent {
            run_id,
            result: PipelineResult::Loading,
        });
        feed_info!("Run {} started", run_id);

        let outcome = AssertUnwindSafe(self.source.fetch()).catch_unwind().await;
        let result = match outcome {
            Ok(Ok(records)) => {
                let fetched = records.len();
                let items = clean(records);
                feed_info!(
                    "Run {} finished: {} fetched, {} kept",
                    run_id,
                    fetched,
                    items.len()
                );
                PipelineResult::Success(items)
            }
            Ok(Err(err)) => {
                feed_warn!("Run {} failed: {}", run_id, err);
                PipelineResult::Error(FETCH_ERROR_MESSAGE.to_string())
            }
            Err(panic) => {
                feed_error!("Run {} panicked: {}", run_id, panic_message(&*panic));
                PipelineResult::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };

        sink.emit(PipelineEvent { run_id, result });
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}
