use std::sync::{mpsc, Arc};
use std::thread;

use itemfeed_core::RunId;
use itemfeed_logging::feed_debug;

use crate::pipeline::{FetchPipeline, ResultSink};
use crate::EngineError;

enum EngineCommand {
    Run { run_id: RunId },
}

/// Runs pipelines on a background tokio runtime.
///
/// Runs are independent: each command spawns its own task and nothing is
/// cancelled when a newer run starts. Dropping the handle stops the worker.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(pipeline: FetchPipeline, sink: Arc<dyn ResultSink>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("itemfeed-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let pipeline = pipeline.clone();
                    let sink = sink.clone();
                    runtime.spawn(async move {
                        handle_command(&pipeline, command, sink.as_ref()).await;
                    });
                }
                feed_debug!("Engine worker shutting down");
            })?;

        Ok(Self { cmd_tx })
    }

    /// Schedules one pipeline run and returns immediately.
    pub fn run(&self, run_id: RunId) -> Result<(), EngineError> {
        self.cmd_tx
            .send(EngineCommand::Run { run_id })
            .map_err(|_| EngineError::Stopped)
    }
}

async fn handle_command(pipeline: &FetchPipeline, command: EngineCommand, sink: &dyn ResultSink) {
    match command {
        EngineCommand::Run { run_id } => pipeline.run(run_id, sink).await,
    }
}
