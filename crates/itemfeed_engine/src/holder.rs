use std::sync::{mpsc, Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use itemfeed_core::{update, Effect, ListState, ListViewModel, Msg, PipelineResult, Record, RunId};
use itemfeed_logging::{feed_error, feed_trace};

use crate::pipeline::{FetchPipeline, ResultSink, FETCH_ERROR_MESSAGE};
use crate::{EngineError, EngineHandle, FetchSettings, PipelineEvent, RemoteSource, ReqwestSource};

/// Owns the list state for one consumer and keeps it in sync with pipeline runs.
///
/// Construction starts exactly one run. The fields are read-only from the
/// outside; every read goes through one lock, so a reader never sees a
/// half-applied transition.
pub struct StateHolder {
    shared: Arc<Shared>,
    engine: EngineHandle,
}

impl StateHolder {
    pub fn new(source: Arc<dyn RemoteSource>) -> Result<Self, EngineError> {
        let shared = Arc::new(Shared::default());
        let sink: Arc<dyn ResultSink> = Arc::new(HolderSink {
            shared: shared.clone(),
        });
        let engine = EngineHandle::new(FetchPipeline::new(source), sink)?;

        let holder = Self { shared, engine };
        holder.refresh();
        Ok(holder)
    }

    pub fn with_settings(settings: FetchSettings) -> Result<Self, EngineError> {
        Self::new(Arc::new(ReqwestSource::new(settings)))
    }

    /// Starts another run. Runs already in flight are not cancelled.
    pub fn refresh(&self) {
        for effect in self.shared.dispatch(Msg::RefreshRequested) {
            match effect {
                Effect::StartFetch { run_id } => self.start_fetch(run_id),
            }
        }
    }

    pub fn items(&self) -> Option<Vec<Record>> {
        self.shared.lock_state().items().map(<[Record]>::to_vec)
    }

    pub fn is_loading(&self) -> bool {
        self.shared.lock_state().is_loading()
    }

    pub fn error_message(&self) -> String {
        self.shared.lock_state().error_message().to_string()
    }

    /// All fields read under a single lock.
    pub fn snapshot(&self) -> ListViewModel {
        self.shared.lock_state().view()
    }

    /// Receives the current snapshot immediately, then one per observable change.
    pub fn subscribe(&self) -> mpsc::Receiver<ListViewModel> {
        let (tx, rx) = mpsc::channel();
        let state = self.shared.lock_state();
        let _ = tx.send(state.view());
        self.shared.lock_subscribers().push(tx);
        rx
    }

    /// Blocks until no run is loading, or returns `None` once `timeout` elapses.
    pub fn wait_until_settled(&self, timeout: Duration) -> Option<ListViewModel> {
        let guard = self.shared.lock_state();
        let (guard, wait) = self
            .shared
            .settled
            .wait_timeout_while(guard, timeout, |state| state.is_loading())
            .unwrap_or_else(PoisonError::into_inner);
        if wait.timed_out() {
            None
        } else {
            Some(guard.view())
        }
    }

    fn start_fetch(&self, run_id: RunId) {
        if let Err(err) = self.engine.run(run_id) {
            feed_error!("Could not start run {}: {}", run_id, err);
            self.shared.dispatch(Msg::Pipeline {
                run_id,
                result: PipelineResult::Error(FETCH_ERROR_MESSAGE.to_string()),
            });
        }
    }
}

#[derive(Default)]
struct Shared {
    state: Mutex<ListState>,
    settled: Condvar,
    subscribers: Mutex<Vec<mpsc::Sender<ListViewModel>>>,
}

impl Shared {
    fn lock_state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Vec<mpsc::Sender<ListViewModel>>> {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn dispatch(&self, msg: Msg) -> Vec<Effect> {
        let mut guard = self.lock_state();
        let state = std::mem::take(&mut *guard);
        let (mut state, effects) = update(state, msg);
        let changed = state.consume_dirty().then(|| state.view());
        *guard = state;

        if let Some(view) = changed {
            // Published while the state lock is held so subscribers see transitions in order.
            self.lock_subscribers()
                .retain(|subscriber| subscriber.send(view.clone()).is_ok());
            self.settled.notify_all();
        }
        effects
    }
}

struct HolderSink {
    shared: Arc<Shared>,
}

impl ResultSink for HolderSink {
    fn emit(&self, event: PipelineEvent) {
        feed_trace!("Run {} emitted {:?}", event.run_id, event.result);
        let effects = self.shared.dispatch(Msg::Pipeline {
            run_id: event.run_id,
            result: event.result,
        });
        debug_assert!(effects.is_empty());
    }
}
