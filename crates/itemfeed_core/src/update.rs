use itemfeed_logging::feed_debug;

use crate::{Effect, ListState, Msg, PipelineResult};

/// Pure update function: applies a message to state and returns any effects.
///
/// Terminal results apply whichever run they come from, so with overlapping
/// runs the last one to finish wins.
pub fn update(mut state: ListState, msg: Msg) -> (ListState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested => {
            let run_id = state.begin_run();
            feed_debug!("Refresh requested, starting run {}", run_id);
            vec![Effect::StartFetch { run_id }]
        }
        Msg::Pipeline { run_id, result } => {
            match result {
                PipelineResult::Loading => state.enter_loading(),
                PipelineResult::Success(items) => {
                    feed_debug!("Run {} succeeded with {} items", run_id, items.len());
                    state.apply_success(items);
                }
                PipelineResult::Error(message) => {
                    feed_debug!("Run {} failed", run_id);
                    state.apply_error(message);
                }
            }
            Vec::new()
        }
    };

    (state, effects)
}
