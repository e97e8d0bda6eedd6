//! Itemfeed core: record model, list cleaning and the pure list state machine.
mod effect;
mod msg;
mod record;
mod result;
mod state;
mod transform;
mod update;
mod view_model;

pub use effect::Effect;
pub use msg::Msg;
pub use record::Record;
pub use result::{PipelineResult, RunId};
pub use state::{ListPhase, ListState};
pub use transform::{clean, is_valid_name, name_suffix};
pub use update::update;
pub use view_model::ListViewModel;
