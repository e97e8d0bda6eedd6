//! Itemfeed engine: remote fetch, the fetch pipeline and the observable list holder.
mod decode;
mod engine;
mod holder;
mod pipeline;
mod source;
mod types;

pub use decode::decode_records;
pub use engine::EngineHandle;
pub use holder::StateHolder;
pub use pipeline::{ChannelResultSink, FetchPipeline, ResultSink, FETCH_ERROR_MESSAGE};
pub use source::{FetchSettings, RemoteSource, ReqwestSource, DEFAULT_ENDPOINT};
pub use types::{EngineError, NetworkFailure, PipelineEvent, SourceError};
