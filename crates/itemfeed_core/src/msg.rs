#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Consumer asked for a fresh fetch (also sent once on holder creation).
    RefreshRequested,
    /// A state emitted by the fetch pipeline for one run.
    Pipeline {
        run_id: crate::RunId,
        result: crate::PipelineResult,
    },
}
