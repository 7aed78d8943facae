//! # Hindsight Engine
//!
//! The few-shot example retrieval pipeline: classify the incoming prompt,
//! score the episodic corpus for relevance, select and render the best
//! matches, and record usage — all in one synchronous pass that never
//! fails the surrounding prompt pipeline.
//!
//! The entry point is [`pipeline::run_invocation`]; everything else is the
//! stages it composes.

pub mod classify;
pub mod debug;
pub mod format;
pub mod pipeline;
pub mod rank;
pub mod select;
pub mod store;
pub mod track;

pub use classify::classify;
pub use debug::{DebugRecord, DebugSink, FileSink, NullSink};
pub use format::render;
pub use pipeline::{run_invocation, PipelineOutcome, SilentReason};
pub use rank::{KeywordOverlap, Similarity};
pub use select::select;
pub use store::{ExampleStore, InMemoryStore, JsonlStore};
pub use track::record_access;
