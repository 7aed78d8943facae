//! `hindsight inject` — the hook entry point.
//!
//! Reads one JSON [`InvocationPayload`] from stdin and writes the
//! injectable block to stdout when at least one example was selected.
//! Absence of output is the normal "no relevant examples" outcome.
//!
//! This command embodies the engine's external contract: it never reports
//! failure. A malformed payload, an unusable corpus, or even a panic in a
//! pipeline stage all degrade to silence.

use hindsight_config::EngineConfig;
use hindsight_core::payload::InvocationPayload;
use hindsight_engine::debug::{DebugSink, FileSink, NullSink};
use hindsight_engine::store::JsonlStore;
use hindsight_engine::{run_invocation, PipelineOutcome, SilentReason};
use std::io::Read;
use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, warn};

pub fn run() {
    let mut input = String::new();
    if std::io::stdin().read_to_string(&mut input).is_err() {
        warn!("Could not read payload from stdin");
        return;
    }

    let config = EngineConfig::resolve();
    if let Some(block) = respond(&input, &config) {
        print!("{block}");
    }
}

/// Map one raw payload to the text to emit, if any.
fn respond(input: &str, config: &EngineConfig) -> Option<String> {
    match invoke(input, config) {
        PipelineOutcome::Injected { block, .. } => Some(block),
        PipelineOutcome::Silent(reason) => {
            debug!(?reason, "Nothing to inject");
            None
        }
    }
}

fn invoke(input: &str, config: &EngineConfig) -> PipelineOutcome {
    let payload: InvocationPayload = match serde_json::from_str(input) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Malformed invocation payload");
            return PipelineOutcome::Silent(SilentReason::Degraded(format!(
                "malformed payload: {e}"
            )));
        }
    };

    let store = JsonlStore::new(config.corpus_path.clone());
    let sink: Box<dyn DebugSink> = if config.debug {
        Box::new(FileSink::new(config.debug_log_path.clone()))
    } else {
        Box::new(NullSink)
    };

    // Last line of defense for §"never fail the caller": a bug anywhere in
    // the pipeline becomes a silent invocation, not a hook failure.
    panic::catch_unwind(AssertUnwindSafe(|| {
        run_invocation(&payload, config, &store, sink.as_ref())
    }))
    .unwrap_or_else(|_| {
        warn!("Pipeline stage panicked; degrading to silence");
        PipelineOutcome::Silent(SilentReason::Degraded("internal fault".into()))
    })
}
