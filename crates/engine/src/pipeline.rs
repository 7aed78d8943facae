//! The one-shot invocation pipeline.
//!
//! payload → classify → rank (reads store) → select → {format → output,
//! track → store update, debug record → sink}. Each stage depends on the
//! previous stage's output; there is no reordering and no persistent
//! state across invocations.
//!
//! Nothing here returns an error to the caller. The engine's external
//! contract is "always completes; output is either a valid injectable
//! block or nothing".

use crate::debug::{DebugRecord, DebugSink};
use crate::format::render;
use crate::rank::KeywordOverlap;
use crate::select::select;
use crate::store::ExampleStore;
use crate::track::record_access;
use chrono::Utc;
use hindsight_config::EngineConfig;
use hindsight_core::example::SelectionResult;
use hindsight_core::payload::InvocationPayload;
use tracing::{debug, info, warn};

/// Why an invocation produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SilentReason {
    /// The engine is disabled by configuration.
    Disabled,
    /// Selection completed but nothing relevant was found — the normal
    /// "no examples" outcome, distinct from a fault.
    NoCandidates,
    /// An internal fault was contained; the invocation degraded to
    /// silence instead of failing the caller.
    Degraded(String),
}

/// The explicit result of one invocation.
#[derive(Debug, Clone)]
pub enum PipelineOutcome {
    /// At least one example was selected and rendered.
    Injected {
        block: String,
        selection: SelectionResult,
    },
    /// No output; the reason says whether that is normal or degraded.
    Silent(SilentReason),
}

impl PipelineOutcome {
    /// The text to hand to the surrounding pipeline, if any.
    pub fn output(&self) -> Option<&str> {
        match self {
            PipelineOutcome::Injected { block, .. } => Some(block),
            PipelineOutcome::Silent(_) => None,
        }
    }
}

/// Run one invocation end to end.
///
/// The sink is injected by the caller: a file sink when debug mode is on,
/// [`crate::debug::NullSink`] otherwise. Usage-count persistence and debug
/// records are best-effort; their failures are logged and discarded.
pub fn run_invocation(
    payload: &InvocationPayload,
    config: &EngineConfig,
    store: &dyn ExampleStore,
    sink: &dyn DebugSink,
) -> PipelineOutcome {
    if !config.enabled {
        debug!("Engine disabled, skipping invocation");
        return PipelineOutcome::Silent(SilentReason::Disabled);
    }

    let corpus = store.load();
    debug!(store = store.name(), corpus = corpus.len(), "Corpus snapshot loaded");

    let selection = select(&corpus, &payload.prompt, config, &KeywordOverlap);
    sink.record(&DebugRecord::new(payload, &selection));

    let block = render(&selection);
    if block.is_empty() {
        debug!(task_type = %selection.task_type, "No relevant examples");
        return PipelineOutcome::Silent(SilentReason::NoCandidates);
    }

    let selected_ids: Vec<String> = selection.examples.iter().map(|e| e.id.clone()).collect();
    if let Err(e) = record_access(store, &selected_ids, Utc::now()) {
        warn!(error = %e, "Could not persist access counters");
    }

    info!(
        examples = selection.examples.len(),
        confidence = selection.confidence,
        task_type = %selection.task_type,
        "Injecting past examples"
    );
    PipelineOutcome::Injected { block, selection }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debug::NullSink;
    use crate::store::InMemoryStore;
    use chrono::Utc;
    use hindsight_core::example::{Example, TaskType};

    fn example(id: &str, keywords: &[&str]) -> Example {
        Example {
            id: id.into(),
            prompt: "past prompt".into(),
            summary: format!("summary {id}"),
            task_type: TaskType::Coding,
            rating: 9,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            created_at: Utc::now(),
            access_count: 0,
            last_accessed_at: None,
        }
    }

    fn payload(prompt: &str) -> InvocationPayload {
        InvocationPayload::new(prompt, "session-1")
    }

    #[test]
    fn disabled_engine_is_silent_and_touches_nothing() {
        let store = InMemoryStore::new(vec![example("a", &["json", "parser"])]);
        let config = EngineConfig {
            enabled: false,
            ..EngineConfig::default()
        };

        let outcome = run_invocation(&payload("implement a json parser"), &config, &store, &NullSink);

        assert!(matches!(
            outcome,
            PipelineOutcome::Silent(SilentReason::Disabled)
        ));
        assert_eq!(store.load().get("a").unwrap().access_count, 0);
    }

    #[test]
    fn relevant_corpus_produces_injected_block_and_bookkeeping() {
        let store = InMemoryStore::new(vec![example("a", &["json", "parser"])]);
        let config = EngineConfig::default();

        let outcome = run_invocation(&payload("implement a json parser"), &config, &store, &NullSink);

        let block = outcome.output().expect("expected injected block");
        assert!(block.contains("[Past Examples]"));
        assert!(block.contains("summary a"));

        let after = store.load();
        assert_eq!(after.get("a").unwrap().access_count, 1);
        assert!(after.get("a").unwrap().last_accessed_at.is_some());
    }

    #[test]
    fn empty_corpus_is_silent_no_candidates() {
        let store = InMemoryStore::default();
        let outcome = run_invocation(
            &payload("implement a json parser"),
            &EngineConfig::default(),
            &store,
            &NullSink,
        );

        assert!(outcome.output().is_none());
        assert!(matches!(
            outcome,
            PipelineOutcome::Silent(SilentReason::NoCandidates)
        ));
    }

    #[test]
    fn unrelated_prompt_is_silent_without_bookkeeping() {
        let store = InMemoryStore::new(vec![example("a", &["json", "parser"])]);
        let outcome = run_invocation(
            &payload("completely unrelated gardening question"),
            &EngineConfig::default(),
            &store,
            &NullSink,
        );

        assert!(outcome.output().is_none());
        assert_eq!(store.load().get("a").unwrap().access_count, 0);
    }

    #[test]
    fn selection_is_capped_by_config() {
        let store = InMemoryStore::new(vec![
            example("a", &["json", "parser", "alpha"]),
            example("b", &["json", "parser", "beta"]),
            example("c", &["json", "parser", "gamma"]),
            example("d", &["json", "parser", "delta"]),
        ]);
        let config = EngineConfig {
            max_examples: 2,
            ..EngineConfig::default()
        };

        let outcome = run_invocation(&payload("implement a json parser"), &config, &store, &NullSink);

        match outcome {
            PipelineOutcome::Injected { selection, .. } => {
                assert_eq!(selection.examples.len(), 2);
                for ex in &selection.examples {
                    assert!(ex.rating >= config.min_rating);
                }
            }
            other => panic!("expected injection, got {other:?}"),
        }
    }
}
