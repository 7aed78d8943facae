//! Selector — filters, deduplicates, ranks, and truncates candidates into
//! a bounded [`SelectionResult`] with a confidence score.

use crate::classify::classify;
use crate::rank::{jaccard, normalize_terms, overlap_count, score_example, Similarity};
use hindsight_core::example::{Corpus, Example, SelectionResult};
use hindsight_config::EngineConfig;
use std::cmp::Ordering;
use tracing::debug;

/// Keyword Jaccard at or above this marks two same-task examples as
/// near-duplicates; only the highest-ranked representative survives.
const NEAR_DUPLICATE_OVERLAP: f32 = 0.9;

struct Scored {
    example: Example,
    score: f32,
}

/// Total, deterministic candidate order: score desc, rating desc,
/// access count asc (prefer underused), id asc.
fn rank_order(a: &Scored, b: &Scored) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then_with(|| b.example.rating.cmp(&a.example.rating))
        .then_with(|| a.example.access_count.cmp(&b.example.access_count))
        .then_with(|| a.example.id.cmp(&b.example.id))
}

/// Select at most `config.max_examples` relevant examples for a prompt.
///
/// Empty corpus, nothing above `min_rating`, or no lexical overlap with
/// any example all yield an empty result with zero confidence — never an
/// error.
pub fn select(
    corpus: &Corpus,
    prompt: &str,
    config: &EngineConfig,
    similarity: &dyn Similarity,
) -> SelectionResult {
    let task_type = classify(prompt);
    let prompt_terms = normalize_terms(prompt);

    let mut candidates: Vec<Scored> = corpus
        .examples
        .iter()
        .filter(|e| e.rating >= config.min_rating)
        .filter(|e| e.is_rankable())
        .filter_map(|e| {
            // Lexical overlap is the relevance gate: an example sharing no
            // terms with the prompt is never injected, whatever its tag.
            if overlap_count(&prompt_terms, &e.keywords) == 0 {
                return None;
            }
            let score = score_example(similarity, &prompt_terms, task_type, e);
            (score >= config.relevance_floor).then(|| Scored {
                example: e.clone(),
                score,
            })
        })
        .collect();

    candidates.sort_by(rank_order);

    // Near-duplicate suppression: candidates arrive best-first, so the
    // first representative of a duplicate cluster is the one to keep.
    let mut kept: Vec<Scored> = Vec::new();
    for candidate in candidates {
        let is_duplicate = kept.iter().any(|k| {
            k.example.task_type == candidate.example.task_type
                && jaccard(&k.example.keywords, &candidate.example.keywords)
                    >= NEAR_DUPLICATE_OVERLAP
        });
        if !is_duplicate {
            kept.push(candidate);
        }
    }

    kept.truncate(config.max_examples);

    let confidence = kept.first().map(|c| c.score).unwrap_or(0.0);
    debug!(
        task_type = %task_type,
        candidates = kept.len(),
        confidence,
        "Selection complete"
    );

    SelectionResult {
        task_type,
        confidence,
        examples: kept.into_iter().map(|c| c.example).collect(),
    }
}
