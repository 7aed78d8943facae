//! Relevance ranking — pure scoring functions over [0, 1].
//!
//! The composite score balances four signals: task-type agreement, lexical
//! overlap with the example's keywords, the example's historical rating,
//! and a mild dampening of heavily reused examples. Weights sum to 1.0 so
//! the composite stays within [0, 1].
//!
//! Lexical similarity sits behind the [`Similarity`] trait so a richer
//! measure (e.g. embedding cosine) can be slotted in without changing the
//! selector contract.

use hindsight_core::example::{Example, TaskType};
use std::collections::BTreeSet;

/// Weight of the task-type match component.
pub const TASK_WEIGHT: f32 = 0.30;
/// Weight of the lexical-overlap component.
pub const LEXICAL_WEIGHT: f32 = 0.45;
/// Weight of the normalized rating prior.
pub const RATING_WEIGHT: f32 = 0.20;
/// Weight of the usage-dampening component.
pub const USAGE_WEIGHT: f32 = 0.05;

/// Task-match component for examples tagged with a different task type.
/// Cross-task examples stay eligible, just disadvantaged.
const CROSS_TASK_COMPONENT: f32 = 0.4;

/// Access counts around this value halve the usage component.
const USAGE_PIVOT: f32 = 50.0;

/// Lexical similarity between two normalized term sets, in [0, 1].
pub trait Similarity: Send + Sync {
    fn score(&self, prompt_terms: &BTreeSet<String>, keywords: &BTreeSet<String>) -> f32;
}

/// Default similarity: Jaccard index over the two term sets.
pub struct KeywordOverlap;

impl Similarity for KeywordOverlap {
    fn score(&self, prompt_terms: &BTreeSet<String>, keywords: &BTreeSet<String>) -> f32 {
        jaccard(prompt_terms, keywords)
    }
}

/// Jaccard index |a ∩ b| / |a ∪ b|. Zero when either set is empty.
pub fn jaccard(a: &BTreeSet<String>, b: &BTreeSet<String>) -> f32 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f32 / union as f32
}

/// Number of terms two sets share.
pub fn overlap_count(a: &BTreeSet<String>, b: &BTreeSet<String>) -> usize {
    a.intersection(b).count()
}

/// Composite relevance of one example against the current prompt.
///
/// Callers should skip examples with empty keywords; for completeness the
/// lexical component degrades to zero for them.
pub fn score_example(
    similarity: &dyn Similarity,
    prompt_terms: &BTreeSet<String>,
    task_type: TaskType,
    example: &Example,
) -> f32 {
    let task_component = if example.task_type == task_type {
        1.0
    } else {
        CROSS_TASK_COMPONENT
    };

    let lexical_component = similarity.score(prompt_terms, &example.keywords).clamp(0.0, 1.0);

    let rating_component = f32::from(example.rating.min(10)) / 10.0;

    // Fresh examples get the full component; heavily reused ones decay
    // toward zero, keeping the same few examples from dominating forever.
    let usage_component = USAGE_PIVOT / (USAGE_PIVOT + example.access_count as f32);

    TASK_WEIGHT * task_component
        + LEXICAL_WEIGHT * lexical_component
        + RATING_WEIGHT * rating_component
        + USAGE_WEIGHT * usage_component
}

/// Stopwords excluded from normalized term sets.
const STOPWORDS: &[&str] = &[
    "the", "and", "for", "that", "this", "with", "from", "are", "was", "were", "what", "when",
    "where", "which", "who", "how", "why", "can", "could", "should", "would", "will", "does",
    "did", "has", "have", "had", "not", "but", "all", "any", "out", "into", "over", "under",
    "about", "after", "before", "then", "than", "them", "they", "there", "here", "its", "it's",
    "you", "your", "our", "his", "her", "she", "him", "use", "using", "used", "get", "make",
    "please", "help", "want", "need", "just", "like", "some", "more", "most", "very",
];

/// Normalize free text into the term set used for lexical relevance:
/// lowercase alphanumeric tokens of length ≥ 3, stopwords removed.
pub fn normalize_terms(text: &str) -> BTreeSet<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|token| token.len() >= 3)
        .filter(|token| !STOPWORDS.contains(token))
        .map(|token| token.to_string())
        .collect()
}
