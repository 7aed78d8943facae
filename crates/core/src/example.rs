//! Example records — the persisted unit of episodic memory.
//!
//! An [`Example`] is one past successful interaction, captured by an
//! upstream learning process. The engine only ever reads, scores, and
//! access-counts these records; it never creates or deletes them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// The closed set of task-type tags a prompt can classify into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskType {
    Coding,
    Debugging,
    Writing,
    Analysis,
    Planning,
    #[default]
    General,
}

impl TaskType {
    /// All tags, in classifier priority order (general last).
    pub const ALL: [TaskType; 6] = [
        TaskType::Debugging,
        TaskType::Coding,
        TaskType::Writing,
        TaskType::Analysis,
        TaskType::Planning,
        TaskType::General,
    ];

    /// The wire/display name of this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskType::Coding => "coding",
            TaskType::Debugging => "debugging",
            TaskType::Writing => "writing",
            TaskType::Analysis => "analysis",
            TaskType::Planning => "planning",
            TaskType::General => "general",
        }
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single persisted few-shot example.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Example {
    /// Unique stable identifier.
    pub id: String,

    /// The original prompt that produced this example.
    pub prompt: String,

    /// Condensed representation of the successful interaction.
    pub summary: String,

    /// Task-type tag assigned at capture time.
    pub task_type: TaskType,

    /// Quality score in [1, 10] assigned when the example was captured.
    pub rating: u8,

    /// Normalized terms extracted from prompt/summary, used for lexical
    /// relevance. Empty keywords make the example ranking-ineligible.
    #[serde(default)]
    pub keywords: BTreeSet<String>,

    /// When this example was captured.
    pub created_at: DateTime<Utc>,

    /// How many times this example has been selected for injection.
    #[serde(default)]
    pub access_count: u64,

    /// When this example was last selected. Absent until first selection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl Example {
    /// Whether the record satisfies the persisted-corpus invariants.
    /// Records failing this are skipped at load time.
    pub fn is_valid(&self) -> bool {
        !self.id.is_empty() && (1..=10).contains(&self.rating)
    }

    /// Whether this example can participate in ranking.
    pub fn is_rankable(&self) -> bool {
        !self.keywords.is_empty()
    }
}

/// An immutable snapshot of the persisted example collection.
///
/// Loaded fresh at the start of each invocation; written back only when
/// access counters changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Corpus {
    pub examples: Vec<Example>,
}

impl Corpus {
    pub fn new(examples: Vec<Example>) -> Self {
        Self { examples }
    }

    pub fn len(&self) -> usize {
        self.examples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Look up an example by id.
    pub fn get(&self, id: &str) -> Option<&Example> {
        self.examples.iter().find(|e| e.id == id)
    }

    /// Number of examples carrying the given task-type tag.
    pub fn count_for(&self, task_type: TaskType) -> usize {
        self.examples
            .iter()
            .filter(|e| e.task_type == task_type)
            .count()
    }
}

/// The outcome of one selection pass — ephemeral, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Task type inferred from the prompt.
    pub task_type: TaskType,

    /// How well the best match fits, in [0, 1]. Zero when `examples` is empty.
    pub confidence: f32,

    /// Selected examples in rank order, highest relevance first.
    pub examples: Vec<Example>,
}

impl SelectionResult {
    /// An empty result for the given task type (no candidates survived).
    pub fn empty(task_type: TaskType) -> Self {
        Self {
            task_type,
            confidence: 0.0,
            examples: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }
}
