//! Task classifier — maps free-text prompts onto the closed task-type set.
//!
//! Deterministic keyword rules evaluated in a fixed priority order; the
//! first matching rule wins and anything unrecognized falls back to
//! [`TaskType::General`]. This is a total function: it never fails.

use hindsight_core::example::TaskType;

/// Rule table in priority order. Debugging outranks coding so that
/// "fix the bug in this function" lands on the more specific tag.
const RULES: &[(TaskType, &[&str])] = &[
    (
        TaskType::Debugging,
        &[
            "debug", "bug", "error", "fix", "crash", "panic", "stack trace", "traceback",
            "broken", "not working", "fails", "failing", "exception",
        ],
    ),
    (
        TaskType::Coding,
        &[
            "implement", "refactor", "function", "code", "api", "struct", "class", "compile",
            "script", "unit test", "library", "endpoint",
        ],
    ),
    (
        TaskType::Writing,
        &[
            "write", "draft", "blog", "essay", "article", "email", "documentation", "readme",
            "summarize", "rewrite", "proofread",
        ],
    ),
    (
        TaskType::Analysis,
        &[
            "analyze", "analyse", "compare", "evaluate", "investigate", "metrics", "benchmark",
            "profile", "dataset", "trend",
        ],
    ),
    (
        TaskType::Planning,
        &[
            "plan", "roadmap", "schedule", "milestone", "organize", "strategy", "prioritize",
            "breakdown",
        ],
    ),
];

/// Classify a prompt into one task-type tag.
pub fn classify(prompt: &str) -> TaskType {
    let lowered = prompt.to_lowercase();
    for (task_type, needles) in RULES {
        if needles.iter().any(|needle| lowered.contains(needle)) {
            return *task_type;
        }
    }
    TaskType::General
}
