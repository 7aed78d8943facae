//! Debug sink — an optional, swappable side channel for diagnostics.
//!
//! When debug mode is on, the pipeline appends one structured record per
//! invocation to a local JSONL log. The sink must never affect control
//! flow: write failures are swallowed, and with [`NullSink`] installed
//! every stage behaves identically.

use chrono::{DateTime, Utc};
use hindsight_core::example::{SelectionResult, TaskType};
use hindsight_core::payload::InvocationPayload;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;
use tracing::debug;
use uuid::Uuid;

/// Longest prompt prefix carried in a debug record.
const PROMPT_PREVIEW_CHARS: usize = 80;

/// One structured diagnostic record per invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DebugRecord {
    /// When the invocation ran.
    pub timestamp: DateTime<Utc>,

    /// Random id distinguishing overlapping invocations in the log.
    pub invocation_id: Uuid,

    /// Session the prompt belongs to.
    pub session_id: String,

    /// Task type the classifier inferred.
    pub task_type: TaskType,

    /// Confidence of the selection (0 when nothing matched).
    pub confidence: f32,

    /// How many examples were selected.
    pub example_count: usize,

    /// Truncated prompt prefix.
    pub prompt_preview: String,
}

impl DebugRecord {
    pub fn new(payload: &InvocationPayload, selection: &SelectionResult) -> Self {
        Self {
            timestamp: Utc::now(),
            invocation_id: Uuid::new_v4(),
            session_id: payload.session_id.clone(),
            task_type: selection.task_type,
            confidence: selection.confidence,
            example_count: selection.examples.len(),
            prompt_preview: truncate_chars(&payload.prompt, PROMPT_PREVIEW_CHARS),
        }
    }
}

/// Truncate on a character boundary; byte slicing could split a code point.
fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Destination for debug records. Implementations must be infallible from
/// the caller's perspective.
pub trait DebugSink: Send + Sync {
    fn record(&self, record: &DebugRecord);
}

/// Appends records as JSON lines to a local log file.
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl DebugSink for FileSink {
    fn record(&self, record: &DebugRecord) {
        // Failure to write the debug log never affects the main output.
        let line = match serde_json::to_string(record) {
            Ok(line) => line,
            Err(e) => {
                debug!(error = %e, "Could not serialize debug record");
                return;
            }
        };

        if let Some(parent) = self.path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| writeln!(file, "{line}"));

        if let Err(e) = result {
            debug!(error = %e, path = %self.path.display(), "Could not append debug record");
        }
    }
}

/// Discards every record. Installed whenever debug mode is off.
pub struct NullSink;

impl DebugSink for NullSink {
    fn record(&self, _record: &DebugRecord) {}
}
