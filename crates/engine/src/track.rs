//! Usage tracker — best-effort access bookkeeping on selected examples.

use crate::store::ExampleStore;
use chrono::{DateTime, Utc};
use hindsight_core::error::StoreError;
use tracing::debug;

/// Increment `access_count` and stamp `last_accessed_at` for each selected
/// example, then persist the updated corpus.
///
/// A fresh snapshot is loaded here rather than reusing the selection's:
/// it narrows the window in which a concurrent invocation's counters would
/// be overwritten. Lost updates remain possible and accepted — access
/// counts are a soft relevance signal, not a source of truth.
///
/// The caller treats any returned error as non-fatal; the selection and
/// formatted output already handed to the pipeline are unaffected.
pub fn record_access(
    store: &dyn ExampleStore,
    selected_ids: &[String],
    now: DateTime<Utc>,
) -> Result<(), StoreError> {
    if selected_ids.is_empty() {
        return Ok(());
    }

    let mut corpus = store.load();
    let mut touched = 0usize;
    for example in &mut corpus.examples {
        if selected_ids.iter().any(|id| *id == example.id) {
            example.access_count += 1;
            example.last_accessed_at = Some(now);
            touched += 1;
        }
    }

    if touched == 0 {
        return Ok(());
    }

    debug!(touched, "Recording example access");
    store.persist(&corpus)
}
