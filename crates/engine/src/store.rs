//! Episodic store — persistent JSONL storage for the example corpus.
//!
//! Each line of the corpus file is one JSON-encoded [`Example`]. The format
//! is backward read-compatible: unknown fields are ignored and malformed or
//! invalid records are skipped rather than failing the load.
//!
//! Storage location: `~/.hindsight/examples.jsonl` (configurable).
//!
//! The store hands out immutable [`Corpus`] snapshots. Concurrent
//! invocations in separate processes may race on `persist`; a lost
//! access-count update is an accepted degradation, not an error.

use hindsight_core::error::StoreError;
use hindsight_core::example::{Corpus, Example};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::RwLock;
use tracing::{debug, warn};

/// Persistence boundary for the example corpus.
///
/// `load` is infallible by contract: a missing or unreadable source reads
/// as an empty corpus. `persist` can fail, and every caller treats that
/// failure as non-fatal.
pub trait ExampleStore: Send + Sync {
    /// The store name (e.g., "jsonl", "in_memory").
    fn name(&self) -> &str;

    /// Read a fresh snapshot of the corpus.
    fn load(&self) -> Corpus;

    /// Write the corpus back.
    fn persist(&self, corpus: &Corpus) -> Result<(), StoreError>;
}

/// A file-backed store using JSONL (one JSON object per line).
pub struct JsonlStore {
    path: PathBuf,
}

impl JsonlStore {
    /// Create a store over the given corpus file. The file is not touched
    /// until `load` or `persist` is called.
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ExampleStore for JsonlStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    fn load(&self) -> Corpus {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(_) => {
                debug!(path = %self.path.display(), "No corpus file, starting empty");
                return Corpus::default();
            }
        };

        let mut seen_ids: HashSet<String> = HashSet::new();
        let examples: Vec<Example> = content
            .lines()
            .filter(|line| !line.trim().is_empty())
            .filter_map(|line| match serde_json::from_str::<Example>(line) {
                Ok(example) if example.is_valid() => Some(example),
                Ok(example) => {
                    warn!(id = %example.id, rating = example.rating, "Skipping invalid example record");
                    None
                }
                Err(e) => {
                    warn!(error = %e, "Skipping malformed corpus line");
                    None
                }
            })
            .filter(|example| {
                // First record wins on duplicate ids.
                if seen_ids.insert(example.id.clone()) {
                    true
                } else {
                    warn!(id = %example.id, "Skipping duplicate example id");
                    false
                }
            })
            .collect();

        debug!(path = %self.path.display(), count = examples.len(), "Corpus loaded");
        Corpus::new(examples)
    }

    fn persist(&self, corpus: &Corpus) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: self.path.clone(),
                reason: format!("failed to create corpus directory: {e}"),
            })?;
        }

        let mut content = String::new();
        for example in &corpus.examples {
            let line = serde_json::to_string(example).map_err(|e| StoreError::Serialize {
                id: example.id.clone(),
                reason: e.to_string(),
            })?;
            content.push_str(&line);
            content.push('\n');
        }

        std::fs::write(&self.path, &content).map_err(|e| StoreError::Io {
            path: self.path.clone(),
            reason: e.to_string(),
        })
    }
}

/// An in-memory store holding examples in a Vec.
/// Useful for tests and ephemeral runs where persistence isn't needed.
#[derive(Default)]
pub struct InMemoryStore {
    examples: RwLock<Vec<Example>>,
}

impl InMemoryStore {
    pub fn new(examples: Vec<Example>) -> Self {
        Self {
            examples: RwLock::new(examples),
        }
    }
}

impl ExampleStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    fn load(&self) -> Corpus {
        Corpus::new(self.examples.read().map(|e| e.clone()).unwrap_or_default())
    }

    fn persist(&self, corpus: &Corpus) -> Result<(), StoreError> {
        if let Ok(mut examples) = self.examples.write() {
            *examples = corpus.examples.clone();
        }
        Ok(())
    }
}
