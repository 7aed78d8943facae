//! Error types for the Hindsight domain.
//!
//! Uses `thiserror` for ergonomic error definitions. Each bounded context
//! has its own error enum. Note the engine's external contract: none of
//! these ever escape an invocation — the pipeline degrades to silence
//! instead of failing the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Errors from corpus persistence.
///
/// Only `persist` can produce these; `load` is infallible by contract
/// (a missing or corrupt corpus reads as empty).
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to write corpus at {path}: {reason}")]
    Io { path: PathBuf, reason: String },

    #[error("Failed to serialize example {id}: {reason}")]
    Serialize { id: String, reason: String },
}

/// Errors from configuration resolution.
///
/// Surfaced to operators via the `status` command; the pipeline itself
/// resolves any of these to built-in defaults before running.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    Read { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    Parse { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_displays_path() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/examples.jsonl"),
            reason: "permission denied".into(),
        };
        assert!(err.to_string().contains("/tmp/examples.jsonl"));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn config_error_displays_reason() {
        let err = ConfigError::Validation("min_rating must be between 1 and 10".into());
        assert!(err.to_string().contains("min_rating"));
    }
}
