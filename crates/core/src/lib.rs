//! # Hindsight Core
//!
//! Domain types and error definitions for the Hindsight episodic-memory
//! retrieval engine. This crate has **zero framework dependencies** — it
//! defines the domain model that the other crates implement against.
//!
//! ## Design Philosophy
//!
//! The engine is a one-shot transform: a prompt payload comes in, an
//! injectable block of past examples (or nothing) goes out. Everything here
//! is plain data; the behavior lives in `hindsight-engine`.

pub mod error;
pub mod example;
pub mod payload;

// Re-export key types at crate root for ergonomics
pub use error::{ConfigError, StoreError};
pub use example::{Corpus, Example, SelectionResult, TaskType};
pub use payload::InvocationPayload;
