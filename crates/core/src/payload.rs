//! The invocation payload delivered by the surrounding prompt pipeline.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One hook invocation's input: a prompt plus session identity.
///
/// Transport metadata beyond the two required fields is opaque to the
/// engine and carried through unused.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvocationPayload {
    /// The prompt text to find past examples for.
    pub prompt: String,

    /// Identifier of the session this prompt belongs to.
    pub session_id: String,

    /// Opaque transport metadata (passed through, never interpreted).
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

impl InvocationPayload {
    pub fn new(prompt: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            session_id: session_id.into(),
            extra: HashMap::new(),
        }
    }
}
