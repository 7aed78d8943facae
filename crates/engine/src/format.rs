//! Formatter — renders a [`SelectionResult`] into the injectable block.
//!
//! Rendering is a pure function of the selection: identical inputs produce
//! byte-identical output. Summaries only — never the full original
//! interaction — to keep the injected block bounded.

use hindsight_core::example::SelectionResult;

const HEADER: &str = "[Past Examples]\nPrevious successful interactions that may help with this task:\n";

/// Render the selected examples as a deterministic text block.
///
/// Examples without a renderable summary are omitted. Returns the empty
/// string when nothing remains — callers treat that as "nothing to
/// inject", not as an error.
pub fn render(selection: &SelectionResult) -> String {
    let mut entries = String::new();
    let mut index = 0;
    for example in &selection.examples {
        let summary = example.summary.trim();
        if summary.is_empty() {
            continue;
        }
        index += 1;
        entries.push_str(&format!(
            "\n{index}. ({}, rated {}/10) {summary}\n",
            example.task_type, example.rating
        ));
    }

    if index == 0 {
        return String::new();
    }
    format!("{HEADER}{entries}")
}
