//! Analysis prompt template.

use std::path::Path;

use tracing::debug;

/// Built-in instruction used when no template file is present.
pub const FALLBACK_PROMPT: &str = "Summarize the text in 1-2 sentences, propose a short title, \
    list 3 topics (single words), and overall sentiment (positive/neutral/negative). \
    Return strict JSON with keys: summary, title, topics, sentiment.\n\nText:";

/// Load the prompt template from `path`, falling back to the built-in
/// instruction when the file is missing or unreadable. Called once at
/// backend construction.
pub fn load_prompt(path: &Path) -> String {
    match std::fs::read_to_string(path) {
        Ok(template) => {
            debug!("Loaded prompt template from {}", path.display());
            template.trim().to_string()
        }
        Err(_) => {
            debug!(
                "Prompt template {} not found, using built-in fallback",
                path.display()
            );
            FALLBACK_PROMPT.to_string()
        }
    }
}
