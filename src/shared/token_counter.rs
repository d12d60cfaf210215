//! Provider-agnostic token estimate for prompts handed to an external model
//!
//! Approximation: ~4 characters per token (works for most LLMs)

pub struct TokenCounter;

impl TokenCounter {
    /// Estimate token count for text, rounding up
    pub fn estimate_tokens(text: &str) -> usize {
        if text.is_empty() {
            return 0;
        }
        (text.chars().count() + 3) / 4
    }
}
