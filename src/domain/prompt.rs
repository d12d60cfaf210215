use serde::{Deserialize, Serialize};

use crate::shared::token_counter::TokenCounter;

/// Target schema the external model is asked to map the trial balance onto
pub const TARGET_SCHEMA_COLUMNS: [&str; 8] = [
    "Source_Code",
    "Source_Name",
    "Std_Class",
    "Std_SubClass",
    "Norm_Value",
    "Sign",
    "Confidence",
    "Logic",
];

/// Line separating the instructions from the CSV payload
pub const DATA_INPUT_DELIMITER: &str = "*** DATA INPUT ***";

/// Wrap CSV text, unmodified, in the mapping instructions
pub fn build_prompt(csv: &str) -> String {
    let mut prompt = String::with_capacity(csv.len() + 256);
    prompt.push_str("*** SYSTEM INSTRUCTION ***\n");
    prompt.push_str("Role: Senior Data Architect.\n");
    prompt.push_str("Task: Map this trial balance to Standard Schema.\n");
    prompt.push_str("Columns needed: [");
    prompt.push_str(&TARGET_SCHEMA_COLUMNS.join(", "));
    prompt.push_str("]\n");
    prompt.push_str(DATA_INPUT_DELIMITER);
    prompt.push('\n');
    prompt.push_str(csv);
    prompt
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MappingPrompt {
    pub content: String,
    pub estimated_tokens: usize,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl MappingPrompt {
    pub fn new(csv: &str) -> Self {
        let content = build_prompt(csv);
        let estimated_tokens = TokenCounter::estimate_tokens(&content);
        Self {
            content,
            estimated_tokens,
            created_at: Some(chrono::Utc::now()),
        }
    }
}
