use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use thiserror::Error;

const NOT_FOUND_PREVIEW_CHARS: usize = 200;
const PARSE_PREVIEW_CHARS: usize = 300;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```json\s*(\{.*?\})\s*```").expect("valid fenced regex"));

// Balanced braces with at most one level of nesting.
static BRACED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\{(?:[^{}]|(?:\{[^{}]*\}))*\}").expect("valid brace regex")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("No JSON object found in agent output. Preview (first 200 chars): {preview}")]
    NotFound { preview: String },
    #[error("JSON parse error: {message}. Extracted JSON preview (first 300 chars): {preview}")]
    Parse { message: String, preview: String },
}

/// Pull the first JSON object out of free-form agent text.
///
/// A ```` ```json ```` fenced block wins when it parses. Otherwise the first
/// brace-balanced substring is parsed. The function is pure: the same input
/// always yields the same object or the same error.
pub fn extract_json_object(text: &str) -> Result<Value, ExtractError> {
    if let Some(fenced) = FENCED_JSON.captures(text).and_then(|caps| caps.get(1)) {
        if let Ok(value) = serde_json::from_str::<Value>(fenced.as_str()) {
            return Ok(value);
        }
    }

    let candidate = BRACED_OBJECT
        .find(text)
        .ok_or_else(|| ExtractError::NotFound {
            preview: prefix_chars(text, NOT_FOUND_PREVIEW_CHARS),
        })?
        .as_str();

    serde_json::from_str(candidate).map_err(|err| ExtractError::Parse {
        message: err.to_string(),
        preview: prefix_chars(candidate, PARSE_PREVIEW_CHARS),
    })
}

fn prefix_chars(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
