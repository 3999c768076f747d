// Model output parsing.
//
// The extraction prompt asks for JSON, but the model wraps it in prose or
// markdown fences often enough that we take the span from the first `{` to
// the last `}` and parse that. A reply with no braces at all is kept as raw
// text; a reply with braces that don't parse is an error.

use std::sync::OnceLock;

use anyhow::{Context, Result};
use regex_lite::Regex;

use super::models::ExtractedClaim;

fn json_object_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // (?s) so `.` spans newlines; greedy so nested objects stay intact
    PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("static regex is valid"))
}

/// Parse the model's reply into an `ExtractedClaim`.
pub fn parse_model_output(text: &str) -> Result<ExtractedClaim> {
    match json_object_pattern().find(text) {
        Some(m) => serde_json::from_str(m.as_str())
            .context("Model returned a malformed JSON object"),
        None => Ok(ExtractedClaim::raw(text)),
    }
}
