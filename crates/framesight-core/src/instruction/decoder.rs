//! Extraction of structured payloads from free-form model replies.
//!
//! Vision models frequently wrap JSON answers in fenced code blocks.
//! The decoder strips that wrapping and falls back to the raw text when
//! no JSON can be recovered — it never fails.

use serde_json::Value;

/// Decode a model reply into JSON if possible, the original text otherwise.
///
/// Idempotent: feeding already-decoded output back in returns it unchanged.
pub fn decode(output: &str) -> Value {
    to_json(output).unwrap_or_else(|| Value::String(output.to_string()))
}

fn to_json(output: &str) -> Option<Value> {
    let prepared = output.replace("```json\n", "").replace("```", "");
    serde_json::from_str(prepared.trim()).ok()
}
