//! Normalization of constrained-grammar oracle replies.
//!
//! The oracle answers these queries with the literal token `none`, a JSON
//! value, or (being a language model) something else entirely. [`parse`]
//! folds all three into a [`Reply`] so callers handle the degrade branch
//! explicitly instead of swallowing parse errors.

use serde::de::DeserializeOwned;

/// Outcome of parsing a constrained-grammar reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply<T> {
    /// The oracle explicitly reported no finding.
    Absent,
    /// The reply matched the expected JSON shape.
    Structured(T),
    /// The cleaned reply text did not parse; callers decide what survives.
    RawFallback(String),
}

/// Parse a raw oracle reply into a [`Reply`].
///
/// Whitespace is trimmed, a case-insensitive `none` maps to
/// [`Reply::Absent`], and one surrounding markdown code fence (with or
/// without a language tag) is stripped before the JSON parse. Never fails:
/// unparseable text comes back as [`Reply::RawFallback`].
pub fn parse<T: DeserializeOwned>(raw: &str) -> Reply<T> {
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("none") {
        return Reply::Absent;
    }
    let cleaned = strip_code_fence(trimmed);
    match serde_json::from_str(cleaned) {
        Ok(value) => Reply::Structured(value),
        Err(e) => {
            tracing::debug!(?e, reply = %cleaned, "reply did not match expected shape");
            Reply::RawFallback(cleaned.to_string())
        }
    }
}

/// Strip one leading/trailing triple-backtick fence.
fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // The fence line may carry a language tag such as ```json.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
