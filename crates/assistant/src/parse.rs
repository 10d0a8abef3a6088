//! Parsing of raw model output into structured results.

use regex::Regex;
use std::sync::LazyLock;

use docsage_core::text::truncate_chars;

/// A double-quoted run of at least 20 characters counts as a citable snippet.
static SNIPPET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#""([^"]{20,})""#).expect("snippet regex"));

/// Fallback snippet length, in characters of the consulted chunk.
pub const FALLBACK_SNIPPET_CHARS: usize = 200;

/// Challenge size cap.
pub const MAX_CHALLENGE_QUESTIONS: usize = 3;

/// Pick the supporting snippet for a model answer: the first double-quoted
/// run of at least 20 characters, verbatim; otherwise the first 200
/// characters of the chunk the answer was drawn from.
pub fn extract_snippet(answer: &str, chunk: &str) -> String {
    match SNIPPET_RE.captures(answer) {
        Some(caps) => caps[1].to_string(),
        None => truncate_chars(chunk, FALLBACK_SNIPPET_CHARS).to_string(),
    }
}

/// Split a model response into challenge questions: one per line, leading
/// list markers and whitespace stripped, blank lines dropped, capped at
/// [`MAX_CHALLENGE_QUESTIONS`]. May return fewer when the model produced
/// fewer usable lines; callers must accept short lists.
pub fn parse_challenge_questions(response: &str) -> Vec<String> {
    response
        .lines()
        .map(|line| line.trim().trim_start_matches(['-', ' ']).trim().to_string())
        .filter(|line| !line.is_empty())
        .take(MAX_CHALLENGE_QUESTIONS)
        .collect()
}
