//! Session domain types.
//!
//! A session is the server-side state for one uploaded document: its full
//! text, the fixed-size chunks, the question/answer history, and the
//! questions of the most recent challenge.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One question/answer exchange in a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaTurn {
    pub question: String,
    pub answer: String,
    /// Supporting snippet shown alongside the answer.
    pub snippet: String,
}

/// Server-side state for one uploaded document, keyed by an opaque token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Opaque unique token, generated at upload time.
    pub id: String,

    /// Full extracted document text.
    pub content: String,

    /// Non-overlapping 1500-character slices of `content`, in document
    /// order. Non-empty whenever `content` is non-empty.
    pub chunks: Vec<String>,

    /// Question/answer history. Append-only, in call order.
    #[serde(default)]
    pub history: Vec<QaTurn>,

    /// Questions from the most recent challenge request. Overwritten, not
    /// appended, on each new challenge.
    #[serde(default)]
    pub challenge_questions: Vec<String>,

    /// Document summary, cached at upload.
    #[serde(default)]
    pub summary: String,

    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a fresh session around extracted document text.
    pub fn new(content: String, chunks: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            content,
            chunks,
            history: Vec::new(),
            challenge_questions: Vec::new(),
            summary: String::new(),
            created_at: Utc::now(),
        }
    }

    /// The only chunk ever consulted when answering or quizzing.
    ///
    /// Content past the first 1500 characters is intentionally out of reach
    /// for ask/challenge/evaluate; only summarize and the word cloud see the
    /// full text.
    pub fn first_chunk(&self) -> &str {
        self.chunks.first().map(String::as_str).unwrap_or("")
    }
}
