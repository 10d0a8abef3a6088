//! Prompt templates for each gateway operation.
//!
//! Plain functions over `&str` so they unit-test without a model. The
//! answer prompt embeds only the first document chunk plus the most recent
//! history turns; the summary prompt caps its input at 4000 characters.

use docsage_core::session::QaTurn;
use docsage_core::text::truncate_chars;

/// Cap on document characters embedded in a summary prompt.
pub const SUMMARY_INPUT_CHARS: usize = 4000;

/// Number of trailing history turns embedded in an answer prompt.
pub const HISTORY_TURNS: usize = 3;

pub fn summary_prompt(content: &str) -> String {
    format!(
        "Summarize the following document in less than 150 words:\n\n{}",
        truncate_chars(content, SUMMARY_INPUT_CHARS)
    )
}

pub fn answer_prompt(question: &str, context: &str, history: &[QaTurn]) -> String {
    let mut history_prompt = String::new();
    let start = history.len().saturating_sub(HISTORY_TURNS);
    for turn in &history[start..] {
        history_prompt.push_str(&format!("Q: {}\nA: {}\n", turn.question, turn.answer));
    }

    format!(
        "{history_prompt}\nBased on the following document, answer the question and justify \
         with a reference (e.g., 'See paragraph 2'). Also, provide the exact supporting \
         snippet from the document.\n\nDocument:\n{context}\n\nQuestion: {question}"
    )
}

pub fn challenge_prompt(context: &str) -> String {
    format!(
        "Generate three logic-based or comprehension-focused questions based on this \
         document:\n\n{context}"
    )
}

pub fn evaluate_prompt(context: &str, question: &str, user_answer: &str) -> String {
    format!(
        "Document: {context}\nQuestion: {question}\nUser's answer: {user_answer}\n\
         Evaluate the answer, provide feedback, and justify with a reference and a \
         supporting snippet."
    )
}
