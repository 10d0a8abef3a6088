//! Request orchestration for docsage.
//!
//! The `Assistant` composes the session store, the text generator, the
//! ingestor, and the report renderers. Each public operation backs exactly
//! one HTTP endpoint and adds no business logic beyond composition:
//!
//! - `upload`    — ingest → create session → summarize → cache summary
//! - `ask`       — answer over the first chunk + recent history
//! - `challenge` — generate up to 3 questions, overwrite stored set
//! - `evaluate`  — one model call per stored question/answer pair
//! - `export_report` — render summary + full history as PDF bytes
//! - `wordcloud` — render full content as a frequency PNG

pub mod parse;
pub mod prompts;

use std::sync::Arc;
use tracing::{debug, info};

use docsage_core::error::{Error, Result, ValidationError};
use docsage_core::session::{QaTurn, Session};
use docsage_core::store::SessionStore;
use docsage_core::TextGenerator;
use docsage_ingest::parse_document;

/// Justification attached to every answer. The model is asked for a
/// reference but its format is unconstrained, so the turn carries a fixed
/// pointer at the snippet instead of model text.
pub const JUSTIFICATION: &str = "See context above.";

/// Result of an upload: the new session token plus the cached summary.
#[derive(Debug, Clone)]
pub struct UploadOutcome {
    pub session_id: String,
    pub summary: String,
}

/// Result of an ask: the model answer plus its supporting snippet.
#[derive(Debug, Clone)]
pub struct AskOutcome {
    pub answer: String,
    pub justification: String,
    pub snippet: String,
}

/// The request orchestrator.
pub struct Assistant {
    store: Arc<dyn SessionStore>,
    generator: Arc<dyn TextGenerator>,
}

impl Assistant {
    pub fn new(store: Arc<dyn SessionStore>, generator: Arc<dyn TextGenerator>) -> Self {
        Self { store, generator }
    }

    /// The injected session store (exposed for health reporting).
    pub fn store(&self) -> &Arc<dyn SessionStore> {
        &self.store
    }

    /// Ingest an uploaded file, create a session, and summarize it.
    pub async fn upload(&self, file_name: &str, bytes: &[u8]) -> Result<UploadOutcome> {
        let parsed = parse_document(file_name, bytes)?;
        let prompt = prompts::summary_prompt(&parsed.content);

        let session = Session::new(parsed.content, parsed.chunks);
        let session_id = self.store.create(session).await?;
        info!(session_id = %session_id, file_name, "document uploaded");

        let summary = self.generator.generate(&prompt).await?;
        self.store.set_summary(&session_id, summary.clone()).await?;

        Ok(UploadOutcome { session_id, summary })
    }

    /// Answer a free-form question against the session's first chunk,
    /// appending the turn to the history.
    pub async fn ask(&self, session_id: &str, question: &str) -> Result<AskOutcome> {
        let session = self.store.snapshot(session_id).await?;

        let prompt = prompts::answer_prompt(question, session.first_chunk(), &session.history);
        let answer = self.generator.generate(&prompt).await?;
        let snippet = parse::extract_snippet(&answer, session.first_chunk());

        self.store
            .append_turn(
                session_id,
                QaTurn {
                    question: question.to_string(),
                    answer: answer.clone(),
                    snippet: snippet.clone(),
                },
            )
            .await?;

        debug!(session_id, turns = session.history.len() + 1, "question answered");
        Ok(AskOutcome {
            answer,
            justification: JUSTIFICATION.to_string(),
            snippet,
        })
    }

    /// Generate challenge questions over the first chunk, replacing any
    /// previous set.
    pub async fn challenge(&self, session_id: &str) -> Result<Vec<String>> {
        let session = self.store.snapshot(session_id).await?;

        let response = self
            .generator
            .generate(&prompts::challenge_prompt(session.first_chunk()))
            .await?;
        let questions = parse::parse_challenge_questions(&response);

        self.store
            .set_challenge_questions(session_id, questions.clone())
            .await?;

        info!(session_id, count = questions.len(), "challenge generated");
        Ok(questions)
    }

    /// Evaluate the user's answers to the current challenge. One model call
    /// per pair, feedback in answer order; nothing is stored.
    pub async fn evaluate(&self, session_id: &str, user_answers: &[String]) -> Result<Vec<String>> {
        let session = self.store.snapshot(session_id).await?;

        if session.challenge_questions.is_empty() {
            return Err(ValidationError::NoActiveChallenge.into());
        }
        if user_answers.len() != session.challenge_questions.len() {
            return Err(ValidationError::AnswerCountMismatch {
                expected: session.challenge_questions.len(),
                got: user_answers.len(),
            }
            .into());
        }

        let mut feedback = Vec::with_capacity(user_answers.len());
        for (question, answer) in session.challenge_questions.iter().zip(user_answers) {
            let text = self
                .generator
                .generate(&prompts::evaluate_prompt(
                    session.first_chunk(),
                    question,
                    answer,
                ))
                .await?;
            feedback.push(text);
        }

        Ok(feedback)
    }

    /// Render the session (summary + full history) as a PDF report.
    pub async fn export_report(&self, session_id: &str) -> Result<Vec<u8>> {
        let session = self.store.snapshot(session_id).await?;
        docsage_report::render_session_pdf(&session).map_err(|e| Error::Report(e.to_string()))
    }

    /// Render a word-frequency image over the full document content.
    pub async fn wordcloud(&self, session_id: &str) -> Result<Vec<u8>> {
        let session = self.store.snapshot(session_id).await?;
        if session.content.trim().is_empty() {
            return Err(ValidationError::EmptyDocument.into());
        }
        docsage_report::render_wordcloud_png(&session.content)
            .map_err(|e| Error::Report(e.to_string()))
    }
}
