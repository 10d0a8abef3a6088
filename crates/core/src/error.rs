//! Error types for the docsage domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error enum; the top-level `Error`
//! collects them so the HTTP boundary can map each class to a status code.

use thiserror::Error;

/// The top-level error type for all docsage operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Unknown session identifier. Maps to 404 at the HTTP boundary.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// Bad user input. Maps to 400.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Remote model call failure. Maps to 502.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Unreadable upload. Maps to 422.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Report or image rendering failure. Maps to 500.
    #[error("report error: {0}")]
    Report(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// User-input errors that must never trigger a remote call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("document content is empty, cannot generate word cloud")]
    EmptyDocument,

    #[error("no challenge questions found for this session; start a challenge first")]
    NoActiveChallenge,

    #[error("expected {expected} answers, got {got}")]
    AnswerCountMismatch { expected: usize, got: usize },

    #[error("multipart upload is missing a 'file' field")]
    MissingFile,
}

/// Failures of the remote generative-model call.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("API request failed: {message} (status: {status_code})")]
    Api { status_code: u16, message: String },

    #[error("rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("malformed model response: {0}")]
    Malformed(String),
}

/// Failures turning an uploaded file into text.
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("file is not valid UTF-8 text: {0}")]
    Encoding(String),
}
