//! HTTP endpoints.
//!
//! - `POST /upload`     — multipart file → `{session_id, summary}`
//! - `POST /ask`        — `{session_id, question}` → `{answer, justification, snippet}`
//! - `POST /challenge`  — `{session_id}` → `{questions}`
//! - `POST /evaluate`   — `{session_id, user_answers}` → `{feedback}`
//! - `POST /export_pdf` — `{session_id}` → PDF bytes
//! - `POST /wordcloud`  — `{session_id}` → PNG bytes
//! - `GET  /`           — health payload

use axum::{
    Json, Router,
    extract::{Multipart, State},
    http::header,
    response::IntoResponse,
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tracing::info;

use docsage_core::error::{Error, ValidationError};

use crate::error::ApiError;
use crate::state::SharedState;

pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", get(health_handler))
        .route("/upload", post(upload_handler))
        .route("/ask", post(ask_handler))
        .route("/challenge", post(challenge_handler))
        .route("/evaluate", post(evaluate_handler))
        .route("/export_pdf", post(export_pdf_handler))
        .route("/wordcloud", post(wordcloud_handler))
}

// ── Request / Response types ──────────────────────────────────────────────

#[derive(Serialize)]
struct HealthResponse {
    message: String,
    sessions: usize,
    uptime_secs: i64,
}

#[derive(Serialize)]
struct UploadResponse {
    session_id: String,
    summary: String,
}

#[derive(Deserialize)]
struct AskRequest {
    session_id: String,
    question: String,
}

#[derive(Serialize)]
struct AskResponse {
    answer: String,
    justification: String,
    snippet: String,
}

#[derive(Deserialize)]
struct SessionRequest {
    session_id: String,
}

#[derive(Serialize)]
struct ChallengeResponse {
    questions: Vec<String>,
}

#[derive(Deserialize)]
struct EvaluateRequest {
    session_id: String,
    user_answers: Vec<String>,
}

#[derive(Serialize)]
struct EvaluateResponse {
    feedback: Vec<String>,
}

// ── Handlers ──────────────────────────────────────────────────────────────

async fn health_handler(State(state): State<SharedState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "docsage backend is running".into(),
        sessions: state.assistant.store().count().await,
        uptime_secs: (chrono::Utc::now() - state.started_at).num_seconds(),
    })
}

async fn upload_handler(
    State(state): State<SharedState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    let mut file: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("file") {
            let name = field.file_name().unwrap_or("upload.txt").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("failed to read upload: {e}")))?;
            file = Some((name, data.to_vec()));
        }
    }

    let (name, data) =
        file.ok_or_else(|| ApiError::from(Error::Validation(ValidationError::MissingFile)))?;
    info!(file_name = %name, bytes = data.len(), "upload received");

    let outcome = state.assistant.upload(&name, &data).await?;
    Ok(Json(UploadResponse {
        session_id: outcome.session_id,
        summary: outcome.summary,
    }))
}

async fn ask_handler(
    State(state): State<SharedState>,
    Json(req): Json<AskRequest>,
) -> Result<Json<AskResponse>, ApiError> {
    let outcome = state.assistant.ask(&req.session_id, &req.question).await?;
    Ok(Json(AskResponse {
        answer: outcome.answer,
        justification: outcome.justification,
        snippet: outcome.snippet,
    }))
}

async fn challenge_handler(
    State(state): State<SharedState>,
    Json(req): Json<SessionRequest>,
) -> Result<Json<ChallengeResponse>, ApiError> {
    let questions = state.assistant.challenge(&req.session_id).await?;
    Ok(Json(ChallengeResponse { questions }))
}

async fn evaluate_handler(
    State(state): State<SharedState>,
    Json(req): Json<EvaluateRequest>,
) -> Result<Json<EvaluateResponse>, ApiError> {
    let feedback = state
        .assistant
        .evaluate(&req.session_id, &req.user_answers)
        .await?;
    Ok(Json(EvaluateResponse { feedback }))
}

async fn export_pdf_handler(
    State(state): State<SharedState>,
    Json(req): Json<SessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.assistant.export_report(&req.session_id).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"session_report.pdf\"".to_string(),
            ),
        ],
        bytes,
    ))
}

async fn wordcloud_handler(
    State(state): State<SharedState>,
    Json(req): Json<SessionRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let bytes = state.assistant.wordcloud(&req.session_id).await?;
    Ok(([(header::CONTENT_TYPE, "image/png".to_string())], bytes))
}
