//! JSON error responses for the HTTP API.
//!
//! Every failure path returns `{"error": "..."}` with a status chosen by
//! error class: user input (validation, unknown session) maps to 4xx,
//! remote-model failures to 502, rendering faults to 500. Nothing is
//! retried.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use docsage_core::error::Error;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// API error with a status code and a user-readable message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status = match &err {
            Error::SessionNotFound(_) => StatusCode::NOT_FOUND,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Extraction(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Gateway(_) => StatusCode::BAD_GATEWAY,
            Error::Report(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docsage_core::error::{ExtractionError, GatewayError, ValidationError};

    #[test]
    fn status_mapping_per_error_class() {
        let cases: Vec<(Error, StatusCode)> = vec![
            (Error::SessionNotFound("x".into()), StatusCode::NOT_FOUND),
            (
                ValidationError::NoActiveChallenge.into(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ExtractionError::Pdf("broken".into()).into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                GatewayError::Network("down".into()).into(),
                StatusCode::BAD_GATEWAY,
            ),
            (
                Error::Report("render".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }
}
