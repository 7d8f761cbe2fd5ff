//! Handler-boundary error type
//!
//! Maps every failure in the relay paths onto the gateway's response
//! contract. Engine diagnostics ride along as `details` on the analysis
//! path; the ingest path logs them and returns the bare `{error}` body.

use crate::engine::EngineError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Neither file nor usable text in the request (400). The message is
    /// the route-specific client-facing error string.
    #[error("{0}")]
    NoInput(&'static str),

    /// Analysis relay failed, engine-side or locally (500)
    #[error("analysis relay failed: {details}")]
    Analysis { details: String },

    /// Corpus ingest relay failed (500)
    #[error("corpus ingest relay failed: {details}")]
    Ingest { details: String },
}

impl ApiError {
    pub fn analysis(err: EngineError) -> Self {
        ApiError::Analysis {
            details: err.diagnostic(),
        }
    }

    pub fn ingest(err: EngineError) -> Self {
        ApiError::Ingest {
            details: err.diagnostic(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::NoInput(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            ApiError::Analysis { details } => {
                error!("Analysis relay failed: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "An error occurred during analysis.",
                        "details": details,
                    })),
                )
                    .into_response()
            }
            ApiError::Ingest { details } => {
                error!("Corpus ingest relay failed: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to communicate with the AI service." })),
                )
                    .into_response()
            }
        }
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
