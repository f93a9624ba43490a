//! Error taxonomy shared by the record store, the enrichment client, and the
//! HTTP layer. Operations return a tagged error kind instead of ad-hoc status
//! codes; the single `IntoResponse` impl below is the only place errors turn
//! into HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Convenience alias used across the persistence, enrichment, and handler
/// layers.
pub type Result<T> = std::result::Result<T, LibraryError>;

#[derive(Debug, Error)]
pub enum LibraryError {
    /// Required input missing or malformed; detected before any store
    /// interaction.
    #[error("validation failed: {0}")]
    Validation(String),

    /// No song exists under the requested id.
    #[error("song {0} not found")]
    NotFound(i64),

    /// Persistence layer failure. Logged with detail at the boundary but
    /// surfaced to callers only as a generic failure.
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// The enrichment service answered with a non-success status.
    #[error("external service returned status {status}: {body}")]
    ExternalStatus { status: u16, body: String },

    /// The enrichment request never completed.
    #[error("external service request failed: {0}")]
    ExternalRequest(#[from] reqwest::Error),

    /// The enrichment service answered successfully with a body we cannot
    /// decode.
    #[error("failed to decode external service response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl IntoResponse for LibraryError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            LibraryError::Validation(reason) => (StatusCode::BAD_REQUEST, reason.clone()),
            LibraryError::NotFound(_) => (StatusCode::NOT_FOUND, "song not found".to_string()),
            LibraryError::Store(err) => {
                tracing::error!("store failure: {err}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "storage failure".to_string(),
                )
            }
            // Enrichment failures are swallowed on the create path, so these
            // arms only fire if an enrichment error ever escapes a handler.
            LibraryError::ExternalStatus { status, body } => {
                tracing::error!("enrichment failure: status {status}: {body}");
                (
                    StatusCode::BAD_GATEWAY,
                    "external service failure".to_string(),
                )
            }
            LibraryError::ExternalRequest(err) => {
                tracing::error!("enrichment request failure: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    "external service failure".to_string(),
                )
            }
            LibraryError::Decode(err) => {
                tracing::error!("enrichment decode failure: {err}");
                (
                    StatusCode::BAD_GATEWAY,
                    "external service failure".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
