//! # error
//!
//! Centralised application error type.
//!
//! Every handler returns `Result<_, AppError>`. The `IntoResponse` impl turns
//! it into a `{ "ok": false, "error": "..." }` body so the journal UI always
//! gets a machine-readable response, even on failure.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::export::ImportError;
use crate::models::ValidationError;
use crate::store::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    /// The payload parsed but failed validation.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Catch-all for unexpected failures (snapshot I/O, serialization).
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::NotFound(format!("trade {id}")),
            StoreError::Validation(err) => err.into(),
            StoreError::Persist(err) => AppError::Internal(err),
        }
    }
}

impl From<ImportError> for AppError {
    fn from(err: ImportError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(err) => {
                error!(error = %format!("{err:#}"), "Request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Internal error: {err}"),
                )
            }
        };

        let body = Json(json!({
            "ok":    false,
            "error": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_store_errors_map_to_statuses() {
        let cases = [
            (StoreError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (
                StoreError::Validation(ValidationError::EmptyCurrencyPair),
                StatusCode::BAD_REQUEST,
            ),
            (
                StoreError::Persist(anyhow::anyhow!("disk full")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_import_errors_are_bad_requests() {
        let err = AppError::from(ImportError::UnsupportedVersion(7));
        assert!(matches!(&err, AppError::BadRequest(msg) if msg.contains('7')));
    }
}
