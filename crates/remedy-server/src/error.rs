// ABOUTME: Maps store errors onto structured JSON HTTP responses.
// ABOUTME: Every error body carries a machine-readable kind and a human-readable detail.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use remedy_store::StoreError;
use tokio::task::JoinError;

/// Handler error so `?` on store calls yields a proper response.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The blocking task running a store call panicked or was cancelled.
    #[error("store task failed: {0}")]
    Task(#[from] JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Store(StoreError::CategoryNotFound { .. } | StoreError::IndexNotFound { .. }) => {
                StatusCode::NOT_FOUND
            }
            Self::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            Self::Store(StoreError::Validation(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Store(StoreError::Persistence(_)) | Self::Task(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::Store(e) => e.kind(),
            Self::Task(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let mut body = serde_json::json!({
            "error": self.kind(),
            "detail": self.to_string(),
        });
        if let Self::Store(e) = &self
            && let Some(available) = e.available()
        {
            body["available"] = serde_json::json!(available);
        }

        (status, Json(body)).into_response()
    }
}
