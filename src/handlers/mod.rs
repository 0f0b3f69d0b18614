// ---------------------------------------------------------------------------
// handlers/ - HTTP surface of the dashboard
// Sub-modules for logical grouping; mod.rs re-exports all public items
// so that lib.rs routes can use `handlers::*` directly.
// ---------------------------------------------------------------------------

pub(crate) mod dashboard;
pub(crate) mod invocation;
pub(crate) mod models;
pub(crate) mod system;
pub(crate) mod ui;

// ── Re-exports ───────────────────────────────────────────────────────────────

pub use dashboard::{dashboard_page, dashboard_snapshot, refresh_catalogs};
pub use invocation::{select_resource, set_input, submit_invocation};
pub use models::{delete_model, pull_model};
pub use system::{health, readiness};
pub use ui::{ui_delete_model, ui_pull_model, ui_select, ui_submit};

// ── Shared types ─────────────────────────────────────────────────────────────

use axum::http::StatusCode;
use axum::Json;
use serde_json::json;
use uuid::Uuid;

use crate::invocation::InvokeError;

/// Centralized API error type for all handlers.
/// Logs full details server-side, returns sanitized JSON to the client.
///
/// Response format:
/// ```json
/// {
///   "error": {
///     "code": "BAD_REQUEST",
///     "message": "Human-readable description",
///     "request_id": "uuid",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Upstream API error: {0}")]
    Upstream(String),
}

impl ApiError {
    /// Machine-readable error code string for each variant.
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::Upstream(_) => "UPSTREAM_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Sanitized message safe to return to clients. Upstream details
    /// stay in the server log.
    fn sanitized_message(&self) -> String {
        match self {
            ApiError::BadRequest(m) => m.clone(),
            ApiError::Conflict(m) => m.clone(),
            ApiError::Upstream(_) => "Upstream service error".to_string(),
        }
    }
}

impl From<InvokeError> for ApiError {
    fn from(err: InvokeError) -> Self {
        match err {
            InvokeError::NothingSelected => ApiError::Conflict(err.to_string()),
            InvokeError::InvalidPayload(_) => ApiError::BadRequest(err.to_string()),
            InvokeError::Transport(e) => ApiError::Upstream(e.to_string()),
        }
    }
}

impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let request_id = Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                code = self.error_code(),
                "API error ({}): {}",
                status.as_u16(),
                self
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                code = self.error_code(),
                "API error ({}): {}",
                status.as_u16(),
                self
            );
        }

        let body = json!({
            "error": {
                "code": self.error_code(),
                "message": self.sanitized_message(),
                "request_id": request_id,
                "details": null,
            }
        });
        (status, Json(body)).into_response()
    }
}
