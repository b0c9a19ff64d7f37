use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use serde_json::{Value, json};
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;

use crate::config::BACKEND_UNREACHABLE;
use crate::db::ValidationError;

#[derive(Debug, ThisError)]
pub enum BindingError {
    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    DatabaseError(#[from] SqlxError),

    /// The chat backend answered with a non-2xx status.
    #[error("Upstream error with status: {status}")]
    Upstream {
        status: StatusCode,
        detail: Option<Value>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The chat route could not read the widget's body.
    #[error("Malformed chat body: {0}")]
    ChatBody(JsonRejection),

    #[error("Malformed request body: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<JsonRejection> for BindingError {
    fn from(rejection: JsonRejection) -> Self {
        BindingError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for BindingError {
    fn into_response(self) -> axum::response::Response {
        let (status, code, message) = match self {
            // Chat relay failures keep the `{ "error": <detail> }` shape the
            // frontend widget reads.
            BindingError::Upstream { status, detail } => {
                let detail = detail.unwrap_or_else(|| json!(BACKEND_UNREACHABLE));
                return (status, Json(json!({ "error": detail }))).into_response();
            }
            BindingError::ChatBody(rejection) => {
                return (
                    rejection.status(),
                    Json(json!({ "error": rejection.body_text() })),
                )
                    .into_response();
            }
            BindingError::Reqwest(_) | BindingError::UrlParse(_) => {
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": BACKEND_UNREACHABLE })),
                )
                    .into_response();
            }
            BindingError::Validation(e) => (StatusCode::BAD_REQUEST, "VALIDATION", e.to_string()),
            BindingError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            BindingError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            BindingError::NotFound(what) => {
                (StatusCode::NOT_FOUND, "NOT_FOUND", format!("{what} not found"))
            }
            BindingError::DatabaseError(_) | BindingError::Json(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal server error occurred.".to_string(),
            ),
        };
        let body = ApiErrorResponse {
            error: ApiErrorBody {
                code: code.to_string(),
                message,
            },
        };
        (status, Json(body)).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
