use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error as ThisError;

use crate::types::json::{is_truthy, message_field};

const UNKNOWN_ERROR: &str = "Unknown error";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Non-2xx response.
    Http,
    /// 2xx response whose body carried a falsy `success` flag.
    Application,
}

/// A failed API call: message, status and whatever body came back.
#[derive(Debug, Clone, ThisError)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    pub status: StatusCode,
    pub data: Option<Value>,
}

impl ApiError {
    /// Normalize a non-2xx response body.
    ///
    /// The message comes from the JSON `error` field, then `message`, then
    /// the raw text when the body is not JSON, then the status line.
    pub fn from_failure(status: StatusCode, body: &[u8]) -> Self {
        let status_line = format!(
            "Request failed {} {}",
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        )
        .trim_end()
        .to_string();

        let (message, data) = match serde_json::from_slice::<Value>(body) {
            Ok(json) => {
                let message = message_field(&json, "error")
                    .or_else(|| message_field(&json, "message"))
                    .unwrap_or(status_line);
                (message, Some(json))
            }
            Err(_) => {
                let text = String::from_utf8_lossy(body);
                let message = if text.is_empty() {
                    status_line
                } else {
                    text.into_owned()
                };
                (message, None)
            }
        };

        Self {
            kind: ApiErrorKind::Http,
            message,
            status,
            data,
        }
    }

    /// Reject a 2xx body that reports `success` as falsy.
    pub fn check_success(status: StatusCode, body: &Value) -> Result<(), Self> {
        let Some(flag) = body.as_object().and_then(|o| o.get("success")) else {
            return Ok(());
        };
        if is_truthy(flag) {
            return Ok(());
        }
        Err(Self {
            kind: ApiErrorKind::Application,
            message: message_field(body, "error").unwrap_or_else(|| UNKNOWN_ERROR.to_string()),
            status,
            data: Some(body.clone()),
        })
    }
}

#[derive(Debug, ThisError)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("HTTP request error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("base URL cannot be a base: {0}")]
    InvalidBaseUrl(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Status of the failed call, when the server answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Api(e) => Some(e.status),
            ClientError::Reqwest(e) => e.status(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_error_field_wins() {
        let err = ApiError::from_failure(
            StatusCode::BAD_REQUEST,
            br#"{"error":"slot taken","message":"ignored"}"#,
        );
        assert_eq!(err.kind, ApiErrorKind::Http);
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, "slot taken");
        assert_eq!(err.data, Some(json!({ "error": "slot taken", "message": "ignored" })));
    }

    #[test]
    fn json_message_field_is_second_choice() {
        let err = ApiError::from_failure(StatusCode::NOT_FOUND, br#"{"message":"no patient"}"#);
        assert_eq!(err.message, "no patient");
    }

    #[test]
    fn json_without_message_uses_status_line() {
        let err = ApiError::from_failure(StatusCode::FORBIDDEN, br#"{"code":42}"#);
        assert_eq!(err.message, "Request failed 403 Forbidden");
        assert_eq!(err.data, Some(json!({ "code": 42 })));
    }

    #[test]
    fn plain_text_body_becomes_message() {
        let err = ApiError::from_failure(StatusCode::BAD_GATEWAY, b"gateway exploded");
        assert_eq!(err.message, "gateway exploded");
        assert_eq!(err.data, None);
    }

    #[test]
    fn empty_body_uses_status_line() {
        let err = ApiError::from_failure(StatusCode::INTERNAL_SERVER_ERROR, b"");
        assert_eq!(err.message, "Request failed 500 Internal Server Error");
    }

    #[test]
    fn success_false_is_rejected() {
        let body = json!({ "success": false, "error": "quota exceeded" });
        let err = ApiError::check_success(StatusCode::OK, &body).unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::Application);
        assert_eq!(err.message, "quota exceeded");
        assert_eq!(err.status, StatusCode::OK);

        let err = ApiError::check_success(StatusCode::OK, &json!({ "success": 0 })).unwrap_err();
        assert_eq!(err.message, "Unknown error");
    }

    #[test]
    fn bodies_without_falsy_success_pass() {
        for body in [
            json!({ "success": true, "data": [] }),
            json!({ "data": [] }),
            json!([{ "success": false }]),
        ] {
            assert!(ApiError::check_success(StatusCode::OK, &body).is_ok());
        }
    }
}
