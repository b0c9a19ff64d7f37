use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json::is_truthy;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Inbound body of `POST /sakhi/chat`. Fields are relayed untouched, so their
/// JSON type is not enforced here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<Value>,
    #[serde(default)]
    pub user_id: Option<Value>,
    #[serde(default)]
    pub phone_number: Option<Value>,
    #[serde(default)]
    pub language: Option<Value>,
}

/// Body sent to the chat backend. Only the four known fields survive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatForward {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<Value>,
    pub language: Value,
}

impl From<ChatRequest> for ChatForward {
    fn from(req: ChatRequest) -> Self {
        let language = req
            .language
            .filter(is_truthy)
            .unwrap_or_else(|| Value::String(DEFAULT_LANGUAGE.to_string()));
        Self {
            message: req.message,
            user_id: req.user_id,
            phone_number: req.phone_number,
            language,
        }
    }
}
