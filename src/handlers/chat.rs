use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::Value;

use crate::api::SakhiBackendApi;
use crate::types::chat::{ChatForward, ChatRequest};
use crate::{BindingError, router::BindingState};

/// POST /sakhi/chat -> relays the turn to the chat backend and returns its reply untouched.
pub async fn sakhi_chat_handler(
    State(state): State<BindingState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<Value>, BindingError> {
    let Json(req) = payload.map_err(BindingError::ChatBody)?;
    let body = ChatForward::from(req);
    let reply = SakhiBackendApi::forward_chat(
        &state.client,
        &state.backend_url,
        &body,
        state.upstream_timeout,
    )
    .await?;
    Ok(Json(reply))
}
