use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;

use crate::db::{User, UserInsert};
use crate::{BindingError, router::BindingState};

/// POST /api/users
pub async fn create_user_handler(
    State(state): State<BindingState>,
    payload: Result<Json<UserInsert>, JsonRejection>,
) -> Result<(StatusCode, Json<User>), BindingError> {
    let Json(insert) = payload?;
    let user = state.storage.create_user(insert.validate()?).await?;
    info!(user_id = %user.id, username = %user.username, "user created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/users/{id}
pub async fn get_user_handler(
    State(state): State<BindingState>,
    Path(id): Path<String>,
) -> Result<Json<User>, BindingError> {
    state
        .storage
        .get_user(&id)
        .await?
        .map(Json)
        .ok_or_else(|| BindingError::NotFound(format!("user `{id}`")))
}

/// GET /api/users/by-username/{username}
pub async fn get_user_by_username_handler(
    State(state): State<BindingState>,
    Path(username): Path<String>,
) -> Result<Json<User>, BindingError> {
    state
        .storage
        .get_user_by_username(&username)
        .await?
        .map(Json)
        .ok_or_else(|| BindingError::NotFound(format!("user `{username}`")))
}
