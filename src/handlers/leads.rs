use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use tracing::info;

use crate::db::{Lead, LeadInsert, LeadPatch};
use crate::{BindingError, router::BindingState};

/// GET /api/leads
pub async fn list_leads_handler(
    State(state): State<BindingState>,
) -> Result<Json<Vec<Lead>>, BindingError> {
    Ok(Json(state.storage.list_leads().await?))
}

/// POST /api/leads
pub async fn create_lead_handler(
    State(state): State<BindingState>,
    payload: Result<Json<LeadInsert>, JsonRejection>,
) -> Result<(StatusCode, Json<Lead>), BindingError> {
    let Json(insert) = payload?;
    let lead = state.storage.insert_lead(insert.validate()?).await?;
    info!(lead_id = %lead.lead_id, source = ?lead.source, "lead created");
    Ok((StatusCode::CREATED, Json(lead)))
}

/// GET /api/leads/{lead_id}
pub async fn get_lead_handler(
    State(state): State<BindingState>,
    Path(lead_id): Path<String>,
) -> Result<Json<Lead>, BindingError> {
    state
        .storage
        .get_lead(&lead_id)
        .await?
        .map(Json)
        .ok_or_else(|| BindingError::NotFound(format!("lead `{lead_id}`")))
}

/// PATCH /api/leads/{lead_id}
pub async fn update_lead_handler(
    State(state): State<BindingState>,
    Path(lead_id): Path<String>,
    payload: Result<Json<LeadPatch>, JsonRejection>,
) -> Result<Json<Lead>, BindingError> {
    let Json(patch) = payload?;
    let lead = state
        .storage
        .update_lead(&lead_id, patch)
        .await?
        .ok_or_else(|| BindingError::NotFound(format!("lead `{lead_id}`")))?;
    info!(lead_id = %lead.lead_id, status = %lead.status, "lead updated");
    Ok(Json(lead))
}
