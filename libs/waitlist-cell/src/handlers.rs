use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use serde_json::{json, Value};
use uuid::Uuid;

use shared_models::AppError;

use crate::error::WaitlistError;
use crate::models::{EnqueueWaitlistRequest, UpdateWaitlistStatusRequest, WaitlistFilter};
use crate::services::queue::WaitlistQueueService;

pub struct WaitlistState {
    pub queue: Arc<WaitlistQueueService>,
}

fn map_waitlist_error(error: WaitlistError) -> AppError {
    match error {
        WaitlistError::DuplicateActiveEntry { .. } => AppError::Conflict(error.to_string()),
        WaitlistError::EntryNotFound(_) => AppError::NotFound(error.to_string()),
        WaitlistError::InvalidStatusTransition { .. } => AppError::BadRequest(error.to_string()),
        WaitlistError::RepositoryError(_) => AppError::Internal(error.to_string()),
    }
}

pub async fn enqueue_entry(
    State(state): State<Arc<WaitlistState>>,
    Json(request): Json<EnqueueWaitlistRequest>,
) -> Result<(StatusCode, Json<Value>), AppError> {
    let entry = state
        .queue
        .enqueue(request, Utc::now())
        .await
        .map_err(map_waitlist_error)?;

    Ok((StatusCode::CREATED, Json(json!({ "entry": entry }))))
}

pub async fn list_entries(
    State(state): State<Arc<WaitlistState>>,
    Query(filter): Query<WaitlistFilter>,
) -> Result<Json<Value>, AppError> {
    let entries = state.queue.list(&filter).await.map_err(map_waitlist_error)?;
    let count = entries.len();

    Ok(Json(json!({
        "count": count,
        "entries": entries
    })))
}

pub async fn remove_entry(
    State(state): State<Arc<WaitlistState>>,
    Path(entry_id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    let entry = state
        .queue
        .remove(entry_id)
        .await
        .map_err(map_waitlist_error)?;

    Ok(Json(json!({ "entry": entry })))
}

pub async fn update_entry_status(
    State(state): State<Arc<WaitlistState>>,
    Path(entry_id): Path<Uuid>,
    Json(request): Json<UpdateWaitlistStatusRequest>,
) -> Result<Json<Value>, AppError> {
    let entry = state
        .queue
        .update_status(entry_id, request.status)
        .await
        .map_err(map_waitlist_error)?;

    Ok(Json(json!({ "entry": entry })))
}

pub async fn expire_overdue(
    State(state): State<Arc<WaitlistState>>,
) -> Result<Json<Value>, AppError> {
    let expired = state
        .queue
        .expire_overdue(Utc::now())
        .await
        .map_err(map_waitlist_error)?;

    Ok(Json(json!({ "expired": expired })))
}
