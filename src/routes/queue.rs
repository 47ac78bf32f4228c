use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::{debug, error};

use crate::error::ApiError;
use crate::models::queue::requests::{JoinQueueRequest, UpdateEntryRequest};
use crate::models::queue::QueueEntry;
use crate::routes::SuccessResponse;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/queue", get(get_queue).post(add_to_queue))
        .route("/api/queue/clear", post(clear_queue))
        .route("/api/queue/{id}", put(update_entry).delete(remove_entry))
}

async fn get_queue(State(state): State<AppState>) -> Result<Json<Vec<QueueEntry>>, ApiError> {
    let queue = state.queue_service.get_queue().await.map_err(|e| {
        error!("Failed to load queue: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(queue))
}

async fn add_to_queue(
    State(state): State<AppState>,
    Json(payload): Json<JoinQueueRequest>,
) -> Result<(StatusCode, Json<QueueEntry>), ApiError> {
    let entry = state.queue_service.join_queue(&payload).await.map_err(|e| {
        error!("Failed to join queue: {}", e);
        ApiError::from(e)
    })?;

    debug!("CMDR {} queued for {}", entry.cmdr, entry.system);
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn update_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(payload): Json<UpdateEntryRequest>,
) -> Result<Json<QueueEntry>, ApiError> {
    let entry = state
        .queue_service
        .update_entry(&entry_id, &payload)
        .await
        .map_err(|e| {
            error!("Failed to update entry {}: {}", entry_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(entry))
}

async fn remove_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .queue_service
        .remove_entry(&entry_id)
        .await
        .map_err(|e| {
            error!("Failed to remove entry {}: {}", entry_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(SuccessResponse::ok()))
}

async fn clear_queue(State(state): State<AppState>) -> Result<Json<SuccessResponse>, ApiError> {
    state.queue_service.clear_queue().await.map_err(|e| {
        error!("Failed to clear queue: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(SuccessResponse::ok()))
}
