use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use tracing::{debug, error};

use crate::error::ApiError;
use crate::models::queue::QueueEntry;
use crate::models::wing::Wing;
use crate::routes::SuccessResponse;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/wings", get(get_wings))
        .route("/api/ready-up/{id}", post(ready_up))
        .route("/api/wings/{id}/complete", post(complete_wing))
}

async fn get_wings(State(state): State<AppState>) -> Result<Json<Vec<Wing>>, ApiError> {
    let wings = state.queue_service.get_wings().await.map_err(|e| {
        error!("Failed to load wings: {}", e);
        ApiError::from(e)
    })?;
    Ok(Json(wings))
}

async fn ready_up(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
) -> Result<Json<QueueEntry>, ApiError> {
    let entry = state.queue_service.ready_up(&entry_id).await.map_err(|e| {
        error!("Failed to ready up entry {}: {}", entry_id, e);
        ApiError::from(e)
    })?;

    debug!("CMDR {} readied up", entry.cmdr);
    Ok(Json(entry))
}

async fn complete_wing(
    State(state): State<AppState>,
    Path(wing_id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .queue_service
        .complete_wing(&wing_id)
        .await
        .map_err(|e| {
            error!("Failed to complete wing {}: {}", wing_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(SuccessResponse::ok()))
}
