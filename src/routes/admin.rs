use axum::{
    extract::{Path, State},
    routing::{post, put},
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::ApiError;
use crate::models::admin::{AdminAuthRequest, AdminEditRequest, AdminImportRequest, ExportData};
use crate::models::history::HistoryRecord;
use crate::models::queue::QueueEntry;
use crate::routes::SuccessResponse;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/admin/entry/{id}", put(edit_entry).delete(delete_entry))
        .route("/api/admin/entry/{id}/force-ready", post(force_ready))
        .route("/api/admin/entry/{id}/force-readyup", post(force_ready_up))
        .route(
            "/api/admin/wing/{wing_id}/kick/{entry_id}",
            post(kick_from_wing),
        )
        .route("/api/queue/admin-clear", post(admin_clear))
        .route("/api/admin/history", post(history))
        .route("/api/admin/clear-history", post(clear_history))
        .route("/api/admin/export", post(export))
        .route("/api/admin/import", post(import))
}

#[derive(Debug, Serialize)]
struct KickResponse {
    success: bool,
    wing_dissolved: bool,
}

#[derive(Debug, Serialize)]
struct ImportCounts {
    queue: usize,
    wings: usize,
}

#[derive(Debug, Serialize)]
struct ImportResponse {
    success: bool,
    imported: ImportCounts,
}

async fn edit_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(payload): Json<AdminEditRequest>,
) -> Result<Json<QueueEntry>, ApiError> {
    let entry = state
        .admin_service
        .edit_entry(&payload.password, &entry_id, &payload)
        .await
        .map_err(|e| {
            error!("Admin edit of entry {} failed: {}", entry_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(entry))
}

async fn delete_entry(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .admin_service
        .delete_entry(&payload.password, &entry_id)
        .await
        .map_err(|e| {
            error!("Admin delete of entry {} failed: {}", entry_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(SuccessResponse::ok()))
}

async fn force_ready(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<QueueEntry>, ApiError> {
    let entry = state
        .admin_service
        .force_ready(&payload.password, &entry_id)
        .await
        .map_err(|e| {
            error!("Admin force-ready of entry {} failed: {}", entry_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(entry))
}

async fn force_ready_up(
    State(state): State<AppState>,
    Path(entry_id): Path<String>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<QueueEntry>, ApiError> {
    let entry = state
        .admin_service
        .force_ready_up(&payload.password, &entry_id)
        .await
        .map_err(|e| {
            error!("Admin force-readyup of entry {} failed: {}", entry_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(entry))
}

async fn kick_from_wing(
    State(state): State<AppState>,
    Path((wing_id, entry_id)): Path<(String, String)>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<KickResponse>, ApiError> {
    let outcome = state
        .admin_service
        .kick_from_wing(&payload.password, &wing_id, &entry_id)
        .await
        .map_err(|e| {
            error!("Admin kick of {} from wing {} failed: {}", entry_id, wing_id, e);
            ApiError::from(e)
        })?;
    Ok(Json(KickResponse {
        success: true,
        wing_dissolved: outcome.wing_dissolved,
    }))
}

async fn admin_clear(
    State(state): State<AppState>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .admin_service
        .clear_all(&payload.password)
        .await
        .map_err(|e| {
            error!("Admin clear failed: {}", e);
            ApiError::from(e)
        })?;
    info!("queue and wings cleared by admin");
    Ok(Json(SuccessResponse::ok()))
}

async fn history(
    State(state): State<AppState>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<Vec<HistoryRecord>>, ApiError> {
    let history = state
        .admin_service
        .history(&payload.password)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(history))
}

async fn clear_history(
    State(state): State<AppState>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<SuccessResponse>, ApiError> {
    state
        .admin_service
        .clear_history(&payload.password)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(SuccessResponse::ok()))
}

async fn export(
    State(state): State<AppState>,
    Json(payload): Json<AdminAuthRequest>,
) -> Result<Json<ExportData>, ApiError> {
    let data = state
        .admin_service
        .export(&payload.password)
        .await
        .map_err(ApiError::from)?;
    Ok(Json(data))
}

async fn import(
    State(state): State<AppState>,
    Json(payload): Json<AdminImportRequest>,
) -> Result<Json<ImportResponse>, ApiError> {
    let summary = state
        .admin_service
        .import(&payload.password, &payload.data)
        .await
        .map_err(|e| {
            error!("Admin import failed: {}", e);
            ApiError::from(e)
        })?;
    info!(
        "admin import applied: {} queued, {} wings",
        summary.queue, summary.wings
    );
    Ok(Json(ImportResponse {
        success: true,
        imported: ImportCounts {
            queue: summary.queue,
            wings: summary.wings,
        },
    }))
}
