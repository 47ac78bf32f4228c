use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::services::errors::{
    admin_service_errors::AdminServiceError, queue_service_errors::QueueServiceError,
};

#[derive(Debug)]
pub enum ApiError {
    QueueService(QueueServiceError),
    AdminService(AdminServiceError),
}

impl From<QueueServiceError> for ApiError {
    fn from(error: QueueServiceError) -> Self {
        ApiError::QueueService(error)
    }
}

impl From<AdminServiceError> for ApiError {
    fn from(error: AdminServiceError) -> Self {
        ApiError::AdminService(error)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let queue_error = |error: &QueueServiceError| match error {
            QueueServiceError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            QueueServiceError::EntryNotFound => {
                (StatusCode::NOT_FOUND, "Entry not found".to_string())
            }
            QueueServiceError::WingNotFound => {
                (StatusCode::NOT_FOUND, "Wing not found".to_string())
            }
            QueueServiceError::MemberNotFound => {
                (StatusCode::NOT_FOUND, "Member not in wing".to_string())
            }
            QueueServiceError::StoreError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Store error".to_string(),
            ),
        };

        let (status, message) = match &self {
            ApiError::QueueService(error) => queue_error(error),
            ApiError::AdminService(AdminServiceError::Unauthorized) => {
                (StatusCode::FORBIDDEN, "Invalid password".to_string())
            }
            ApiError::AdminService(AdminServiceError::QueueService(error)) => queue_error(error),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
