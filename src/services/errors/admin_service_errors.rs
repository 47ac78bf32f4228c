use crate::services::errors::queue_service_errors::QueueServiceError;

#[derive(Debug)]
pub enum AdminServiceError {
    Unauthorized,
    QueueService(QueueServiceError),
}

impl std::fmt::Display for AdminServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AdminServiceError::Unauthorized => write!(f, "Invalid password"),
            AdminServiceError::QueueService(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AdminServiceError {}

impl From<QueueServiceError> for AdminServiceError {
    fn from(error: QueueServiceError) -> Self {
        AdminServiceError::QueueService(error)
    }
}
