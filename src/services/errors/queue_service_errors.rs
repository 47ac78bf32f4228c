use crate::repositories::store::StoreError;

#[derive(Debug)]
pub enum QueueServiceError {
    ValidationError(String),
    EntryNotFound,
    WingNotFound,
    MemberNotFound,
    StoreError(String),
}

impl std::fmt::Display for QueueServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueueServiceError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            QueueServiceError::EntryNotFound => write!(f, "Entry not found"),
            QueueServiceError::WingNotFound => write!(f, "Wing not found"),
            QueueServiceError::MemberNotFound => write!(f, "Member not in wing"),
            QueueServiceError::StoreError(msg) => write!(f, "Store error: {}", msg),
        }
    }
}

impl std::error::Error for QueueServiceError {}

impl From<StoreError> for QueueServiceError {
    fn from(error: StoreError) -> Self {
        QueueServiceError::StoreError(error.to_string())
    }
}
