use async_trait::async_trait;

use crate::models::history::HistoryRecord;
use crate::models::queue::QueueEntry;
use crate::models::wing::Wing;

#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Serialization(String),
    Remote(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "I/O error: {}", msg),
            StoreError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
            StoreError::Remote(msg) => write!(f, "Remote store error: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Persistence for the three shared collections. Implementations hold whole
/// collections as JSON documents; load and save are full replacements, the
/// service layer provides atomicity around the read-modify-write cycle.
#[async_trait]
pub trait Store: Send + Sync {
    async fn load_queue(&self) -> Result<Vec<QueueEntry>, StoreError>;
    async fn save_queue(&self, queue: &[QueueEntry]) -> Result<(), StoreError>;

    async fn load_wings(&self) -> Result<Vec<Wing>, StoreError>;
    async fn save_wings(&self, wings: &[Wing]) -> Result<(), StoreError>;

    async fn load_history(&self) -> Result<Vec<HistoryRecord>, StoreError>;
    async fn save_history(&self, history: &[HistoryRecord]) -> Result<(), StoreError>;
}
