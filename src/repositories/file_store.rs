use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::history::HistoryRecord;
use crate::models::queue::QueueEntry;
use crate::models::wing::Wing;
use crate::repositories::store::{Store, StoreError};

const QUEUE_FILE: &str = "queue.json";
const WINGS_FILE: &str = "wings.json";
const HISTORY_FILE: &str = "history.json";

/// Store backed by one JSON file per collection in a data directory.
/// A missing file reads as an empty collection; corrupt JSON is an error
/// rather than a silent reset.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        FileStore {
            data_dir: data_dir.into(),
        }
    }

    async fn load_collection<T: DeserializeOwned>(&self, file: &str) -> Result<Vec<T>, StoreError> {
        let path = self.data_dir.join(file);
        let raw = match tokio::fs::read(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Io(format!("{}: {}", path.display(), e))),
        };
        serde_json::from_slice(&raw)
            .map_err(|e| StoreError::Serialization(format!("{}: {}", path.display(), e)))
    }

    async fn save_collection<T: Serialize>(&self, file: &str, items: &[T]) -> Result<(), StoreError> {
        let path = self.data_dir.join(file);
        let raw = serde_json::to_vec(items).map_err(|e| StoreError::Serialization(e.to_string()))?;
        write_atomic(&path, &raw).await
    }
}

/// Write via a sibling temp file and rename so readers never observe a
/// half-written collection.
async fn write_atomic(path: &Path, raw: &[u8]) -> Result<(), StoreError> {
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, raw)
        .await
        .map_err(|e| StoreError::Io(format!("{}: {}", tmp.display(), e)))?;
    tokio::fs::rename(&tmp, path)
        .await
        .map_err(|e| StoreError::Io(format!("{}: {}", path.display(), e)))
}

#[async_trait]
impl Store for FileStore {
    async fn load_queue(&self) -> Result<Vec<QueueEntry>, StoreError> {
        self.load_collection(QUEUE_FILE).await
    }

    async fn save_queue(&self, queue: &[QueueEntry]) -> Result<(), StoreError> {
        self.save_collection(QUEUE_FILE, queue).await
    }

    async fn load_wings(&self) -> Result<Vec<Wing>, StoreError> {
        self.load_collection(WINGS_FILE).await
    }

    async fn save_wings(&self, wings: &[Wing]) -> Result<(), StoreError> {
        self.save_collection(WINGS_FILE, wings).await
    }

    async fn load_history(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        self.load_collection(HISTORY_FILE).await
    }

    async fn save_history(&self, history: &[HistoryRecord]) -> Result<(), StoreError> {
        self.save_collection(HISTORY_FILE, history).await
    }
}
