use async_trait::async_trait;
use aws_sdk_dynamodb::types::AttributeValue;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::history::HistoryRecord;
use crate::models::queue::QueueEntry;
use crate::models::wing::Wing;
use crate::repositories::store::{Store, StoreError};

const COLLECTION_KEY: &str = "collection";
const DATA_ATTRIBUTE: &str = "data";

const QUEUE_COLLECTION: &str = "queue";
const WINGS_COLLECTION: &str = "wings";
const HISTORY_COLLECTION: &str = "history";

/// Store backed by a DynamoDB table holding one item per collection, with
/// the whole collection as a JSON document. Mirrors the key-per-collection
/// layout of the file store.
pub struct DynamoStore {
    client: aws_sdk_dynamodb::Client,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: aws_sdk_dynamodb::Client, table_name: String) -> Self {
        DynamoStore { client, table_name }
    }

    async fn load_collection<T: DeserializeOwned>(
        &self,
        collection: &str,
    ) -> Result<Vec<T>, StoreError> {
        let result = self
            .client
            .get_item()
            .table_name(&self.table_name)
            .key(COLLECTION_KEY, AttributeValue::S(collection.to_string()))
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;

        let Some(item) = result.item else {
            return Ok(Vec::new());
        };
        let Some(AttributeValue::S(raw)) = item.get(DATA_ATTRIBUTE) else {
            return Ok(Vec::new());
        };
        serde_json::from_str(raw).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    async fn save_collection<T: Serialize>(
        &self,
        collection: &str,
        items: &[T],
    ) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(items).map_err(|e| StoreError::Serialization(e.to_string()))?;

        self.client
            .put_item()
            .table_name(&self.table_name)
            .item(COLLECTION_KEY, AttributeValue::S(collection.to_string()))
            .item(DATA_ATTRIBUTE, AttributeValue::S(raw))
            .send()
            .await
            .map_err(|e| StoreError::Remote(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl Store for DynamoStore {
    async fn load_queue(&self) -> Result<Vec<QueueEntry>, StoreError> {
        self.load_collection(QUEUE_COLLECTION).await
    }

    async fn save_queue(&self, queue: &[QueueEntry]) -> Result<(), StoreError> {
        self.save_collection(QUEUE_COLLECTION, queue).await
    }

    async fn load_wings(&self) -> Result<Vec<Wing>, StoreError> {
        self.load_collection(WINGS_COLLECTION).await
    }

    async fn save_wings(&self, wings: &[Wing]) -> Result<(), StoreError> {
        self.save_collection(WINGS_COLLECTION, wings).await
    }

    async fn load_history(&self) -> Result<Vec<HistoryRecord>, StoreError> {
        self.load_collection(HISTORY_COLLECTION).await
    }

    async fn save_history(&self, history: &[HistoryRecord]) -> Result<(), StoreError> {
        self.save_collection(HISTORY_COLLECTION, history).await
    }
}
