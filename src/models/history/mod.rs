use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::queue::QueueEntry;

/// Terminal event recorded when an entry leaves the queue or a wing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryStatus {
    Expired,
    WingFormed,
    Left,
    AdminDeleted,
    AdminCleared,
    AdminKicked,
}

/// Append-only audit record. The collection is capped; oldest records are
/// dropped first when the cap is exceeded.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryRecord {
    pub cmdr: String,
    pub credits: i64,
    pub system: String,
    pub status: HistoryStatus,
    pub timestamp: DateTime<Utc>,
    pub original_id: String,
}

impl HistoryRecord {
    pub fn for_entry(entry: &QueueEntry, status: HistoryStatus, now: DateTime<Utc>) -> Self {
        HistoryRecord {
            cmdr: entry.cmdr.clone(),
            credits: entry.credits,
            system: entry.system.clone(),
            status,
            timestamp: now,
            original_id: entry.id.clone(),
        }
    }
}
