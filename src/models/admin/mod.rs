use serde::{Deserialize, Serialize};

use crate::models::history::HistoryRecord;
use crate::models::queue::QueueEntry;
use crate::models::wing::Wing;

/// Minimal admin body: just the shared secret.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminAuthRequest {
    #[serde(default)]
    pub password: String,
}

/// Body of `PUT /api/admin/entry/{id}`. Only present fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminEditRequest {
    #[serde(default)]
    pub password: String,
    pub cmdr: Option<String>,
    pub credits: Option<i64>,
    pub stations: Option<i64>,
    pub missions: Option<i64>,
    pub status: Option<String>,
    #[serde(rename = "availableFromUTC")]
    pub available_from_utc: Option<String>,
    #[serde(rename = "availableToUTC")]
    pub available_to_utc: Option<String>,
}

/// Full snapshot of the three stored collections.
#[derive(Debug, Clone, Serialize)]
pub struct ExportData {
    pub queue: Vec<QueueEntry>,
    pub wings: Vec<Wing>,
    pub history: Vec<HistoryRecord>,
}

/// Collections to restore. Each collection present replaces the stored one
/// wholesale; absent collections are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImportData {
    pub queue: Option<Vec<QueueEntry>>,
    pub wings: Option<Vec<Wing>>,
    pub history: Option<Vec<HistoryRecord>>,
}

/// Body of `POST /api/admin/import`.
#[derive(Debug, Clone, Deserialize)]
pub struct AdminImportRequest {
    #[serde(default)]
    pub password: String,
    #[serde(flatten)]
    pub data: ImportData,
}
