use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::DEFAULT_SYSTEM;

/// Body of `POST /api/queue`. Unspecified fields fall back to the legacy
/// defaults so older clients keep working.
#[derive(Debug, Clone, Deserialize)]
pub struct JoinQueueRequest {
    #[serde(default)]
    pub cmdr: String,
    #[serde(default)]
    pub credits: i64,
    #[serde(default = "default_stations")]
    pub stations: i64,
    #[serde(default = "default_missions")]
    pub missions: i64,
    #[serde(default = "default_system")]
    pub system: String,
    #[serde(rename = "availableFromUTC", default)]
    pub available_from_utc: String,
    #[serde(rename = "availableToUTC", default)]
    pub available_to_utc: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(rename = "readySince", default)]
    pub ready_since: Option<DateTime<Utc>>,
}

fn default_stations() -> i64 {
    4
}

fn default_missions() -> i64 {
    20
}

fn default_system() -> String {
    DEFAULT_SYSTEM.to_string()
}

fn default_status() -> String {
    "ready".to_string()
}

impl Default for JoinQueueRequest {
    fn default() -> Self {
        JoinQueueRequest {
            cmdr: String::new(),
            credits: 0,
            stations: default_stations(),
            missions: default_missions(),
            system: default_system(),
            available_from_utc: String::new(),
            available_to_utc: String::new(),
            status: default_status(),
            ready_since: None,
        }
    }
}

/// Body of `PUT /api/queue/{id}`. Only present fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateEntryRequest {
    pub status: Option<String>,
    pub credits: Option<i64>,
    pub stations: Option<i64>,
    #[serde(rename = "availableFromUTC")]
    pub available_from_utc: Option<String>,
    #[serde(rename = "availableToUTC")]
    pub available_to_utc: Option<String>,
    #[serde(rename = "readyUp")]
    pub ready_up: Option<bool>,
    #[serde(rename = "readyUpTime")]
    pub ready_up_time: Option<DateTime<Utc>>,
    #[serde(rename = "readySince")]
    pub ready_since: Option<DateTime<Utc>>,
}
