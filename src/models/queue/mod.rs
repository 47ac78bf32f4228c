pub mod requests;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use self::requests::JoinQueueRequest;

/// Maximum credits a single entry may advertise.
pub const MAX_CREDITS: i64 = 999;

/// System used when a request does not name one.
pub const DEFAULT_SYSTEM: &str = "Anana";

/// One CMDR waiting in the shared queue.
///
/// The wire format keeps the legacy camelCase keys so stored collections and
/// polling clients stay compatible.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct QueueEntry {
    pub id: String,
    pub cmdr: String,
    pub credits: i64,
    pub stations: i64,
    pub missions: i64,
    #[serde(default = "default_system")]
    pub system: String,
    #[serde(rename = "availableFromUTC", default)]
    pub available_from_utc: String,
    #[serde(rename = "availableToUTC", default)]
    pub available_to_utc: String,
    pub status: String,
    #[serde(rename = "readyUp", default)]
    pub ready_up: bool,
    pub joined: DateTime<Utc>,
    #[serde(rename = "readySince", default)]
    pub ready_since: Option<DateTime<Utc>>,
    #[serde(rename = "readyUpTime", default)]
    pub ready_up_time: Option<DateTime<Utc>>,
}

fn default_system() -> String {
    DEFAULT_SYSTEM.to_string()
}

/// Clamps credits to the advertised ceiling. Applied on every write path.
pub fn clamp_credits(credits: i64) -> i64 {
    credits.min(MAX_CREDITS)
}

impl QueueEntry {
    pub fn new(request: &JoinQueueRequest, now: DateTime<Utc>) -> Self {
        QueueEntry {
            id: Uuid::new_v4().to_string(),
            cmdr: request.cmdr.trim().to_string(),
            credits: clamp_credits(request.credits),
            stations: request.stations,
            missions: request.missions,
            system: request.system.trim().to_string(),
            available_from_utc: request.available_from_utc.clone(),
            available_to_utc: request.available_to_utc.clone(),
            status: request.status.clone(),
            ready_up: false,
            joined: now,
            ready_since: Some(request.ready_since.unwrap_or(now)),
            ready_up_time: None,
        }
    }

    /// FIFO ordering key for matching: earliest ready wins, falling back to
    /// join time for entries that never recorded a ready transition.
    pub fn ready_sort_key(&self) -> DateTime<Utc> {
        self.ready_since.unwrap_or(self.joined)
    }

    /// Case-insensitive grouping key for the per-system matcher scan.
    pub fn system_key(&self) -> String {
        self.system.to_lowercase()
    }

    /// Case-insensitive trimmed CMDR name, unique per formed wing.
    pub fn cmdr_key(&self) -> String {
        self.cmdr.trim().to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn join_request(cmdr: &str) -> JoinQueueRequest {
        JoinQueueRequest {
            cmdr: cmdr.to_string(),
            ..JoinQueueRequest::default()
        }
    }

    #[test]
    fn new_entry_applies_defaults() {
        let now = Utc::now();
        let entry = QueueEntry::new(&join_request("  Jameson  "), now);

        assert_eq!(entry.cmdr, "Jameson");
        assert_eq!(entry.system, DEFAULT_SYSTEM);
        assert_eq!(entry.stations, 4);
        assert_eq!(entry.missions, 20);
        assert_eq!(entry.status, "ready");
        assert!(!entry.ready_up);
        assert_eq!(entry.ready_since, Some(now));
        assert_eq!(entry.ready_up_time, None);
    }

    #[test]
    fn new_entry_clamps_credits() {
        let mut request = join_request("Jameson");
        request.credits = 5000;
        let entry = QueueEntry::new(&request, Utc::now());
        assert_eq!(entry.credits, MAX_CREDITS);
    }

    #[test]
    fn ready_sort_key_falls_back_to_joined() {
        let now = Utc::now();
        let mut entry = QueueEntry::new(&join_request("Jameson"), now);
        entry.ready_since = None;
        assert_eq!(entry.ready_sort_key(), now);
    }

    #[test]
    fn keys_normalize_case_and_whitespace() {
        let mut entry = QueueEntry::new(&join_request("Jameson"), Utc::now());
        entry.cmdr = " CMDR Jameson ".to_string();
        entry.system = "ANANA".to_string();
        assert_eq!(entry.cmdr_key(), "cmdr jameson");
        assert_eq!(entry.system_key(), "anana");
    }

    #[test]
    fn deserializes_legacy_records_with_missing_fields() {
        let raw = r#"{
            "id": "abc",
            "cmdr": "Jameson",
            "credits": 100,
            "stations": 4,
            "missions": 20,
            "status": "waiting",
            "joined": "2026-01-10T12:00:00Z"
        }"#;
        let entry: QueueEntry = serde_json::from_str(raw).unwrap();
        assert_eq!(entry.system, DEFAULT_SYSTEM);
        assert!(!entry.ready_up);
        assert_eq!(entry.ready_since, None);
        assert_eq!(entry.available_from_utc, "");
    }
}
