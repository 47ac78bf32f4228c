use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::queue::QueueEntry;

/// Number of members a wing is formed with.
pub const WING_SIZE: usize = 4;

/// A formed four-CMDR group. Members are snapshots taken at formation time,
/// not live references into the queue.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Wing {
    pub id: String,
    pub system: String,
    pub members: Vec<QueueEntry>,
    pub formed: DateTime<Utc>,
}

impl Wing {
    pub fn new(system: &str, members: Vec<QueueEntry>, now: DateTime<Utc>) -> Self {
        Wing {
            id: Uuid::new_v4().to_string(),
            system: system.to_string(),
            members,
            formed: now,
        }
    }
}
