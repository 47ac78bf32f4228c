//! Wing formation selection.
//!
//! Pure functions over a queue snapshot; the service layer commits the
//! result (wing append, history records, queue removal) under its lock.

use std::collections::{BTreeSet, HashSet};

use chrono::{DateTime, Duration, Utc};

use crate::models::queue::QueueEntry;
use crate::models::wing::WING_SIZE;
use crate::services::time_window::is_within_time_window;

/// Distinct grouping keys present in the queue, sorted so a single matcher
/// pass visits systems in a stable order.
pub fn queue_systems(queue: &[QueueEntry]) -> Vec<String> {
    queue
        .iter()
        .map(QueueEntry::system_key)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Picks the members of a formable wing for one system, or None when fewer
/// than `WING_SIZE` distinct CMDRs are eligible.
///
/// Eligible means: matching system, status `ready`, readied up, and inside
/// the availability window right now. Candidates are taken earliest-ready
/// first (`readySince`, falling back to join time), skipping entries whose
/// CMDR name duplicates an already accepted member. One queue slot per
/// distinct commander per wing; a duplicate stays queued untouched.
pub fn find_formable_wing(
    queue: &[QueueEntry],
    system_key: &str,
    now: DateTime<Utc>,
    grace: Duration,
) -> Option<Vec<QueueEntry>> {
    let mut ready: Vec<&QueueEntry> = queue
        .iter()
        .filter(|e| e.system_key() == system_key)
        .filter(|e| e.status == "ready" && e.ready_up)
        .filter(|e| is_within_time_window(e, now, grace))
        .collect();
    ready.sort_by_key(|e| e.ready_sort_key());

    let mut members = Vec::with_capacity(WING_SIZE);
    let mut used_cmdrs = HashSet::new();
    for entry in ready {
        if used_cmdrs.insert(entry.cmdr_key()) {
            members.push(entry.clone());
        }
        if members.len() == WING_SIZE {
            break;
        }
    }

    if members.len() == WING_SIZE {
        Some(members)
    } else {
        None
    }
}
