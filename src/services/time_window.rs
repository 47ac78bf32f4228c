//! Pure time predicates for queue entries.
//!
//! Two separate rules apply to every entry: a tight availability window
//! (with a small grace margin) gates *matching*, while a coarser expiry rule
//! gates *queue membership*, so an upcoming booking is not evicted before
//! its window even opens.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};

use crate::models::queue::QueueEntry;

/// Lenient ISO-8601 parse. Empty or malformed strings read as "no value";
/// a bad timestamp only ever widens a window, it never fails a check.
pub fn parse_iso_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    // Naive timestamps (no offset) are treated as UTC.
    trimmed
        .parse::<NaiveDateTime>()
        .ok()
        .map(|naive| naive.and_utc())
}

/// Matching eligibility: inside the declared availability window, widened by
/// the grace period on both ends. No bounds means always eligible.
pub fn is_within_time_window(entry: &QueueEntry, now: DateTime<Utc>, grace: Duration) -> bool {
    if let Some(from) = parse_iso_timestamp(&entry.available_from_utc) {
        if now < from - grace {
            return false;
        }
    }
    if let Some(to) = parse_iso_timestamp(&entry.available_to_utc) {
        if now > to + grace {
            return false;
        }
    }
    true
}

/// Queue membership: whether the entry should remain queued at all.
/// Exactly one branch applies, checked in this order:
/// an end bound wins over a start bound, which wins over the join time.
pub fn is_entry_valid(entry: &QueueEntry, now: DateTime<Utc>, expiry: Duration) -> bool {
    if let Some(to) = parse_iso_timestamp(&entry.available_to_utc) {
        return now < to + Duration::hours(1);
    }
    if let Some(from) = parse_iso_timestamp(&entry.available_from_utc) {
        return now < from + expiry;
    }
    now < entry.joined + expiry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::queue::requests::JoinQueueRequest;

    fn entry_at(joined: DateTime<Utc>) -> QueueEntry {
        let request = JoinQueueRequest {
            cmdr: "Jameson".to_string(),
            ..JoinQueueRequest::default()
        };
        QueueEntry::new(&request, joined)
    }

    fn t(raw: &str) -> DateTime<Utc> {
        parse_iso_timestamp(raw).unwrap()
    }

    #[test]
    fn parse_accepts_rfc3339_and_naive_forms() {
        assert!(parse_iso_timestamp("2026-01-10T12:00:00Z").is_some());
        assert!(parse_iso_timestamp("2026-01-10T12:00:00+02:00").is_some());
        assert!(parse_iso_timestamp("2026-01-10T12:00:00").is_some());
        assert!(parse_iso_timestamp("2026-01-10T12:00:00.250").is_some());
    }

    #[test]
    fn parse_treats_garbage_as_absent() {
        assert_eq!(parse_iso_timestamp(""), None);
        assert_eq!(parse_iso_timestamp("   "), None);
        assert_eq!(parse_iso_timestamp("not a date"), None);
        assert_eq!(parse_iso_timestamp("2026-13-40T99:00:00Z"), None);
    }

    #[test]
    fn window_with_no_bounds_is_always_open() {
        let entry = entry_at(t("2026-01-10T12:00:00Z"));
        let grace = Duration::minutes(5);
        assert!(is_within_time_window(&entry, t("1990-01-01T00:00:00Z"), grace));
        assert!(is_within_time_window(&entry, t("2100-01-01T00:00:00Z"), grace));
    }

    #[test]
    fn window_respects_grace_on_both_ends() {
        let mut entry = entry_at(t("2026-01-10T09:00:00Z"));
        entry.available_from_utc = "2026-01-10T12:00:00Z".to_string();
        entry.available_to_utc = "2026-01-10T14:00:00Z".to_string();
        let grace = Duration::minutes(5);

        // Too early: more than `grace` before the start.
        assert!(!is_within_time_window(&entry, t("2026-01-10T11:54:00Z"), grace));
        // Inside the grace margin before the start.
        assert!(is_within_time_window(&entry, t("2026-01-10T11:56:00Z"), grace));
        // Within the window proper.
        assert!(is_within_time_window(&entry, t("2026-01-10T13:00:00Z"), grace));
        // Inside the grace margin past the end.
        assert!(is_within_time_window(&entry, t("2026-01-10T14:04:00Z"), grace));
        // Too late: more than `grace` past the end.
        assert!(!is_within_time_window(&entry, t("2026-01-10T14:06:00Z"), grace));
    }

    #[test]
    fn window_with_malformed_bounds_is_open() {
        let mut entry = entry_at(t("2026-01-10T09:00:00Z"));
        entry.available_from_utc = "soon(tm)".to_string();
        entry.available_to_utc = "later".to_string();
        assert!(is_within_time_window(
            &entry,
            t("2030-06-01T00:00:00Z"),
            Duration::minutes(5)
        ));
    }

    #[test]
    fn validity_without_bounds_ends_exactly_at_joined_plus_expiry() {
        let joined = t("2026-01-10T12:00:00Z");
        let entry = entry_at(joined);
        let expiry = Duration::hours(24);

        assert!(is_entry_valid(&entry, joined, expiry));
        assert!(is_entry_valid(
            &entry,
            joined + expiry - Duration::seconds(1),
            expiry
        ));
        // Boundary is exclusive.
        assert!(!is_entry_valid(&entry, joined + expiry, expiry));
        assert!(!is_entry_valid(&entry, joined + expiry + Duration::seconds(1), expiry));
    }

    #[test]
    fn validity_with_end_bound_ignores_start_bound() {
        let mut entry = entry_at(t("2026-01-10T09:00:00Z"));
        entry.available_from_utc = "2026-01-01T00:00:00Z".to_string();
        entry.available_to_utc = "2026-01-10T14:00:00Z".to_string();
        let expiry = Duration::hours(24);

        // Valid until exactly one hour after the end bound, even though the
        // start bound plus expiry passed long ago.
        assert!(is_entry_valid(&entry, t("2026-01-10T14:59:59Z"), expiry));
        assert!(!is_entry_valid(&entry, t("2026-01-10T15:00:00Z"), expiry));
    }

    #[test]
    fn validity_with_start_bound_only_uses_expiry_from_start() {
        let mut entry = entry_at(t("2026-01-01T00:00:00Z"));
        entry.available_from_utc = "2026-01-10T12:00:00Z".to_string();
        let expiry = Duration::hours(24);

        // Still valid long after joined + expiry; the start bound governs.
        assert!(is_entry_valid(&entry, t("2026-01-11T11:59:59Z"), expiry));
        assert!(!is_entry_valid(&entry, t("2026-01-11T12:00:00Z"), expiry));
    }

    #[test]
    fn validity_with_malformed_bounds_falls_back_to_joined() {
        let joined = t("2026-01-10T12:00:00Z");
        let mut entry = entry_at(joined);
        entry.available_to_utc = "whenever".to_string();
        let expiry = Duration::hours(24);

        assert!(is_entry_valid(&entry, joined + Duration::hours(23), expiry));
        assert!(!is_entry_valid(&entry, joined + Duration::hours(25), expiry));
    }
}
