use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::models::admin::{AdminEditRequest, ExportData, ImportData};
use crate::models::history::{HistoryRecord, HistoryStatus};
use crate::models::queue::requests::{JoinQueueRequest, UpdateEntryRequest};
use crate::models::queue::{clamp_credits, QueueEntry};
use crate::models::wing::{Wing, WING_SIZE};
use crate::repositories::store::Store;
use crate::services::errors::queue_service_errors::QueueServiceError;
use crate::services::matching;
use crate::services::time_window::is_entry_valid;

#[derive(Debug, Clone, Copy)]
pub struct QueueConfig {
    pub expiry_hours: i64,
    pub grace_minutes: i64,
    pub history_limit: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        QueueConfig {
            expiry_hours: 24,
            grace_minutes: 5,
            history_limit: 500,
        }
    }
}

impl QueueConfig {
    fn expiry(&self) -> Duration {
        Duration::hours(self.expiry_hours)
    }

    fn grace(&self) -> Duration {
        Duration::minutes(self.grace_minutes)
    }
}

/// Outcome of kicking a wing member.
#[derive(Debug, Clone, Copy)]
pub struct KickOutcome {
    pub wing_dissolved: bool,
}

/// Counts reported after an admin import.
#[derive(Debug, Clone, Copy)]
pub struct ImportSummary {
    pub queue: usize,
    pub wings: usize,
}

/// Owns every state transition on the shared queue, wings and history
/// collections. Each public operation reloads from the store, mutates and
/// writes back under one async mutex, so externally visible operations are
/// atomic with respect to each other. Nothing is cached between operations;
/// a failed save leaves no divergent in-memory state behind.
pub struct QueueService {
    store: Arc<dyn Store + Send + Sync>,
    config: QueueConfig,
    lock: Mutex<()>,
}

impl QueueService {
    pub fn new(store: Arc<dyn Store + Send + Sync>, config: QueueConfig) -> Self {
        QueueService {
            store,
            config,
            lock: Mutex::new(()),
        }
    }

    /// Returns the live queue after sweeping out expired entries.
    pub async fn get_queue(&self) -> Result<Vec<QueueEntry>, QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut queue = self.store.load_queue().await?;
        self.sweep_expired(&mut queue, Utc::now()).await?;
        Ok(queue)
    }

    pub async fn join_queue(
        &self,
        request: &JoinQueueRequest,
    ) -> Result<QueueEntry, QueueServiceError> {
        if request.cmdr.trim().is_empty() {
            return Err(QueueServiceError::ValidationError(
                "CMDR name required".to_string(),
            ));
        }

        let _guard = self.lock.lock().await;
        let mut queue = self.store.load_queue().await?;
        let entry = QueueEntry::new(request, Utc::now());
        queue.push(entry.clone());
        self.store.save_queue(&queue).await?;
        debug!("CMDR {} joined the queue for {}", entry.cmdr, entry.system);
        Ok(entry)
    }

    pub async fn update_entry(
        &self,
        entry_id: &str,
        request: &UpdateEntryRequest,
    ) -> Result<QueueEntry, QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut queue = self.store.load_queue().await?;
        let now = Utc::now();

        let entry = queue
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(QueueServiceError::EntryNotFound)?;

        let old_status = entry.status.clone();
        if let Some(status) = &request.status {
            entry.status = status.clone();
        }
        if let Some(credits) = request.credits {
            entry.credits = clamp_credits(credits);
        }
        if let Some(stations) = request.stations {
            entry.stations = stations;
        }
        if let Some(from) = &request.available_from_utc {
            entry.available_from_utc = from.clone();
        }
        if let Some(to) = &request.available_to_utc {
            entry.available_to_utc = to.clone();
        }
        if let Some(ready_up) = request.ready_up {
            entry.ready_up = ready_up;
        }
        if let Some(ready_up_time) = request.ready_up_time {
            entry.ready_up_time = Some(ready_up_time);
        }

        // A transition into ready stamps the FIFO key, unless the caller
        // supplied an explicit one.
        if let Some(ready_since) = request.ready_since {
            entry.ready_since = Some(ready_since);
        } else if old_status != "ready" && entry.status == "ready" {
            entry.ready_since = Some(now);
        }

        let updated = entry.clone();
        self.store.save_queue(&queue).await?;
        Ok(updated)
    }

    /// A CMDR leaving of their own accord.
    pub async fn remove_entry(&self, entry_id: &str) -> Result<(), QueueServiceError> {
        let _guard = self.lock.lock().await;
        self.remove_entry_locked(entry_id, HistoryStatus::Left).await
    }

    pub async fn clear_queue(&self) -> Result<(), QueueServiceError> {
        let _guard = self.lock.lock().await;
        self.store.save_queue(&[]).await?;
        Ok(())
    }

    /// Marks the entry readied up and runs the matcher.
    pub async fn ready_up(&self, entry_id: &str) -> Result<QueueEntry, QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut queue = self.store.load_queue().await?;
        let now = Utc::now();

        let entry = queue
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(QueueServiceError::EntryNotFound)?;
        entry.ready_up = true;
        entry.ready_up_time = Some(now);
        let updated = entry.clone();

        self.store.save_queue(&queue).await?;
        self.form_wings(&mut queue, now).await?;
        Ok(updated)
    }

    pub async fn get_wings(&self) -> Result<Vec<Wing>, QueueServiceError> {
        let _guard = self.lock.lock().await;
        Ok(self.store.load_wings().await?)
    }

    /// Removes a finished wing. Members are gone for good; completion is the
    /// happy path, nothing returns to the queue.
    pub async fn complete_wing(&self, wing_id: &str) -> Result<(), QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut wings = self.store.load_wings().await?;
        let position = wings
            .iter()
            .position(|w| w.id == wing_id)
            .ok_or(QueueServiceError::WingNotFound)?;
        wings.remove(position);
        self.store.save_wings(&wings).await?;
        Ok(())
    }

    // ---- Admin operations (secret already verified by AdminService) ----

    pub async fn admin_edit(
        &self,
        entry_id: &str,
        request: &AdminEditRequest,
    ) -> Result<QueueEntry, QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut queue = self.store.load_queue().await?;

        let entry = queue
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(QueueServiceError::EntryNotFound)?;

        if let Some(cmdr) = &request.cmdr {
            entry.cmdr = cmdr.trim().to_string();
        }
        if let Some(credits) = request.credits {
            entry.credits = clamp_credits(credits);
        }
        if let Some(stations) = request.stations {
            entry.stations = stations;
        }
        if let Some(missions) = request.missions {
            entry.missions = missions;
        }
        if let Some(status) = &request.status {
            entry.status = status.clone();
        }
        if let Some(from) = &request.available_from_utc {
            entry.available_from_utc = from.clone();
        }
        if let Some(to) = &request.available_to_utc {
            entry.available_to_utc = to.clone();
        }

        let updated = entry.clone();
        self.store.save_queue(&queue).await?;
        Ok(updated)
    }

    pub async fn admin_delete(&self, entry_id: &str) -> Result<(), QueueServiceError> {
        let _guard = self.lock.lock().await;
        self.remove_entry_locked(entry_id, HistoryStatus::AdminDeleted)
            .await
    }

    /// Forces the entry to ready status without readying it up; the matcher
    /// does not run until an actual ready-up arrives.
    pub async fn force_ready(&self, entry_id: &str) -> Result<QueueEntry, QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut queue = self.store.load_queue().await?;
        let now = Utc::now();

        let entry = queue
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(QueueServiceError::EntryNotFound)?;
        entry.status = "ready".to_string();
        entry.ready_since = Some(now);
        let updated = entry.clone();

        self.store.save_queue(&queue).await?;
        Ok(updated)
    }

    /// Forces ready status plus ready-up, then runs the matcher.
    pub async fn force_ready_up(&self, entry_id: &str) -> Result<QueueEntry, QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut queue = self.store.load_queue().await?;
        let now = Utc::now();

        let entry = queue
            .iter_mut()
            .find(|e| e.id == entry_id)
            .ok_or(QueueServiceError::EntryNotFound)?;
        entry.status = "ready".to_string();
        entry.ready_up = true;
        entry.ready_up_time = Some(now);
        let updated = entry.clone();

        self.store.save_queue(&queue).await?;
        self.form_wings(&mut queue, now).await?;
        Ok(updated)
    }

    /// Removes a member from a wing and re-enqueues them at the back of the
    /// line with ready-up reset. A wing left with fewer than `WING_SIZE`
    /// members is dissolved and the rest are re-enqueued the same way.
    pub async fn kick_from_wing(
        &self,
        wing_id: &str,
        entry_id: &str,
    ) -> Result<KickOutcome, QueueServiceError> {
        let _guard = self.lock.lock().await;
        let mut wings = self.store.load_wings().await?;
        let mut queue = self.store.load_queue().await?;
        let now = Utc::now();

        let dissolved;
        let record;
        {
            let wing = wings
                .iter_mut()
                .find(|w| w.id == wing_id)
                .ok_or(QueueServiceError::WingNotFound)?;
            let position = wing
                .members
                .iter()
                .position(|m| m.id == entry_id)
                .ok_or(QueueServiceError::MemberNotFound)?;

            let mut kicked = wing.members.remove(position);
            record = HistoryRecord::for_entry(&kicked, HistoryStatus::AdminKicked, now);
            requeue_member(&mut kicked, now);
            info!("CMDR {} kicked from wing {}", kicked.cmdr, wing_id);
            queue.push(kicked);

            dissolved = wing.members.len() < WING_SIZE;
            if dissolved {
                for mut member in wing.members.drain(..) {
                    requeue_member(&mut member, now);
                    queue.push(member);
                }
                info!("wing {} dissolved", wing_id);
            }
        }
        if dissolved {
            wings.retain(|w| w.id != wing_id);
        }

        self.append_history(vec![record]).await?;
        self.store.save_wings(&wings).await?;
        self.store.save_queue(&queue).await?;
        Ok(KickOutcome {
            wing_dissolved: dissolved,
        })
    }

    /// Empties the queue and all wings, logging every queue entry.
    pub async fn clear_all(&self) -> Result<(), QueueServiceError> {
        let _guard = self.lock.lock().await;
        let queue = self.store.load_queue().await?;
        let now = Utc::now();

        let records = queue
            .iter()
            .map(|e| HistoryRecord::for_entry(e, HistoryStatus::AdminCleared, now))
            .collect();
        self.append_history(records).await?;
        self.store.save_queue(&[]).await?;
        self.store.save_wings(&[]).await?;
        Ok(())
    }

    pub async fn history(&self) -> Result<Vec<HistoryRecord>, QueueServiceError> {
        let _guard = self.lock.lock().await;
        Ok(self.store.load_history().await?)
    }

    pub async fn clear_history(&self) -> Result<(), QueueServiceError> {
        let _guard = self.lock.lock().await;
        self.store.save_history(&[]).await?;
        Ok(())
    }

    pub async fn export(&self) -> Result<ExportData, QueueServiceError> {
        let _guard = self.lock.lock().await;
        Ok(ExportData {
            queue: self.store.load_queue().await?,
            wings: self.store.load_wings().await?,
            history: self.store.load_history().await?,
        })
    }

    pub async fn import(&self, data: &ImportData) -> Result<ImportSummary, QueueServiceError> {
        let _guard = self.lock.lock().await;
        if let Some(queue) = &data.queue {
            self.store.save_queue(queue).await?;
        }
        if let Some(wings) = &data.wings {
            self.store.save_wings(wings).await?;
        }
        if let Some(history) = &data.history {
            let mut history = history.clone();
            truncate_history(&mut history, self.config.history_limit);
            self.store.save_history(&history).await?;
        }
        Ok(ImportSummary {
            queue: self.store.load_queue().await?.len(),
            wings: self.store.load_wings().await?.len(),
        })
    }

    // ---- Internals (caller holds the lock) ----

    /// Expiry sweep: drops invalid entries, logging each removal. Persists
    /// only when something was dropped, so a repeat run at the same instant
    /// is a no-op.
    async fn sweep_expired(
        &self,
        queue: &mut Vec<QueueEntry>,
        now: DateTime<Utc>,
    ) -> Result<(), QueueServiceError> {
        let expiry = self.config.expiry();
        let (valid, expired): (Vec<_>, Vec<_>) = queue
            .drain(..)
            .partition(|e| is_entry_valid(e, now, expiry));
        *queue = valid;

        if expired.is_empty() {
            return Ok(());
        }
        for entry in &expired {
            info!("entry for CMDR {} expired", entry.cmdr);
        }
        let records = expired
            .iter()
            .map(|e| HistoryRecord::for_entry(e, HistoryStatus::Expired, now))
            .collect();
        self.append_history(records).await?;
        self.store.save_queue(queue).await?;
        Ok(())
    }

    /// One matcher pass: visits each system once and forms at most one wing
    /// per system. A second eligible group in the same system waits for the
    /// next triggering event.
    async fn form_wings(
        &self,
        queue: &mut Vec<QueueEntry>,
        now: DateTime<Utc>,
    ) -> Result<(), QueueServiceError> {
        let grace = self.config.grace();
        let mut formed = Vec::new();
        let mut records = Vec::new();

        for system in matching::queue_systems(queue) {
            if let Some(members) = matching::find_formable_wing(queue, &system, now, grace) {
                let member_ids: HashSet<String> = members.iter().map(|m| m.id.clone()).collect();
                records.extend(
                    members
                        .iter()
                        .map(|m| HistoryRecord::for_entry(m, HistoryStatus::WingFormed, now)),
                );
                let wing = Wing::new(&system, members, now);
                info!("wing {} formed in {}", wing.id, wing.system);
                queue.retain(|e| !member_ids.contains(&e.id));
                formed.push(wing);
            }
        }

        if formed.is_empty() {
            return Ok(());
        }
        let mut wings = self.store.load_wings().await?;
        wings.extend(formed);
        self.store.save_wings(&wings).await?;
        self.append_history(records).await?;
        self.store.save_queue(queue).await?;
        Ok(())
    }

    async fn remove_entry_locked(
        &self,
        entry_id: &str,
        status: HistoryStatus,
    ) -> Result<(), QueueServiceError> {
        let mut queue = self.store.load_queue().await?;
        let position = queue
            .iter()
            .position(|e| e.id == entry_id)
            .ok_or(QueueServiceError::EntryNotFound)?;
        let removed = queue.remove(position);

        self.append_history(vec![HistoryRecord::for_entry(&removed, status, Utc::now())])
            .await?;
        self.store.save_queue(&queue).await?;
        Ok(())
    }

    async fn append_history(
        &self,
        records: Vec<HistoryRecord>,
    ) -> Result<(), QueueServiceError> {
        if records.is_empty() {
            return Ok(());
        }
        let mut history = self.store.load_history().await?;
        history.extend(records);
        truncate_history(&mut history, self.config.history_limit);
        self.store.save_history(&history).await?;
        Ok(())
    }
}

/// Reset a member for the back of the queue after a kick or dissolution.
fn requeue_member(member: &mut QueueEntry, now: DateTime<Utc>) {
    member.ready_up = false;
    member.ready_up_time = None;
    member.ready_since = Some(now);
}

/// Keeps the most recent `limit` records.
fn truncate_history(history: &mut Vec<HistoryRecord>, limit: usize) {
    if history.len() > limit {
        let excess = history.len() - limit;
        history.drain(..excess);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::store::tests::MemoryStore;

    fn service(store: Arc<MemoryStore>) -> QueueService {
        QueueService::new(store, QueueConfig::default())
    }

    fn join_request(cmdr: &str, system: &str) -> JoinQueueRequest {
        JoinQueueRequest {
            cmdr: cmdr.to_string(),
            system: system.to_string(),
            ..JoinQueueRequest::default()
        }
    }

    fn ready_entry(cmdr: &str, system: &str, ready_since: DateTime<Utc>) -> QueueEntry {
        let mut entry = QueueEntry::new(&join_request(cmdr, system), ready_since);
        entry.status = "ready".to_string();
        entry.ready_up = true;
        entry.ready_since = Some(ready_since);
        entry
    }

    #[tokio::test]
    async fn join_rejects_blank_cmdr() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let result = service.join_queue(&join_request("   ", "Anana")).await;
        assert!(matches!(result, Err(QueueServiceError::ValidationError(_))));
        assert!(store.queue.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn join_clamps_credits_and_persists() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let mut request = join_request("Jameson", "Anana");
        request.credits = 5000;
        let entry = service.join_queue(&request).await.unwrap();

        assert_eq!(entry.credits, 999);
        let stored = store.queue.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].credits, 999);
    }

    #[tokio::test]
    async fn join_surfaces_store_failure_without_side_effects() {
        let store = Arc::new(MemoryStore::new());
        store.set_fail_saves(true);
        let service = service(store.clone());

        let result = service.join_queue(&join_request("Jameson", "Anana")).await;
        assert!(matches!(result, Err(QueueServiceError::StoreError(_))));
        assert!(store.queue.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn update_clamps_credits_and_stamps_ready_since_on_transition() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let mut request = join_request("Jameson", "Anana");
        request.status = "waiting".to_string();
        let entry = service.join_queue(&request).await.unwrap();
        let created_ready_since = entry.ready_since;

        let before = Utc::now();
        let updated = service
            .update_entry(
                &entry.id,
                &UpdateEntryRequest {
                    status: Some("ready".to_string()),
                    credits: Some(123_456),
                    ..UpdateEntryRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.credits, 999);
        assert_eq!(updated.status, "ready");
        assert!(updated.ready_since.unwrap() >= before);
        assert_ne!(updated.ready_since, created_ready_since);
    }

    #[tokio::test]
    async fn update_keeps_ready_since_when_not_transitioning() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let entry = service
            .join_queue(&join_request("Jameson", "Anana"))
            .await
            .unwrap();
        let original = entry.ready_since;

        // status stays "ready"; no transition, no restamp.
        let updated = service
            .update_entry(
                &entry.id,
                &UpdateEntryRequest {
                    credits: Some(10),
                    ..UpdateEntryRequest::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.ready_since, original);
    }

    #[tokio::test]
    async fn update_unknown_entry_is_not_found() {
        let service = service(Arc::new(MemoryStore::new()));
        let result = service
            .update_entry("missing", &UpdateEntryRequest::default())
            .await;
        assert!(matches!(result, Err(QueueServiceError::EntryNotFound)));
    }

    #[tokio::test]
    async fn remove_logs_a_left_record() {
        let store = Arc::new(MemoryStore::new());
        let service = service(store.clone());

        let entry = service
            .join_queue(&join_request("Jameson", "Anana"))
            .await
            .unwrap();
        service.remove_entry(&entry.id).await.unwrap();

        assert!(store.queue.lock().unwrap().is_empty());
        let history = store.history.lock().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, HistoryStatus::Left);
        assert_eq!(history[0].original_id, entry.id);
    }

    #[tokio::test]
    async fn ready_up_forms_a_wing_of_four() {
        let base = Utc::now() - Duration::minutes(30);
        let entries = vec![
            ready_entry("A", "Anana", base),
            ready_entry("B", "Anana", base + Duration::minutes(1)),
            ready_entry("C", "Anana", base + Duration::minutes(2)),
            {
                let mut e = ready_entry("D", "Anana", base + Duration::minutes(3));
                e.ready_up = false;
                e
            },
        ];
        let last_id = entries[3].id.clone();
        let ids: Vec<String> = entries.iter().map(|e| e.id.clone()).collect();
        let store = Arc::new(MemoryStore::new().with_queue(entries));
        let service = service(store.clone());

        service.ready_up(&last_id).await.unwrap();

        let queue = store.queue.lock().unwrap();
        assert!(queue.is_empty());
        let wings = store.wings.lock().unwrap();
        assert_eq!(wings.len(), 1);
        assert_eq!(wings[0].system, "anana");
        assert_eq!(wings[0].members.len(), 4);
        let member_ids: Vec<String> = wings[0].members.iter().map(|m| m.id.clone()).collect();
        assert_eq!(member_ids, ids);

        let history = store.history.lock().unwrap();
        assert_eq!(history.len(), 4);
        assert!(history.iter().all(|r| r.status == HistoryStatus::WingFormed));
    }

    #[tokio::test]
    async fn five_ready_cmdrs_form_one_wing_of_the_earliest_four() {
        let base = Utc::now() - Duration::minutes(30);
        let mut entries: Vec<QueueEntry> = ["A", "B", "C", "D", "E"]
            .iter()
            .enumerate()
            .map(|(i, cmdr)| ready_entry(cmdr, "Anana", base + Duration::minutes(i as i64)))
            .collect();
        entries[0].ready_up = false;
        let first_id = entries[0].id.clone();
        let latest_id = entries[4].id.clone();
        let store = Arc::new(MemoryStore::new().with_queue(entries));
        let service = service(store.clone());

        service.ready_up(&first_id).await.unwrap();

        let queue = store.queue.lock().unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, latest_id);
        let wings = store.wings.lock().unwrap();
        assert_eq!(wings.len(), 1);
        assert_eq!(wings[0].members.len(), 4);
        assert!(wings[0].members.iter().all(|m| m.id != latest_id));
    }

    #[tokio::test]
    async fn three_ready_cmdrs_form_nothing() {
        let base = Utc::now() - Duration::minutes(30);
        let entries = vec![
            ready_entry("A", "Anana", base),
            ready_entry("B", "Anana", base),
            ready_entry("C", "Anana", base),
        ];
        let id = entries[0].id.clone();
        let store = Arc::new(MemoryStore::new().with_queue(entries));
        let service = service(store.clone());

        service.ready_up(&id).await.unwrap();

        assert_eq!(store.queue.lock().unwrap().len(), 3);
        assert!(store.wings.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn one_pass_forms_wings_in_independent_systems() {
        let base = Utc::now() - Duration::minutes(30);
        let mut entries = Vec::new();
        for cmdr in ["A", "B", "C", "D"] {
            entries.push(ready_entry(cmdr, "Anana", base));
        }
        for cmdr in ["E", "F", "G", "H"] {
            entries.push(ready_entry(cmdr, "Wolf 359", base));
        }
        let id = entries[0].id.clone();
        let store = Arc::new(MemoryStore::new().with_queue(entries));
        let service = service(store.clone());

        service.ready_up(&id).await.unwrap();

        assert!(store.queue.lock().unwrap().is_empty());
        let wings = store.wings.lock().unwrap();
        assert_eq!(wings.len(), 2);
        let systems: Vec<&str> = wings.iter().map(|w| w.system.as_str()).collect();
        assert!(systems.contains(&"anana"));
        assert!(systems.contains(&"wolf 359"));
    }

    #[tokio::test]
    async fn expired_entries_are_swept_and_logged_once() {
        let now = Utc::now();
        let fresh = ready_entry("Fresh", "Anana", now - Duration::hours(1));
        let stale = ready_entry("Stale", "Anana", now - Duration::hours(48));
        let store = Arc::new(MemoryStore::new().with_queue(vec![fresh.clone(), stale.clone()]));
        let service = service(store.clone());

        let queue = service.get_queue().await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].id, fresh.id);
        {
            let history = store.history.lock().unwrap();
            assert_eq!(history.len(), 1);
            assert_eq!(history[0].status, HistoryStatus::Expired);
            assert_eq!(history[0].original_id, stale.id);
        }

        // Second sweep with no time elapsed is a no-op.
        let queue = service.get_queue().await.unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(store.history.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear_all_logs_each_entry_and_empties_both_collections() {
        let base = Utc::now() - Duration::minutes(10);
        let entries = vec![
            ready_entry("A", "Anana", base),
            ready_entry("B", "Anana", base),
        ];
        let wing = Wing::new("anana", vec![ready_entry("C", "Anana", base)], base);
        let store = Arc::new(
            MemoryStore::new()
                .with_queue(entries)
                .with_wings(vec![wing]),
        );
        let service = service(store.clone());

        service.clear_all().await.unwrap();

        assert!(store.queue.lock().unwrap().is_empty());
        assert!(store.wings.lock().unwrap().is_empty());
        let history = store.history.lock().unwrap();
        assert_eq!(history.len(), 2);
        assert!(history.iter().all(|r| r.status == HistoryStatus::AdminCleared));
    }

    #[tokio::test]
    async fn kick_dissolves_a_four_member_wing_and_requeues_everyone() {
        let base = Utc::now() - Duration::minutes(30);
        let members: Vec<QueueEntry> = ["A", "B", "C", "D"]
            .iter()
            .map(|cmdr| ready_entry(cmdr, "Anana", base))
            .collect();
        let kicked_id = members[1].id.clone();
        let wing = Wing::new("anana", members, base);
        let wing_id = wing.id.clone();
        let store = Arc::new(MemoryStore::new().with_wings(vec![wing]));
        let service = service(store.clone());

        let outcome = service.kick_from_wing(&wing_id, &kicked_id).await.unwrap();
        assert!(outcome.wing_dissolved);

        assert!(store.wings.lock().unwrap().is_empty());
        let queue = store.queue.lock().unwrap();
        assert_eq!(queue.len(), 4);
        // Kicked member lands first, remaining members follow.
        assert_eq!(queue[0].id, kicked_id);
        for entry in queue.iter() {
            assert!(!entry.ready_up);
            assert_eq!(entry.ready_up_time, None);
            assert!(entry.ready_since.unwrap() > base);
        }

        let history = store.history.lock().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].status, HistoryStatus::AdminKicked);
        assert_eq!(history[0].original_id, kicked_id);
    }

    #[tokio::test]
    async fn kick_from_an_oversized_wing_keeps_it_alive() {
        // Five-member wings can only exist via admin import.
        let base = Utc::now() - Duration::minutes(30);
        let members: Vec<QueueEntry> = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|cmdr| ready_entry(cmdr, "Anana", base))
            .collect();
        let kicked_id = members[4].id.clone();
        let wing = Wing::new("anana", members, base);
        let wing_id = wing.id.clone();
        let store = Arc::new(MemoryStore::new().with_wings(vec![wing]));
        let service = service(store.clone());

        let outcome = service.kick_from_wing(&wing_id, &kicked_id).await.unwrap();
        assert!(!outcome.wing_dissolved);

        let wings = store.wings.lock().unwrap();
        assert_eq!(wings.len(), 1);
        assert_eq!(wings[0].members.len(), 4);
        assert_eq!(store.queue.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn kick_unknown_member_is_reported() {
        let base = Utc::now();
        let wing = Wing::new("anana", vec![ready_entry("A", "Anana", base)], base);
        let wing_id = wing.id.clone();
        let store = Arc::new(MemoryStore::new().with_wings(vec![wing]));
        let service = service(store.clone());

        let result = service.kick_from_wing(&wing_id, "missing").await;
        assert!(matches!(result, Err(QueueServiceError::MemberNotFound)));
        let result = service.kick_from_wing("missing", "missing").await;
        assert!(matches!(result, Err(QueueServiceError::WingNotFound)));
    }

    #[tokio::test]
    async fn complete_wing_removes_it() {
        let base = Utc::now();
        let wing = Wing::new("anana", Vec::new(), base);
        let wing_id = wing.id.clone();
        let store = Arc::new(MemoryStore::new().with_wings(vec![wing]));
        let service = service(store.clone());

        service.complete_wing(&wing_id).await.unwrap();
        assert!(store.wings.lock().unwrap().is_empty());

        let result = service.complete_wing(&wing_id).await;
        assert!(matches!(result, Err(QueueServiceError::WingNotFound)));
    }

    #[tokio::test]
    async fn history_is_capped_at_the_configured_limit() {
        let store = Arc::new(MemoryStore::new());
        let service = QueueService::new(
            store.clone(),
            QueueConfig {
                history_limit: 3,
                ..QueueConfig::default()
            },
        );

        for i in 0..5 {
            let entry = service
                .join_queue(&join_request(&format!("CMDR{}", i), "Anana"))
                .await
                .unwrap();
            service.remove_entry(&entry.id).await.unwrap();
        }

        let history = store.history.lock().unwrap();
        assert_eq!(history.len(), 3);
        // Newest three retained.
        assert_eq!(history[0].cmdr, "CMDR2");
        assert_eq!(history[2].cmdr, "CMDR4");
    }

    #[tokio::test]
    async fn import_replaces_collections_and_caps_history() {
        let base = Utc::now();
        let store = Arc::new(MemoryStore::new());
        let service = QueueService::new(
            store.clone(),
            QueueConfig {
                history_limit: 2,
                ..QueueConfig::default()
            },
        );

        let entry = ready_entry("A", "Anana", base);
        let records: Vec<HistoryRecord> = (0..4)
            .map(|_| HistoryRecord::for_entry(&entry, HistoryStatus::Left, base))
            .collect();
        let summary = service
            .import(&ImportData {
                queue: Some(vec![entry.clone()]),
                wings: None,
                history: Some(records),
            })
            .await
            .unwrap();

        assert_eq!(summary.queue, 1);
        assert_eq!(summary.wings, 0);
        assert_eq!(store.history.lock().unwrap().len(), 2);
    }
}
