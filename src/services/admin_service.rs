use std::sync::Arc;

use crate::models::admin::{AdminEditRequest, ExportData, ImportData};
use crate::models::history::HistoryRecord;
use crate::models::queue::QueueEntry;
use crate::services::errors::admin_service_errors::AdminServiceError;
use crate::services::queue_service::{ImportSummary, KickOutcome, QueueService};

/// Gate in front of the privileged operations: verifies the shared secret,
/// then delegates to the queue service. Verification happens before any
/// store access, so a bad password can never reveal which entries exist.
pub struct AdminService {
    queue_service: Arc<QueueService>,
    admin_password: String,
}

impl AdminService {
    pub fn new(queue_service: Arc<QueueService>, admin_password: String) -> Self {
        AdminService {
            queue_service,
            admin_password,
        }
    }

    fn verify(&self, password: &str) -> Result<(), AdminServiceError> {
        if constant_time_eq(password.as_bytes(), self.admin_password.as_bytes()) {
            Ok(())
        } else {
            Err(AdminServiceError::Unauthorized)
        }
    }

    pub async fn edit_entry(
        &self,
        password: &str,
        entry_id: &str,
        request: &AdminEditRequest,
    ) -> Result<QueueEntry, AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.admin_edit(entry_id, request).await?)
    }

    pub async fn delete_entry(
        &self,
        password: &str,
        entry_id: &str,
    ) -> Result<(), AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.admin_delete(entry_id).await?)
    }

    pub async fn force_ready(
        &self,
        password: &str,
        entry_id: &str,
    ) -> Result<QueueEntry, AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.force_ready(entry_id).await?)
    }

    pub async fn force_ready_up(
        &self,
        password: &str,
        entry_id: &str,
    ) -> Result<QueueEntry, AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.force_ready_up(entry_id).await?)
    }

    pub async fn kick_from_wing(
        &self,
        password: &str,
        wing_id: &str,
        entry_id: &str,
    ) -> Result<KickOutcome, AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.kick_from_wing(wing_id, entry_id).await?)
    }

    pub async fn clear_all(&self, password: &str) -> Result<(), AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.clear_all().await?)
    }

    pub async fn history(&self, password: &str) -> Result<Vec<HistoryRecord>, AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.history().await?)
    }

    pub async fn clear_history(&self, password: &str) -> Result<(), AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.clear_history().await?)
    }

    pub async fn export(&self, password: &str) -> Result<ExportData, AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.export().await?)
    }

    pub async fn import(
        &self,
        password: &str,
        data: &ImportData,
    ) -> Result<ImportSummary, AdminServiceError> {
        self.verify(password)?;
        Ok(self.queue_service.import(data).await?)
    }
}

/// Byte-wise comparison whose running time does not depend on where the
/// inputs first differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
