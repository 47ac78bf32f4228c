use std::sync::Arc;

use crate::services::admin_service::AdminService;
use crate::services::queue_service::QueueService;

#[derive(Clone)]
pub struct AppState {
    pub queue_service: Arc<QueueService>,
    pub admin_service: Arc<AdminService>,
}
