pub mod admin;
pub mod health;
pub mod queue;
pub mod wings;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        SuccessResponse { success: true }
    }
}
