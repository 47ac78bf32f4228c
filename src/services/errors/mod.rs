pub mod admin_service_errors;
pub mod queue_service_errors;
