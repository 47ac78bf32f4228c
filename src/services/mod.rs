pub mod admin_service;
pub mod errors;
pub mod matching;
pub mod queue_service;
pub mod time_window;
