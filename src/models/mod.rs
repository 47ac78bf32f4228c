pub mod admin;
pub mod history;
pub mod queue;
pub mod wing;
