pub mod dynamo_store;
pub mod file_store;
pub mod store;
