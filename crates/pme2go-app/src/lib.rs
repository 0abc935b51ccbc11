pub mod app;
pub mod error;
pub mod storage_handler;
