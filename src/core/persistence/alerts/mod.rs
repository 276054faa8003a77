//! Alert log persistence (append-only JSON lines).

pub mod alert_log_api_repository_trait;
pub mod alert_log_fs_adapter;
pub mod alert_log_fs_adapter_trait;
pub mod alert_log_repository;
