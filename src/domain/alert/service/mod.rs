pub mod alert_log_service;
