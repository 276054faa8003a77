//! Environment-backed runtime settings. Every knob has a coded default so
//! the service boots with nothing but a Prometheus instance next to it.

use std::env;
use std::path::PathBuf;

/// Port of the query API (averaged/raw usage + alert sink).
pub fn http_port() -> u16 {
    env_parsed("HOSTMON_HTTP_PORT", 5000)
}

/// Port the gauge exposition listener binds, scraped by the backend.
pub fn exposition_port() -> u16 {
    env_parsed("HOSTMON_EXPOSITION_PORT", 8080)
}

/// Base URL of the Prometheus-compatible backend answering range queries.
pub fn backend_url() -> String {
    env::var("HOSTMON_BACKEND_URL").unwrap_or_else(|_| "http://localhost:9090".to_string())
}

/// Seconds between host samples.
pub fn sample_interval_secs() -> u64 {
    env_parsed("HOSTMON_SAMPLE_INTERVAL_SECS", 5)
}

/// Directory the rolling log files are written to.
pub fn log_dir() -> PathBuf {
    env::var("HOSTMON_LOG_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("logs"))
}

fn env_parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
