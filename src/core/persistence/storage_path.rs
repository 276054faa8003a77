use std::env;
use std::path::PathBuf;

/// Append-only file the alert sink writes to.
pub fn alert_log_path() -> PathBuf {
    env::var("HOSTMON_ALERT_LOG")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("alert.log"))
}
