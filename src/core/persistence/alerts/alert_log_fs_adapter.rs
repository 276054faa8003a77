use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::core::persistence::storage_path::alert_log_path;

use super::alert_log_fs_adapter_trait::AlertLogFsAdapterTrait;

/// FS adapter for the alert sink.
///
/// Every received payload becomes one JSON line appended to the alert log;
/// nothing ever rewrites or truncates the file.
pub struct AlertLogFsAdapter;

impl AlertLogFsAdapter {
    pub fn new() -> Self {
        Self {}
    }

    fn append_to(&self, path: &Path, entry: &Value) -> Result<()> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir).context("Failed to create alert log directory")?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .context("Failed to open alert log")?;

        let line = serde_json::to_string(entry).context("Failed to serialize alert payload")?;
        writeln!(file, "{line}").context("Failed to append alert")?;
        file.flush().context("Failed to flush alert log")?;

        Ok(())
    }
}

impl AlertLogFsAdapterTrait for AlertLogFsAdapter {
    fn append(&self, entry: &Value) -> Result<()> {
        self.append_to(&alert_log_path(), entry)
    }
}
