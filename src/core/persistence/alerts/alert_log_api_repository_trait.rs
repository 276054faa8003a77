use anyhow::Result;
use serde_json::Value;

use super::alert_log_fs_adapter_trait::AlertLogFsAdapterTrait;

pub trait AlertLogApiRepository {
    fn fs_adapter(&self) -> &dyn AlertLogFsAdapterTrait;

    fn append(&self, entry: &Value) -> Result<()> {
        self.fs_adapter().append(entry)
    }
}
