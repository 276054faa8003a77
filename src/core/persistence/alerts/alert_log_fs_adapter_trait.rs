use anyhow::Result;
use serde_json::Value;

/// Filesystem-level contract for the append-only alert sink.
pub trait AlertLogFsAdapterTrait {
    fn append(&self, entry: &Value) -> Result<()>;
}
