//! File-backed persistence.

pub mod alerts;
pub mod storage_path;
