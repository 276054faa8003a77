//! Usage API DTOs

use serde::Deserialize;

#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct UsageQuery {
    pub start: Option<String>,
    pub end: Option<String>,
    pub range: Option<i64>, // hours
    pub resource: Option<String>, // "cpu", "mem" or "disk"
}
