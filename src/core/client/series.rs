use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::AppError;

/// One backend data point. Order within a series follows the backend's
/// response and is never re-sorted here.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub time: DateTime<Utc>,
    pub value: f64,
}

/// Outcome of a range fetch. `Empty` means the window held zero data points,
/// which is not the same thing as a series whose points are all zero.
#[derive(Debug, Clone, PartialEq)]
pub enum SeriesResult {
    Data(Vec<Sample>),
    Empty,
}

/// Range-query abstraction over the time-series backend.
#[async_trait]
pub trait SeriesBackend: Send + Sync {
    async fn fetch_range(
        &self,
        resource: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SeriesResult, AppError>;
}
