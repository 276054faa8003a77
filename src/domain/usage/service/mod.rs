//! Usage query orchestration: validate, resolve the window, fetch, aggregate.

use serde_json::{json, Map, Value};

use crate::api::dto::usage_dto::UsageQuery;
use crate::core::client::prometheus_client::PrometheusClient;
use crate::core::client::series::{Sample, SeriesBackend, SeriesResult};
use crate::domain::usage::aggregate::{as_points, average};
use crate::domain::usage::window::resolve_time_window;
use crate::errors::AppError;

pub async fn get_avg_usage(q: UsageQuery) -> Result<Value, AppError> {
    get_avg_usage_with_backend(&PrometheusClient::from_env(), q).await
}

pub async fn get_metrics_usage(q: UsageQuery) -> Result<Value, AppError> {
    get_metrics_usage_with_backend(&PrometheusClient::from_env(), q).await
}

async fn get_avg_usage_with_backend<B: SeriesBackend>(
    backend: &B,
    q: UsageQuery,
) -> Result<Value, AppError> {
    let resource = require_resource(&q)?;
    let samples = fetch_samples(backend, &resource, &q).await?;

    Ok(json!({ (format!("average_{resource}_usage")): average(&samples) }))
}

async fn get_metrics_usage_with_backend<B: SeriesBackend>(
    backend: &B,
    q: UsageQuery,
) -> Result<Value, AppError> {
    let resource = require_resource(&q)?;
    let samples = fetch_samples(backend, &resource, &q).await?;

    let points: Vec<Value> = as_points(&samples)
        .into_iter()
        .map(|(time, value)| {
            let mut point = Map::new();
            point.insert(time, json!(value));
            Value::Object(point)
        })
        .collect();

    Ok(json!({ (format!("{resource}_usage")): points }))
}

// The resource check runs before window resolution so a missing selector
// wins over bad time parameters. Whitespace-only selectors are treated as
// missing rather than forwarded into the backend expression.
fn require_resource(q: &UsageQuery) -> Result<String, AppError> {
    q.resource
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(String::from)
        .ok_or_else(|| AppError::InvalidInput("resource type required".into()))
}

async fn fetch_samples<B: SeriesBackend>(
    backend: &B,
    resource: &str,
    q: &UsageQuery,
) -> Result<Vec<Sample>, AppError> {
    let window = resolve_time_window(q)?;

    match backend.fetch_range(resource, window.start, window.end).await? {
        SeriesResult::Data(samples) => Ok(samples),
        SeriesResult::Empty => Err(AppError::NoData("no data in range".into())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, NaiveDateTime, Utc};
    use std::sync::Mutex;

    use crate::domain::usage::aggregate::POINT_TIME_FORMAT;

    struct MockBackend {
        seen: Mutex<Vec<String>>,
        samples: Vec<Sample>,
    }

    impl MockBackend {
        fn new(samples: Vec<Sample>) -> Self {
            Self {
                seen: Mutex::new(Vec::new()),
                samples,
            }
        }

        fn calls(&self) -> Vec<String> {
            self.seen.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SeriesBackend for MockBackend {
        async fn fetch_range(
            &self,
            resource: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<SeriesResult, AppError> {
            self.seen.lock().unwrap().push(resource.to_string());

            if self.samples.is_empty() {
                Ok(SeriesResult::Empty)
            } else {
                Ok(SeriesResult::Data(self.samples.clone()))
            }
        }
    }

    struct FailingBackend;

    #[async_trait]
    impl SeriesBackend for FailingBackend {
        async fn fetch_range(
            &self,
            _resource: &str,
            _start: DateTime<Utc>,
            _end: DateTime<Utc>,
        ) -> Result<SeriesResult, AppError> {
            Err(AppError::BackendError("query failed".into()))
        }
    }

    fn sample(ts: i64, value: f64) -> Sample {
        Sample {
            time: DateTime::from_timestamp(ts, 0).unwrap(),
            value,
        }
    }

    fn query(resource: Option<&str>) -> UsageQuery {
        UsageQuery {
            start: None,
            end: None,
            range: Some(1),
            resource: resource.map(String::from),
        }
    }

    #[tokio::test]
    async fn missing_resource_short_circuits_before_fetch() {
        let backend = MockBackend::new(vec![sample(0, 1.0)]);

        let err = get_avg_usage_with_backend(&backend, query(None))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid input: resource type required");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn blank_resource_counts_as_missing() {
        let backend = MockBackend::new(vec![sample(0, 1.0)]);

        let err = get_metrics_usage_with_backend(&backend, query(Some("   ")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid input: resource type required");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn invalid_window_skips_the_backend() {
        let backend = MockBackend::new(vec![sample(0, 1.0)]);
        let q = UsageQuery {
            start: Some("2024-07-27T15:00:00".into()),
            end: None,
            range: None,
            resource: Some("cpu".into()),
        };

        let err = get_avg_usage_with_backend(&backend, q).await.unwrap_err();

        assert_eq!(err.to_string(), "Invalid input: insufficient parameters");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn averaged_response_is_keyed_by_resource() {
        let backend = MockBackend::new(vec![sample(0, 10.0), sample(60, 20.0)]);

        let body = get_avg_usage_with_backend(&backend, query(Some("mem")))
            .await
            .unwrap();

        assert_eq!(body, json!({ "average_mem_usage": 15.0 }));
        assert_eq!(backend.calls(), vec!["mem".to_string()]);
    }

    #[tokio::test]
    async fn empty_window_is_no_data_for_average() {
        let backend = MockBackend::new(Vec::new());

        let err = get_avg_usage_with_backend(&backend, query(Some("cpu")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No data: no data in range");
    }

    #[tokio::test]
    async fn empty_window_is_no_data_for_points() {
        let backend = MockBackend::new(Vec::new());

        let err = get_metrics_usage_with_backend(&backend, query(Some("cpu")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "No data: no data in range");
    }

    #[tokio::test]
    async fn points_response_lists_single_entry_objects_in_order() {
        let backend = MockBackend::new(vec![sample(100, 1.5), sample(160, 2.5)]);

        let body = get_metrics_usage_with_backend(&backend, query(Some("disk")))
            .await
            .unwrap();

        let points = body["disk_usage"].as_array().unwrap();
        assert_eq!(points.len(), 2);

        let mut values = Vec::new();
        for point in points {
            let entry = point.as_object().unwrap();
            assert_eq!(entry.len(), 1);

            let (time, value) = entry.iter().next().unwrap();
            assert!(NaiveDateTime::parse_from_str(time, POINT_TIME_FORMAT).is_ok());
            values.push(value.as_f64().unwrap());
        }
        assert_eq!(values, vec![1.5, 2.5]);
    }

    #[tokio::test]
    async fn backend_failure_passes_through_unchanged() {
        let err = get_avg_usage_with_backend(&FailingBackend, query(Some("cpu")))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Backend error: query failed");
    }
}
