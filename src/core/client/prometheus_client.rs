//! Range-query client for the Prometheus backend that scrapes our gauges.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use crate::config;
use crate::core::client::series::{Sample, SeriesBackend, SeriesResult};
use crate::errors::AppError;

/// Rolling-mean width applied by the backend before it returns points.
/// Matches the scrape cadence and is not caller-configurable.
const SMOOTHING_WINDOW: &str = "1m";

/// Resolution of the range query, aligned with the scrape interval.
const QUERY_STEP_SECONDS: u32 = 60;

pub struct PrometheusClient {
    base_url: String,
}

impl PrometheusClient {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }

    pub fn from_env() -> Self {
        Self::new(config::backend_url())
    }
}

#[async_trait]
impl SeriesBackend for PrometheusClient {
    async fn fetch_range(
        &self,
        resource: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<SeriesResult, AppError> {
        let url = format!("{}/api/v1/query_range", self.base_url.trim_end_matches('/'));
        let query = build_range_query(resource);
        let start_ts = start.timestamp().to_string();
        let end_ts = end.timestamp().to_string();
        let step = QUERY_STEP_SECONDS.to_string();

        let client = Client::builder().build().map_err(|e| {
            warn!(error = %e, "Failed to build backend HTTP client");
            transport_error()
        })?;

        let resp = client
            .get(&url)
            .query(&[
                ("query", query.as_str()),
                ("start", start_ts.as_str()),
                ("end", end_ts.as_str()),
                ("step", step.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(%url, error = %e, "Backend range query did not complete");
                transport_error()
            })?;

        let status = resp.status();
        if !status.is_success() {
            warn!(%url, %status, "Backend rejected range query");
            return Err(query_failed());
        }

        let body: Value = resp.json().await.map_err(|e| {
            warn!(%url, error = %e, "Backend returned an undecodable body");
            transport_error()
        })?;

        parse_query_response(&body)
    }
}

/// `avg_over_time` of the gauge published for `resource`.
fn build_range_query(resource: &str) -> String {
    format!("avg_over_time(gauge_{}_usage[{}])", resource, SMOOTHING_WINDOW)
}

/// Pick the series the rest of the pipeline consumes when the backend matched
/// more than one. Policy: always the first; series are never aggregated here.
fn select_series(result: &[Value]) -> Option<&Value> {
    result.first()
}

/// Normalize a decoded query_range envelope into samples.
fn parse_query_response(body: &Value) -> Result<SeriesResult, AppError> {
    if body.get("status").and_then(Value::as_str) != Some("success") {
        return Err(query_failed());
    }

    let result = body
        .pointer("/data/result")
        .and_then(Value::as_array)
        .ok_or_else(transport_error)?;

    let series = match select_series(result) {
        Some(series) => series,
        None => return Ok(SeriesResult::Empty),
    };

    let values = series
        .get("values")
        .and_then(Value::as_array)
        .ok_or_else(transport_error)?;

    let mut samples = Vec::with_capacity(values.len());
    for pair in values {
        samples.push(parse_sample(pair)?);
    }

    if samples.is_empty() {
        // A matched series without points still means the window held no data.
        return Ok(SeriesResult::Empty);
    }

    Ok(SeriesResult::Data(samples))
}

fn parse_sample(pair: &Value) -> Result<Sample, AppError> {
    let ts = pair.get(0).and_then(Value::as_f64).ok_or_else(transport_error)?;
    let raw = pair.get(1).and_then(Value::as_str).ok_or_else(transport_error)?;

    let time = DateTime::from_timestamp(ts as i64, 0).ok_or_else(transport_error)?;
    let value = raw.parse::<f64>().map_err(|_| transport_error())?;

    Ok(Sample { time, value })
}

fn query_failed() -> AppError {
    AppError::BackendError("query failed".to_string())
}

fn transport_error() -> AppError {
    AppError::BackendError("transport or protocol error".to_string())
}
