//! Outbound clients (time-series backend).

pub mod prometheus_client;
pub mod series;
