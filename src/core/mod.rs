//! Infrastructure: outbound clients, gauge registry, persistence.

pub mod client;
pub mod metrics;
pub mod persistence;
