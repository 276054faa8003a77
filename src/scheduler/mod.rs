//! Periodic host sampling.

pub mod tasks;

use std::sync::Arc;
use std::time::Duration;

use tokio::signal;
use tokio::time::interval;
use tracing::info;

use crate::core::metrics::gauge_registry::GaugeRegistry;
use tasks::sampler::HostSampler;

/// Samples forever at the configured interval. The first tick fires
/// immediately so the gauges carry values before the first scrape.
pub async fn run(gauges: Arc<GaugeRegistry>, interval_secs: u64) {
    let mut sampler = HostSampler::new(gauges);
    let mut tick = interval(Duration::from_secs(interval_secs.max(1)));

    info!(interval_secs, "Host sampler started");

    loop {
        tokio::select! {
            _ = tick.tick() => sampler.collect(),
            _ = signal::ctrl_c() => {
                info!("Host sampler shutting down");
                break;
            }
        }
    }
}
