use std::collections::HashMap;

use anyhow::{Context, Result};
use prometheus::{GaugeVec, Opts, Registry, TextEncoder};
use tracing::warn;

/// Gauges the backend scrapes, keyed by metric name. The query layer's
/// `gauge_<resource>_usage` expressions resolve against these exact names.
const HOST_GAUGES: &[(&str, &str)] = &[
    ("gauge_cpu_usage", "System CPU Usage in percent"),
    ("gauge_mem_usage", "System Memory Usage in percent"),
    ("gauge_disk_usage", "System Disk Usage in percent"),
];

/// Owned set of labeled host gauges plus their exposition registry.
///
/// One instance is built at startup and handed to the sampler (writer) and
/// the exposition route (reader). Nothing in here is process-global.
pub struct GaugeRegistry {
    registry: Registry,
    gauges: HashMap<&'static str, GaugeVec>,
}

impl GaugeRegistry {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();
        let mut gauges = HashMap::new();

        for (name, help) in HOST_GAUGES {
            let gauge = GaugeVec::new(Opts::new(*name, *help), &["type"])
                .with_context(|| format!("Failed to declare gauge {name}"))?;
            registry
                .register(Box::new(gauge.clone()))
                .with_context(|| format!("Failed to register gauge {name}"))?;
            gauges.insert(*name, gauge);
        }

        Ok(Self { registry, gauges })
    }

    /// Latest-value write used by the sampler. Unknown names are dropped with
    /// a warning rather than growing the gauge set at runtime.
    pub fn set(&self, name: &str, label: &str, value: f64) {
        match self.gauges.get(name) {
            Some(gauge) => gauge.with_label_values(&[label]).set(value),
            None => warn!(name, "Ignoring write to undeclared gauge"),
        }
    }

    /// Snapshot of the current values in the text exposition format.
    pub fn render(&self) -> Result<String> {
        let mut buffer = String::new();
        let encoder = TextEncoder::new();
        encoder
            .encode_utf8(&self.registry.gather(), &mut buffer)
            .context("Failed to encode gauge snapshot")?;
        Ok(buffer)
    }
}
