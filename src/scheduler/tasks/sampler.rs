use std::path::Path;
use std::sync::Arc;

use sysinfo::{Disks, System};
use tracing::debug;

use crate::core::metrics::gauge_registry::GaugeRegistry;

/// Reads host CPU, memory and disk usage and pushes each reading into the
/// shared gauges. CPU usage is computed from the delta since the previous
/// refresh, so `new` takes a warm-up reading.
pub struct HostSampler {
    system: System,
    disks: Disks,
    gauges: Arc<GaugeRegistry>,
}

impl HostSampler {
    pub fn new(gauges: Arc<GaugeRegistry>) -> Self {
        let mut system = System::new();
        system.refresh_cpu_all();

        Self {
            system,
            disks: Disks::new_with_refreshed_list(),
            gauges,
        }
    }

    pub fn collect(&mut self) {
        let cpu = self.cpu_usage();
        let memory = self.memory_usage();
        let disk = self.disk_usage();

        self.gauges.set("gauge_cpu_usage", "CPU", cpu);
        self.gauges.set("gauge_mem_usage", "Memory", memory);
        self.gauges.set("gauge_disk_usage", "Disk", disk);

        debug!(cpu, memory, disk, "Sampled host usage");
    }

    fn cpu_usage(&mut self) -> f64 {
        self.system.refresh_cpu_all();
        self.system.global_cpu_usage() as f64
    }

    fn memory_usage(&mut self) -> f64 {
        self.system.refresh_memory();

        let total = self.system.total_memory();
        if total == 0 {
            return 0.0;
        }
        (self.system.used_memory() as f64 / total as f64) * 100.0
    }

    // Root filesystem usage, falling back to the first listed disk.
    fn disk_usage(&mut self) -> f64 {
        self.disks.refresh(true);

        let disk = self
            .disks
            .iter()
            .find(|d| d.mount_point() == Path::new("/"))
            .or_else(|| self.disks.iter().next());

        match disk {
            Some(disk) => {
                let total = disk.total_space();
                if total == 0 {
                    return 0.0;
                }
                let used = total.saturating_sub(disk.available_space());
                (used as f64 / total as f64) * 100.0
            }
            None => 0.0,
        }
    }
}
