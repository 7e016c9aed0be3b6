//! Metric sampling using sysinfo: one `Sample` per call, never an error.

use crate::types::Sample;
use std::path::Path;
use std::time::Duration;
use sysinfo::{CpuRefreshKind, Disks, MemoryRefreshKind, RefreshKind, System};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::time::sleep;
use tracing::warn;

/// Window between the two CPU readings a utilization figure is derived
/// from. Independent of the publish tick.
const CPU_SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Holds persistent sysinfo handles so CPU deltas and disk lists are
/// refreshed in place instead of rebuilt every tick.
pub struct Sampler {
    sys: System,
    disks: Disks,
}

impl Sampler {
    pub fn new() -> Self {
        let refresh_kind = RefreshKind::nothing()
            .with_cpu(CpuRefreshKind::everything())
            .with_memory(MemoryRefreshKind::everything());
        let sys = System::new_with_specifics(refresh_kind);
        let disks = Disks::new_with_refreshed_list();
        Self { sys, disks }
    }

    /// Collect one sample. Every reading degrades to zero (empty string
    /// for `host`/`time`) on failure; this call itself cannot fail.
    ///
    /// Blocks the caller for `CPU_SAMPLE_WINDOW`: instantaneous CPU
    /// utilization needs two time-separated readings.
    pub async fn sample(&mut self) -> Sample {
        self.sys.refresh_cpu_usage();
        sleep(CPU_SAMPLE_WINDOW).await;
        self.sys.refresh_cpu_usage();
        let cpu = f64::from(self.sys.global_cpu_usage());

        self.sys.refresh_memory();
        let mem = used_percent(
            self.sys
                .total_memory()
                .saturating_sub(self.sys.available_memory()),
            self.sys.total_memory(),
        );

        // Keep disks that disappeared out of the list; the root mount is
        // all we report on.
        self.disks.refresh(false);
        let disk = match root_disk_percent(&self.disks) {
            Some(v) => v,
            None => {
                warn!("root filesystem not found in disk list, reporting 0");
                0.0
            }
        };

        let host = System::host_name().unwrap_or_default();

        Sample {
            cpu,
            mem,
            disk,
            host,
            time: rfc3339_utc_now(),
        }
    }
}

fn used_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    used as f64 / total as f64 * 100.0
}

fn root_disk_percent(disks: &Disks) -> Option<f64> {
    let root = disks
        .iter()
        .find(|d| d.mount_point() == Path::new("/"))?;
    let total = root.total_space();
    Some(used_percent(total.saturating_sub(root.available_space()), total))
}

/// Wall-clock capture time, truncated to whole seconds so the wire
/// format stays `2024-01-01T00:00:00Z` shaped.
fn rfc3339_utc_now() -> String {
    let now = OffsetDateTime::now_utc();
    now.replace_nanosecond(0)
        .unwrap_or(now)
        .format(&Rfc3339)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn sample_fields_stay_in_range() {
        let mut sampler = Sampler::new();
        let s = sampler.sample().await;
        assert!((0.0..=100.0).contains(&s.cpu), "cpu = {}", s.cpu);
        assert!((0.0..=100.0).contains(&s.mem), "mem = {}", s.mem);
        assert!((0.0..=100.0).contains(&s.disk), "disk = {}", s.disk);
    }

    #[tokio::test]
    async fn timestamp_is_rfc3339_with_second_precision() {
        let mut sampler = Sampler::new();
        let s = sampler.sample().await;
        let parsed = OffsetDateTime::parse(&s.time, &Rfc3339).expect("parse timestamp");
        assert_eq!(parsed.nanosecond(), 0);
        assert!(s.time.ends_with('Z'));
    }

    #[test]
    fn used_percent_handles_zero_total() {
        assert_eq!(used_percent(0, 0), 0.0);
        assert_eq!(used_percent(50, 200), 25.0);
    }
}
