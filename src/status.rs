//! Health report and sitemap, both derived from the loaded catalog.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::rooms::RoomCatalog;

#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub version: &'static str,
    pub environment: String,
    pub uptime: f64,
    pub memory: MemoryUsage,
    pub rooms: RoomCounts,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoryUsage {
    /// Resident set size, when the platform exposes it.
    pub resident_bytes: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomCounts {
    pub total: usize,
    pub levels: LevelCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub level1: usize,
    pub level2: usize,
    pub level3: usize,
}

impl RoomCounts {
    pub fn from_catalog(catalog: &RoomCatalog) -> Self {
        let [level1, level2, level3] = catalog.level_counts();
        RoomCounts {
            total: catalog.len(),
            levels: LevelCounts {
                level1,
                level2,
                level3,
            },
        }
    }
}

impl HealthReport {
    pub fn new(catalog: &RoomCatalog, environment: &str, uptime: Duration) -> Self {
        HealthReport {
            status: "healthy",
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION"),
            environment: environment.to_string(),
            uptime: uptime.as_secs_f64(),
            memory: MemoryUsage {
                resident_bytes: resident_bytes(),
            },
            rooms: RoomCounts::from_catalog(catalog),
        }
    }
}

#[cfg(target_os = "linux")]
fn resident_bytes() -> Option<u64> {
    let status = std::fs::read_to_string("/proc/self/status").ok()?;
    let line = status.lines().find(|l| l.starts_with("VmRSS:"))?;
    let kb: u64 = line.split_whitespace().nth(1)?.parse().ok()?;
    Some(kb * 1024)
}

#[cfg(not(target_os = "linux"))]
fn resident_bytes() -> Option<u64> {
    None
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: DateTime<Utc>,
    pub change_frequency: &'static str,
    pub priority: f32,
}

/// The entry terminal first, then one low-priority entry per room.
pub fn sitemap(catalog: &RoomCatalog, base_url: &str) -> Vec<SitemapEntry> {
    let base_url = base_url.trim_end_matches('/');
    let now = Utc::now();

    let mut entries = vec![SitemapEntry {
        url: base_url.to_string(),
        last_modified: now,
        change_frequency: "weekly",
        priority: 1.0,
    }];

    // Rooms need a passcode to reach, so they rank low
    entries.extend(catalog.rooms().iter().map(|room| SitemapEntry {
        url: format!("{base_url}/room?passcode={}", room.code),
        last_modified: now,
        change_frequency: "monthly",
        priority: 0.3,
    }));

    entries
}
