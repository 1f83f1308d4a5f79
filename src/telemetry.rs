//! Telemetry Module
//!
//! In-memory counters for lookups and address checks:
//! - Operational monitoring via GET /v1/stats
//! - A JSON snapshot exported on shutdown
//!
//! No request payloads are recorded, only counts and latency.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Aggregated statistics for reporting
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TelemetryStats {
    /// Lookups resolved (including value-level errors)
    pub lookups_total: u64,
    /// Lookups that resolved to an error message
    pub lookup_errors: u64,
    /// Combined address checks served
    pub checks_total: u64,
    /// Address checks where all three inputs were consistent
    pub checks_valid: u64,
    /// Average lookup latency (ms)
    pub avg_latency_ms: f64,
    /// Period start timestamp
    pub period_start: u64,
    /// Period end timestamp
    pub period_end: u64,
}

/// Main telemetry collector
pub struct TelemetryCollector {
    lookups_total: AtomicU64,
    lookup_errors: AtomicU64,
    checks_total: AtomicU64,
    checks_valid: AtomicU64,
    total_latency_ms: AtomicU64,
    /// Session start time
    session_start: u64,
    /// Export directory (created on first export)
    export_dir: PathBuf,
}

impl TelemetryCollector {
    /// Create new collector with the default export directory
    pub fn new() -> Self {
        Self::with_export_dir(PathBuf::from("./telemetry"))
    }

    /// Create collector with a custom export directory
    pub fn with_export_dir(export_dir: PathBuf) -> Self {
        Self {
            lookups_total: AtomicU64::new(0),
            lookup_errors: AtomicU64::new(0),
            checks_total: AtomicU64::new(0),
            checks_valid: AtomicU64::new(0),
            total_latency_ms: AtomicU64::new(0),
            session_start: current_timestamp(),
            export_dir,
        }
    }

    /// Record one resolved lookup
    pub fn record_lookup(&self, latency_ms: u64, is_error: bool) {
        self.lookups_total.fetch_add(1, Ordering::Relaxed);
        self.total_latency_ms
            .fetch_add(latency_ms, Ordering::Relaxed);
        if is_error {
            self.lookup_errors.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Record one combined address check
    pub fn record_check(&self, valid: bool) {
        self.checks_total.fetch_add(1, Ordering::Relaxed);
        if valid {
            self.checks_valid.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        let lookups_total = self.lookups_total.load(Ordering::Relaxed);
        let total_latency = self.total_latency_ms.load(Ordering::Relaxed);

        let avg_latency = if lookups_total > 0 {
            total_latency as f64 / lookups_total as f64
        } else {
            0.0
        };

        TelemetryStats {
            lookups_total,
            lookup_errors: self.lookup_errors.load(Ordering::Relaxed),
            checks_total: self.checks_total.load(Ordering::Relaxed),
            checks_valid: self.checks_valid.load(Ordering::Relaxed),
            avg_latency_ms: avg_latency,
            period_start: self.session_start,
            period_end: current_timestamp(),
        }
    }

    /// Export current stats to a JSON file
    pub fn export_stats_json(&self) -> Result<PathBuf, std::io::Error> {
        let stats = self.get_stats();
        fs::create_dir_all(&self.export_dir)?;
        let filename = format!("stats_{}.json", current_timestamp());
        let path = self.export_dir.join(filename);

        let json = serde_json::to_string_pretty(&stats)?;
        fs::write(&path, json)?;

        Ok(path)
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collector_basic() {
        let collector = TelemetryCollector::new();

        collector.record_lookup(10, false);
        collector.record_lookup(20, true);
        collector.record_check(true);
        collector.record_check(false);

        let stats = collector.get_stats();
        assert_eq!(stats.lookups_total, 2);
        assert_eq!(stats.lookup_errors, 1);
        assert_eq!(stats.checks_total, 2);
        assert_eq!(stats.checks_valid, 1);
        assert_eq!(stats.avg_latency_ms, 15.0);
    }

    #[test]
    fn test_empty_collector_has_zero_latency() {
        let collector = TelemetryCollector::new();
        let stats = collector.get_stats();
        assert_eq!(stats.lookups_total, 0);
        assert_eq!(stats.avg_latency_ms, 0.0);
    }

    #[test]
    fn test_stats_serialize() {
        let stats = TelemetryStats {
            lookups_total: 1000,
            lookup_errors: 50,
            checks_total: 400,
            checks_valid: 350,
            avg_latency_ms: 23.5,
            ..Default::default()
        };

        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("lookups_total"));
        assert!(json.contains("1000"));
    }
}
