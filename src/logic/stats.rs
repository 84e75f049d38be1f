//! Stats & Health View
//!
//! Monotonic pipeline counters plus the derived health snapshot served
//! to the monitoring portal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::DEGRADED_PENDING_THRESHOLD;

/// Running counters; only ever incremented.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Stats {
    pub scanned: u64,
    pub threats_detected: u64,
    pub auto_blocked: u64,
    pub manual_blocked: u64,
    pub uptime_start: DateTime<Utc>,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            scanned: 0,
            threats_detected: 0,
            auto_blocked: 0,
            manual_blocked: 0,
            uptime_start: Utc::now(),
        }
    }
}

impl Stats {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// HEALTH
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "HEALTHY",
            HealthStatus::Degraded => "DEGRADED",
        }
    }
}

/// Point-in-time health view derived from stats and queue depth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub status: HealthStatus,
    pub uptime_seconds: i64,
    pub traffic_processed: u64,
    pub automation_rate: f64,
}

/// Derive health from a stats snapshot and current queue depth.
pub fn health(stats: &Stats, pending: usize) -> HealthSnapshot {
    let status = if pending >= DEGRADED_PENDING_THRESHOLD {
        HealthStatus::Degraded
    } else {
        HealthStatus::Healthy
    };

    HealthSnapshot {
        status,
        uptime_seconds: Utc::now()
            .signed_duration_since(stats.uptime_start)
            .num_seconds(),
        traffic_processed: stats.scanned,
        // +1 keeps the rate defined before the first threat.
        automation_rate: stats.auto_blocked as f64 / (stats.threats_detected + 1) as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_at_five_pending() {
        let stats = Stats::new();
        assert_eq!(health(&stats, 4).status, HealthStatus::Healthy);
        assert_eq!(health(&stats, 5).status, HealthStatus::Degraded);
    }

    #[test]
    fn test_automation_rate_smoothing() {
        let mut stats = Stats::new();
        // Defined even with zero threats.
        assert_eq!(health(&stats, 0).automation_rate, 0.0);

        stats.threats_detected = 9;
        stats.auto_blocked = 5;
        assert!((health(&stats, 0).automation_rate - 0.5).abs() < f64::EPSILON);
    }
}
