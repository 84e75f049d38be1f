//! Central Configuration Constants
//!
//! Single source of truth for all capacities and policy defaults.
//! To change a default, only edit this file.

/// Rolling history buffer capacity (events)
pub const HISTORY_CAPACITY: usize = 100;

/// Pending-review queue capacity (incidents)
pub const QUEUE_CAPACITY: usize = 10;

/// Queue depth at which health flips to DEGRADED
pub const DEGRADED_PENDING_THRESHOLD: usize = 5;

/// Window returned by the live traffic feed
pub const LIVE_FEED_WINDOW: usize = 20;

/// Default confidence threshold for auto-blocking
pub const DEFAULT_AUTO_BLOCK_THRESHOLD: f64 = 0.95;

/// Default pipeline tick interval (seconds per event)
pub const DEFAULT_TICK_INTERVAL_SECS: f64 = 1.0;

/// Classifier label for benign traffic
pub const NORMAL_TRAFFIC_LABEL: &str = "Normal Traffic";

/// Audit authorship for auto-blocked events
pub const SYSTEM_AUTOMATION: &str = "SYSTEM_AUTOMATION";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get auto-block threshold from environment or use default
pub fn get_auto_block_threshold() -> f64 {
    std::env::var("TRIAGE_AUTO_BLOCK_THRESHOLD")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_AUTO_BLOCK_THRESHOLD)
}

/// Get tick interval (seconds) from environment or use default
pub fn get_tick_interval_secs() -> f64 {
    std::env::var("TRIAGE_TICK_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_TICK_INTERVAL_SECS)
}

/// Get audit log directory from environment or use default
pub fn get_audit_log_dir() -> String {
    std::env::var("TRIAGE_AUDIT_LOG_DIR").unwrap_or_else(|_| "audit_logs".to_string())
}
