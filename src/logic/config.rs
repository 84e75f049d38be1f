//! Runtime Configuration
//!
//! Mutable pipeline parameters, validated on every update. The pipeline
//! reads a consistent snapshot per tick, so an update takes effect on the
//! next tick, never mid-tick.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_AUTO_BLOCK_THRESHOLD, DEFAULT_TICK_INTERVAL_SECS};
use crate::error::{TriageError, TriageResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriageConfig {
    pub auto_block_threshold: f64,
    pub tick_interval: Duration,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            auto_block_threshold: DEFAULT_AUTO_BLOCK_THRESHOLD,
            tick_interval: Duration::from_secs_f64(DEFAULT_TICK_INTERVAL_SECS),
        }
    }
}

impl TriageConfig {
    /// Validated constructor; same bounds as the live setters.
    pub fn new(auto_block_threshold: f64, tick_interval_secs: f64) -> TriageResult<Self> {
        let mut config = Self::default();
        config.set_threshold(auto_block_threshold)?;
        config.set_tick_interval(tick_interval_secs)?;
        Ok(config)
    }

    /// Replace the auto-block threshold. Rejects anything outside [0, 1]
    /// (NaN included) and leaves the current value untouched on failure.
    pub fn set_threshold(&mut self, value: f64) -> TriageResult<()> {
        if !(0.0..=1.0).contains(&value) {
            return Err(TriageError::InvalidArgument(format!(
                "auto_block_threshold must be within [0.0, 1.0], got {}",
                value
            )));
        }
        self.auto_block_threshold = value;
        Ok(())
    }

    /// Replace the tick interval; must be strictly positive, finite, and
    /// representable as a `Duration`.
    pub fn set_tick_interval(&mut self, secs: f64) -> TriageResult<()> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(TriageError::InvalidArgument(format!(
                "tick_interval must be > 0 seconds, got {}",
                secs
            )));
        }
        // A positive finite float can still overflow Duration.
        self.tick_interval = Duration::try_from_secs_f64(secs).map_err(|_| {
            TriageError::InvalidArgument(format!("tick_interval out of range: {}", secs))
        })?;
        Ok(())
    }
}
