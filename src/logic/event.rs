//! Event Types
//!
//! Immutable, timestamped records flowing through the pipeline.
//! An Event is created once at ingestion; only its `action` changes,
//! at most twice (policy decision, then optionally analyst resolution).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::NORMAL_TRAFFIC_LABEL;

// ============================================================================
// ACTIONS
// ============================================================================

/// Disposition of an event as it moves through triage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Benign or not yet escalated
    Monitor,
    /// Blocked by the policy engine without analyst involvement
    AutoBlocked,
    /// Waiting in the queue for analyst disposition
    PendingReview,
    /// Analyst confirmed the threat and blocked it
    ManualBlock,
    /// Analyst dismissed the event as benign
    FalsePositive,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Monitor => "MONITOR",
            Action::AutoBlocked => "AUTO_BLOCKED",
            Action::PendingReview => "PENDING_REVIEW",
            Action::ManualBlock => "MANUAL_BLOCK",
            Action::FalsePositive => "FALSE_POSITIVE",
        }
    }

    /// Terminal dispositions end up in the audit log and never re-queue.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Action::AutoBlocked | Action::ManualBlock | Action::FalsePositive
        )
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Analyst verdict on a pending incident
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResolutionDecision {
    Block,
    Ignore,
}

impl ResolutionDecision {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResolutionDecision::Block => "BLOCK",
            ResolutionDecision::Ignore => "IGNORE",
        }
    }
}

// ============================================================================
// EVENT RECORDS
// ============================================================================

/// Source-provided attributes, before classification.
///
/// Enrichment metadata (country, coordinates) is already present on the
/// incoming event; the core treats the feature payload as opaque.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEvent {
    pub src_ip: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub destination_port: u16,
    /// Opaque feature vector handed to the classifier adapter
    pub features: Vec<f32>,
}

/// One classified unit of network activity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    pub timestamp: DateTime<Utc>,
    pub src_ip: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
    pub destination_port: u16,
    pub label: String,
    pub confidence: f64,
    pub action: Action,
}

impl Event {
    /// Build an event at ingestion time; disposition starts at MONITOR.
    pub fn from_classified(id: u64, raw: &RawEvent, label: String, confidence: f64) -> Self {
        Self {
            id,
            timestamp: Utc::now(),
            src_ip: raw.src_ip.clone(),
            country: raw.country.clone(),
            lat: raw.lat,
            lon: raw.lon,
            destination_port: raw.destination_port,
            label,
            confidence,
            action: Action::Monitor,
        }
    }

    pub fn is_threat(&self) -> bool {
        self.label != NORMAL_TRAFFIC_LABEL
    }
}

/// Immutable record of a terminal disposition (who/when/what)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    #[serde(flatten)]
    pub event: Event,
    /// System identity or analyst id that took the action
    pub handled_by: String,
    pub resolved_at: DateTime<Utc>,
}

impl AuditEntry {
    pub fn new(event: Event, handled_by: &str) -> Self {
        Self {
            event,
            handled_by: handled_by.to_string(),
            resolved_at: Utc::now(),
        }
    }
}
