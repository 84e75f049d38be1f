//! API Operations - Surface for the Transport Layer
//!
//! Plain operations over the shared state, ready for an HTTP (or any
//! other) layer to wrap. No transport semantics here: errors are
//! `TriageError` values for the outer layer to translate.

use serde::{Deserialize, Serialize};

use crate::constants::LIVE_FEED_WINDOW;
use crate::error::TriageResult;
use crate::logic::event::{AuditEntry, Event, ResolutionDecision};
use crate::logic::state::{ResolutionOutcome, StateSnapshot, SystemState};
use crate::logic::stats::HealthSnapshot;

// ============================================================================
// REQUEST / RESPONSE SHAPES
// ============================================================================

/// Analyst resolution request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequest {
    pub decision: ResolutionDecision,
    #[serde(default = "default_analyst")]
    pub analyst_id: String,
}

fn default_analyst() -> String {
    "admin_user".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ConfigUpdateResponse {
    pub status: &'static str,
    pub new_value: f64,
}

// ============================================================================
// READ OPERATIONS
// ============================================================================

/// System overview: status, uptime, throughput, automation rate.
pub fn health(state: &SystemState) -> HealthSnapshot {
    state.health()
}

/// Most recent traffic window for the live feed.
pub fn live_traffic(state: &SystemState) -> Vec<Event> {
    state.recent_traffic(LIVE_FEED_WINDOW)
}

/// Last `n` processed events, most-recent-first.
pub fn recent_traffic(state: &SystemState, n: usize) -> Vec<Event> {
    state.recent_traffic(n)
}

/// Threat-only history view for the map feed.
pub fn threat_feed(state: &SystemState) -> Vec<Event> {
    state.threat_feed()
}

/// Incidents awaiting analyst disposition, oldest first.
pub fn pending_incidents(state: &SystemState) -> Vec<Event> {
    state.pending_incidents()
}

/// Full audit trail, insertion order.
pub fn audit_log(state: &SystemState) -> Vec<AuditEntry> {
    state.audit_entries()
}

/// Consistent whole-state capture for external persistence.
pub fn export_snapshot(state: &SystemState) -> StateSnapshot {
    state.snapshot()
}

// ============================================================================
// WRITE OPERATIONS
// ============================================================================

/// Take an analyst decision on a pending incident.
pub fn resolve_incident(
    state: &SystemState,
    id: u64,
    request: &ResolveRequest,
) -> TriageResult<ResolutionOutcome> {
    state.resolve(id, request.decision, &request.analyst_id)
}

/// Update the auto-block confidence threshold.
pub fn update_threshold(state: &SystemState, value: f64) -> TriageResult<ConfigUpdateResponse> {
    state.update_threshold(value)?;
    Ok(ConfigUpdateResponse {
        status: "updated",
        new_value: value,
    })
}

/// Update the pipeline tick interval (seconds per event).
pub fn update_tick_interval(
    state: &SystemState,
    secs: f64,
) -> TriageResult<ConfigUpdateResponse> {
    state.update_tick_interval(secs)?;
    Ok(ConfigUpdateResponse {
        status: "updated",
        new_value: secs,
    })
}
