//! Triage Core - Automated Security-Event Triage Pipeline
//!
//! Consumes a stream of classified network events, applies a
//! confidence-threshold policy (auto-block vs. human review), and maintains
//! the bounded in-memory views analysts work from: rolling history,
//! pending-review queue, and permanent audit trail.

pub mod api;
pub mod constants;
pub mod error;
pub mod logic;

pub use error::{TriageError, TriageResult};
pub use logic::state::SystemState;
