//! Error handling

use thiserror::Error;

pub type TriageResult<T> = Result<T, TriageError>;

/// Everything that can go wrong inside the core.
///
/// Nothing here is fatal: a `Classification` failure skips one tick,
/// the rest are surfaced to the caller with no state change.
#[derive(Debug, Error)]
pub enum TriageError {
    /// Incident is not in the pending queue (already resolved,
    /// auto-blocked, or never queued).
    #[error("incident {0} not found or already resolved")]
    NotFound(u64),

    /// Rejected configuration or request value.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Per-tick classifier failure; logged and skipped by the pipeline.
    #[error("classification failed: {0}")]
    Classification(String),
}
