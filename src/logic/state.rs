//! System State
//!
//! Single owned state object for the whole core: constructed at startup,
//! shared via `Arc`, torn down at shutdown. No process-wide singletons.
//!
//! Locking discipline: one lock per structure. Operations spanning more
//! than one structure acquire locks in a fixed global order -
//! history -> queue -> audit -> stats -> config - so the multi-lock
//! paths (`resolve`, `health`, `snapshot`) can never deadlock each other
//! or the pipeline.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};

use crate::constants::{HISTORY_CAPACITY, QUEUE_CAPACITY};
use crate::error::{TriageError, TriageResult};
use crate::logic::audit::AuditLog;
use crate::logic::config::TriageConfig;
use crate::logic::event::{Action, AuditEntry, Event, ResolutionDecision};
use crate::logic::history::HistoryBuffer;
use crate::logic::persist::PersistenceHook;
use crate::logic::queue::IncidentQueue;
use crate::logic::stats::{self, HealthSnapshot, Stats};

/// What the resolution handler did, echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionOutcome {
    pub id: u64,
    pub action_taken: Action,
}

/// Point-in-time capture of the whole core: the external
/// snapshot/restore contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub history: Vec<Event>,
    pub pending: Vec<Event>,
    pub audit: Vec<AuditEntry>,
    pub stats: Stats,
    pub config: TriageConfig,
    pub next_id: u64,
}

pub struct SystemState {
    history: RwLock<HistoryBuffer>,
    queue: Mutex<IncidentQueue>,
    audit: Mutex<AuditLog>,
    stats: Mutex<Stats>,
    config: RwLock<TriageConfig>,
    /// Written only by the pipeline; ids start at 1.
    next_id: AtomicU64,
    /// Gates ticking only; an in-flight tick always completes.
    is_running: AtomicBool,
}

impl Default for SystemState {
    fn default() -> Self {
        Self::new(TriageConfig::default())
    }
}

impl SystemState {
    pub fn new(config: TriageConfig) -> Self {
        Self {
            history: RwLock::new(HistoryBuffer::new(HISTORY_CAPACITY)),
            queue: Mutex::new(IncidentQueue::new(QUEUE_CAPACITY)),
            audit: Mutex::new(AuditLog::new()),
            stats: Mutex::new(Stats::new()),
            config: RwLock::new(config),
            next_id: AtomicU64::new(1),
            is_running: AtomicBool::new(true),
        }
    }

    /// Rebuild from a snapshot; ids keep increasing monotonically from
    /// where the snapshot left off. The persistence hook is not part of
    /// the contract and must be reattached.
    pub fn restore(snapshot: StateSnapshot) -> Self {
        Self {
            history: RwLock::new(HistoryBuffer::from_entries(
                snapshot.history,
                HISTORY_CAPACITY,
            )),
            queue: Mutex::new(IncidentQueue::from_entries(
                snapshot.pending,
                QUEUE_CAPACITY,
            )),
            audit: Mutex::new(AuditLog::from_entries(snapshot.audit)),
            stats: Mutex::new(snapshot.stats),
            config: RwLock::new(snapshot.config),
            next_id: AtomicU64::new(snapshot.next_id),
            is_running: AtomicBool::new(true),
        }
    }

    pub fn set_persistence_hook(&self, hook: Arc<dyn PersistenceHook>) {
        self.audit.lock().set_hook(hook);
    }

    // ========================================================================
    // PIPELINE-SIDE MUTATIONS
    // ========================================================================

    /// Next monotonic event id. The pipeline is the sole caller.
    pub fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    pub fn record_scan(&self) {
        self.stats.lock().scanned += 1;
    }

    pub fn record_threat(&self) {
        self.stats.lock().threats_detected += 1;
    }

    pub fn record_auto_block(&self) {
        self.stats.lock().auto_blocked += 1;
    }

    pub fn record_history(&self, event: Event) {
        self.history.write().record(event);
    }

    /// Fails fast when the review queue is full; never blocks.
    pub fn try_enqueue(&self, event: Event) -> bool {
        self.queue.lock().try_enqueue(event)
    }

    pub fn append_audit(&self, entry: AuditEntry) {
        self.audit.lock().append(entry);
    }

    // ========================================================================
    // ANALYST-SIDE OPERATIONS
    // ========================================================================

    /// Resolve a pending incident. `NotFound` when the id is not queued
    /// (already resolved, auto-blocked, or never escalated), so a repeat
    /// call on the same id always fails.
    pub fn resolve(
        &self,
        id: u64,
        decision: ResolutionDecision,
        analyst: &str,
    ) -> TriageResult<ResolutionOutcome> {
        // Locks are taken one at a time: queue, then history, then audit,
        // then stats.
        let mut event = {
            let mut queue = self.queue.lock();
            queue.remove(id).ok_or(TriageError::NotFound(id))?
        };

        event.action = match decision {
            ResolutionDecision::Block => Action::ManualBlock,
            ResolutionDecision::Ignore => Action::FalsePositive,
        };

        // The rolling feeds must show the analyst's disposition too.
        self.history.write().update_action(id, event.action);

        self.audit.lock().append(AuditEntry::new(event.clone(), analyst));

        if decision == ResolutionDecision::Block {
            self.stats.lock().manual_blocked += 1;
        }

        log::info!(
            "incident {} resolved as {} by {}",
            id,
            event.action,
            analyst
        );

        Ok(ResolutionOutcome {
            id,
            action_taken: event.action,
        })
    }

    /// Replace the auto-block threshold; takes effect on the next tick.
    pub fn update_threshold(&self, value: f64) -> TriageResult<()> {
        self.config.write().set_threshold(value)?;
        log::info!("auto-block threshold updated to {:.2}", value);
        Ok(())
    }

    /// Replace the pipeline pacing; takes effect on the next tick.
    pub fn update_tick_interval(&self, secs: f64) -> TriageResult<()> {
        self.config.write().set_tick_interval(secs)?;
        log::info!("tick interval updated to {:.3}s", secs);
        Ok(())
    }

    // ========================================================================
    // RUN FLAG
    // ========================================================================

    pub fn is_running(&self) -> bool {
        self.is_running.load(Ordering::Relaxed)
    }

    /// Stop ticking; in-flight work is never dropped.
    pub fn pause(&self) {
        self.is_running.store(false, Ordering::Relaxed);
        log::info!("pipeline paused");
    }

    pub fn resume(&self) {
        self.is_running.store(true, Ordering::Relaxed);
        log::info!("pipeline resumed");
    }

    // ========================================================================
    // READ VIEWS (owned snapshots, never a structure mid-mutation)
    // ========================================================================

    pub fn recent_traffic(&self, n: usize) -> Vec<Event> {
        self.history.read().recent(n)
    }

    pub fn threat_feed(&self) -> Vec<Event> {
        self.history.read().threats()
    }

    pub fn pending_incidents(&self) -> Vec<Event> {
        self.queue.lock().list()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn audit_entries(&self) -> Vec<AuditEntry> {
        self.audit.lock().all()
    }

    pub fn stats_snapshot(&self) -> Stats {
        self.stats.lock().clone()
    }

    pub fn config_snapshot(&self) -> TriageConfig {
        self.config.read().clone()
    }

    pub fn tick_interval(&self) -> Duration {
        self.config.read().tick_interval
    }

    pub fn health(&self) -> HealthSnapshot {
        // Lock order: queue before stats.
        let pending = self.queue.lock().len();
        let stats = self.stats.lock().clone();
        stats::health(&stats, pending)
    }

    /// Consistent point-in-time capture; takes every lock in the global
    /// order for the duration of the copy.
    pub fn snapshot(&self) -> StateSnapshot {
        let history = self.history.read();
        let queue = self.queue.lock();
        let audit = self.audit.lock();
        let stats = self.stats.lock();
        let config = self.config.read();

        StateSnapshot {
            history: history.snapshot(),
            pending: queue.list(),
            audit: audit.all(),
            stats: stats.clone(),
            config: config.clone(),
            next_id: self.next_id.load(Ordering::Relaxed),
        }
    }
}
