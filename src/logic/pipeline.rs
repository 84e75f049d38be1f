//! Triage Pipeline
//!
//! Background loop that drives the whole core: one event per tick, paced
//! by the configured interval. A failed tick is logged and skipped; the
//! loop itself never exits.

use std::sync::Arc;
use std::thread;

use crate::constants::SYSTEM_AUTOMATION;
use crate::error::TriageResult;
use crate::logic::classifier::{Classification, ClassifierAdapter};
use crate::logic::event::{Action, AuditEntry, Event};
use crate::logic::policy::{self, PolicyDecision};
use crate::logic::source::TrafficSource;
use crate::logic::state::SystemState;

/// Run exactly one tick against the shared state.
///
/// Split out of the loop so tests can drive the pipeline synchronously.
pub fn run_tick(
    state: &SystemState,
    source: &mut dyn TrafficSource,
    classifier: &dyn ClassifierAdapter,
) -> TriageResult<()> {
    // 1. Draw next raw event
    let raw = source.next_event();

    // 2. Classify
    let Classification { label, confidence } = classifier.classify(&raw)?;

    // 3. Construct event with the next id
    let mut event = Event::from_classified(state.next_id(), &raw, label, confidence);

    // 4. Count the scan
    state.record_scan();

    // 5. Threats go through the policy engine
    if event.is_threat() {
        state.record_threat();
        let threshold = state.config_snapshot().auto_block_threshold;

        match policy::decide(&event.label, event.confidence, threshold) {
            PolicyDecision::AutoBlock => {
                event.action = Action::AutoBlocked;
                state.append_audit(AuditEntry::new(event.clone(), SYSTEM_AUTOMATION));
                state.record_auto_block();
                log::info!(
                    "auto-blocked event {} ({} @ {:.2})",
                    event.id,
                    event.label,
                    event.confidence
                );
            }
            PolicyDecision::PendingReview => {
                event.action = Action::PendingReview;
                if !state.try_enqueue(event.clone()) {
                    // Queue full: the event stays monitored-only in history.
                    log::debug!("review queue full, event {} not escalated", event.id);
                }
            }
            // Unreachable under the is_threat guard; kept as a no-op.
            PolicyDecision::Monitor => {}
        }
    }

    // 6. Record the (possibly re-dispositioned) event into history
    state.record_history(event);
    Ok(())
}

/// Spawn the pipeline thread. The run flag on `state` gates ticking;
/// pausing stops new ticks but never aborts one in progress.
pub fn start(
    state: Arc<SystemState>,
    mut source: Box<dyn TrafficSource>,
    classifier: Box<dyn ClassifierAdapter>,
) -> thread::JoinHandle<()> {
    thread::Builder::new()
        .name("triage-pipeline".to_string())
        .spawn(move || {
            log::info!("Triage pipeline started");
            loop {
                if state.is_running() {
                    if let Err(e) = run_tick(&state, source.as_mut(), classifier.as_ref()) {
                        log::warn!("tick skipped: {}", e);
                    }
                }
                thread::sleep(state.tick_interval());
            }
        })
        .expect("failed to spawn pipeline thread")
}
