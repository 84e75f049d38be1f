//! End-to-end triage flow: scripted traffic through the pipeline, then
//! analyst operations through the api surface.

use std::sync::Mutex;

use triage_core::api;
use triage_core::logic::classifier::{Classification, ClassifierAdapter};
use triage_core::logic::event::{Action, RawEvent, ResolutionDecision};
use triage_core::logic::pipeline;
use triage_core::logic::source::TrafficSource;
use triage_core::logic::state::StateSnapshot;
use triage_core::{SystemState, TriageError, TriageResult};

struct FixedSource(RawEvent);

impl TrafficSource for FixedSource {
    fn next_event(&mut self) -> RawEvent {
        self.0.clone()
    }
}

struct ScriptedClassifier(Mutex<Vec<Classification>>);

impl ScriptedClassifier {
    fn new(script: &[(&str, f64)]) -> Self {
        Self(Mutex::new(
            script
                .iter()
                .map(|(label, confidence)| Classification {
                    label: label.to_string(),
                    confidence: *confidence,
                })
                .collect(),
        ))
    }
}

impl ClassifierAdapter for ScriptedClassifier {
    fn classify(&self, _: &RawEvent) -> TriageResult<Classification> {
        let mut script = self.0.lock().unwrap();
        if script.is_empty() {
            return Err(TriageError::Classification("script exhausted".to_string()));
        }
        Ok(script.remove(0))
    }
}

fn raw() -> RawEvent {
    RawEvent {
        src_ip: "192.168.1.101".to_string(),
        country: "Brazil".to_string(),
        lat: -14.2350,
        lon: -51.9253,
        destination_port: 80,
        features: vec![0.4, 0.6],
    }
}

#[test]
fn triage_scenario_auto_block_then_manual_review() {
    let state = SystemState::default();
    state.update_threshold(0.95).unwrap();

    let mut source = FixedSource(raw());
    let classifier = ScriptedClassifier::new(&[("DDoS", 0.97), ("PortScan", 0.80)]);

    // Tick 1: DDoS at 0.97 clears the 0.95 threshold.
    pipeline::run_tick(&state, &mut source, &classifier).unwrap();

    let stats = state.stats_snapshot();
    assert_eq!(stats.auto_blocked, 1);
    let audit = api::audit_log(&state);
    assert_eq!(audit.len(), 1);
    assert_eq!(audit[0].event.action, Action::AutoBlocked);
    assert_eq!(audit[0].handled_by, "SYSTEM_AUTOMATION");
    assert!(api::pending_incidents(&state).is_empty());

    // Tick 2: PortScan at 0.80 goes to review.
    pipeline::run_tick(&state, &mut source, &classifier).unwrap();

    let pending = api::pending_incidents(&state);
    assert_eq!(pending.len(), 1);
    let incident_id = pending[0].id;
    assert_eq!(pending[0].action, Action::PendingReview);

    // Bob dismisses it.
    let request = api::ResolveRequest {
        decision: ResolutionDecision::Ignore,
        analyst_id: "bob".to_string(),
    };
    let outcome = api::resolve_incident(&state, incident_id, &request).unwrap();
    assert_eq!(outcome.action_taken, Action::FalsePositive);

    assert!(api::pending_incidents(&state).is_empty());
    let audit = api::audit_log(&state);
    assert_eq!(audit.len(), 2);
    assert_eq!(audit[1].handled_by, "bob");
    assert_eq!(audit[1].event.action, Action::FalsePositive);
    // IGNORE leaves manual_blocked alone.
    assert_eq!(state.stats_snapshot().manual_blocked, 0);

    // The rolling feeds reflect the disposition, not the stale escalation.
    let feed = api::threat_feed(&state);
    assert!(feed
        .iter()
        .any(|e| e.id == incident_id && e.action == Action::FalsePositive));

    // Same id again: already resolved.
    let err = api::resolve_incident(&state, incident_id, &request).unwrap_err();
    assert!(matches!(err, TriageError::NotFound(_)));
}

#[test]
fn history_keeps_only_the_newest_hundred() {
    let state = SystemState::default();
    let mut source = FixedSource(raw());
    let script: Vec<(&str, f64)> = (0..150).map(|_| ("Normal Traffic", 0.95)).collect();
    let classifier = ScriptedClassifier::new(&script);

    for _ in 0..150 {
        pipeline::run_tick(&state, &mut source, &classifier).unwrap();
    }

    assert_eq!(state.stats_snapshot().scanned, 150);

    let recent = api::recent_traffic(&state, 200);
    assert_eq!(recent.len(), 100);
    assert_eq!(recent.first().unwrap().id, 150);
    assert_eq!(recent.last().unwrap().id, 51);

    let live = api::live_traffic(&state);
    assert_eq!(live.len(), 20);
}

#[test]
fn snapshot_survives_a_json_round_trip() {
    let state = SystemState::default();
    let mut source = FixedSource(raw());
    let classifier = ScriptedClassifier::new(&[("PortScan", 0.80), ("Normal Traffic", 0.95)]);

    pipeline::run_tick(&state, &mut source, &classifier).unwrap();
    pipeline::run_tick(&state, &mut source, &classifier).unwrap();

    let json = serde_json::to_string(&api::export_snapshot(&state)).unwrap();
    let snapshot: StateSnapshot = serde_json::from_str(&json).unwrap();
    let restored = SystemState::restore(snapshot);

    assert_eq!(restored.stats_snapshot().scanned, 2);
    assert_eq!(api::pending_incidents(&restored).len(), 1);
    assert_eq!(api::recent_traffic(&restored, 10).len(), 2);

    // The restored pipeline keeps assigning fresh, larger ids.
    let classifier = ScriptedClassifier::new(&[("Normal Traffic", 0.95)]);
    pipeline::run_tick(&restored, &mut source, &classifier).unwrap();
    assert_eq!(api::recent_traffic(&restored, 1)[0].id, 3);
}

#[test]
fn pause_gates_ticking_only() {
    let state = SystemState::default();
    assert!(state.is_running());

    state.pause();
    assert!(!state.is_running());

    // Paused state still serves reads and analyst operations.
    assert!(api::pending_incidents(&state).is_empty());
    assert!(api::update_threshold(&state, 0.5).is_ok());

    state.resume();
    assert!(state.is_running());
}
