//! Triage Core - Main Entry Point
//!
//! Wires the simulated traffic source and the heuristic classifier into
//! the pipeline and keeps a health heartbeat in the log. A real
//! deployment replaces the source/classifier seams and wraps the `api`
//! operations in its transport of choice.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use triage_core::api;
use triage_core::constants;
use triage_core::logic::classifier::HeuristicClassifier;
use triage_core::logic::config::TriageConfig;
use triage_core::logic::persist::JsonlHook;
use triage_core::logic::pipeline;
use triage_core::logic::source::ReplaySource;
use triage_core::SystemState;

/// Health heartbeat cadence in the log
const HEARTBEAT_SECS: u64 = 30;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting triage core v{}...", constants::APP_VERSION);

    let config = match TriageConfig::new(
        constants::get_auto_block_threshold(),
        constants::get_tick_interval_secs(),
    ) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("bad config from environment ({}), using defaults", e);
            TriageConfig::default()
        }
    };
    log::info!(
        "Policy: auto-block at {:.2}, one event per {:?}",
        config.auto_block_threshold,
        config.tick_interval
    );

    let state = Arc::new(SystemState::new(config));

    match JsonlHook::new(Path::new(&constants::get_audit_log_dir())) {
        Ok(hook) => state.set_persistence_hook(Arc::new(hook)),
        Err(e) => log::warn!("audit persistence disabled: {}", e),
    }

    let _pipeline = pipeline::start(
        state.clone(),
        Box::new(ReplaySource::with_sample_mix()),
        Box::new(HeuristicClassifier::new()),
    );

    loop {
        std::thread::sleep(Duration::from_secs(HEARTBEAT_SECS));
        let health = api::health(&state);
        log::info!(
            "health: {} | scanned {} | automation rate {:.1}% | pending {}",
            health.status.as_str(),
            health.traffic_processed,
            health.automation_rate * 100.0,
            api::pending_incidents(&state).len()
        );
    }
}
