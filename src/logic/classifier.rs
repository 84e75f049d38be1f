//! Classifier Adapter
//!
//! The classification model lives outside the core; the pipeline only
//! sees the `ClassifierAdapter` seam. A heuristic stand-in ships for
//! running without a real model wired in.

use rand::Rng;

use crate::constants::NORMAL_TRAFFIC_LABEL;
use crate::error::{TriageError, TriageResult};
use crate::logic::event::RawEvent;

/// Model output for one event
#[derive(Debug, Clone)]
pub struct Classification {
    pub label: String,
    pub confidence: f64,
}

/// Seam to the external classification model. Called exactly once per
/// tick; a failure skips that tick and never stops the pipeline.
pub trait ClassifierAdapter: Send + Sync {
    fn classify(&self, raw: &RawEvent) -> TriageResult<Classification>;
}

// ============================================================================
// HEURISTIC FALLBACK
// ============================================================================

/// Rule-based stand-in used when no model runtime is wired in.
///
/// Labels are derived from the feature payload and destination port;
/// confidence is jittered within the band the real model reports for
/// each class.
#[derive(Debug, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }
}

impl ClassifierAdapter for HeuristicClassifier {
    fn classify(&self, raw: &RawEvent) -> TriageResult<Classification> {
        if raw.features.is_empty() {
            return Err(TriageError::Classification(
                "empty feature vector".to_string(),
            ));
        }

        let mean: f32 = raw.features.iter().sum::<f32>() / raw.features.len() as f32;

        let label = if mean >= 0.8 {
            "DDoS"
        } else if raw.destination_port == 22 {
            "Brute Force"
        } else if raw.destination_port == 23 {
            "Botnet"
        } else if mean >= 0.5 {
            "PortScan"
        } else {
            NORMAL_TRAFFIC_LABEL
        };

        let mut rng = rand::thread_rng();
        let confidence = if label == NORMAL_TRAFFIC_LABEL {
            rng.gen_range(0.90..0.99)
        } else {
            rng.gen_range(0.75..0.99)
        };

        Ok(Classification {
            label: label.to_string(),
            confidence,
        })
    }
}
