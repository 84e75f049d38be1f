//! Policy Engine
//!
//! Only contains decision logic - no types, no state, no side effects.
//! Input: classifier label + confidence + configured threshold
//! Output: PolicyDecision

use crate::constants::NORMAL_TRAFFIC_LABEL;

/// What to do with a freshly classified event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyDecision {
    /// Benign traffic: record only
    Monitor,
    /// Confidence cleared the threshold: block without analyst involvement
    AutoBlock,
    /// Threat below the threshold: escalate to human review
    PendingReview,
}

/// Main policy decision function
///
/// Pure and deterministic: same inputs always give the same decision.
pub fn decide(label: &str, confidence: f64, threshold: f64) -> PolicyDecision {
    if label == NORMAL_TRAFFIC_LABEL {
        PolicyDecision::Monitor
    } else if confidence >= threshold {
        PolicyDecision::AutoBlock
    } else {
        PolicyDecision::PendingReview
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_traffic_always_monitored() {
        assert_eq!(decide("Normal Traffic", 0.99, 0.95), PolicyDecision::Monitor);
        assert_eq!(decide("Normal Traffic", 0.10, 0.95), PolicyDecision::Monitor);
    }

    #[test]
    fn test_threshold_gates_auto_block() {
        assert_eq!(decide("DDoS", 0.97, 0.95), PolicyDecision::AutoBlock);
        assert_eq!(decide("PortScan", 0.80, 0.95), PolicyDecision::PendingReview);
    }

    #[test]
    fn test_threshold_boundary_is_inclusive() {
        assert_eq!(decide("Botnet", 0.95, 0.95), PolicyDecision::AutoBlock);
    }
}
