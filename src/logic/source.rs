//! Traffic Source
//!
//! The pipeline draws one raw event per tick from a `TrafficSource`.
//! The shipped `ReplaySource` replays a finite sample mix cyclically and
//! enriches each draw with simulated source metadata, standing in for
//! the capture layer.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::logic::event::RawEvent;

/// Country -> (lat, lon) for the map feed.
const COUNTRY_COORDS: &[(&str, f64, f64)] = &[
    ("USA", 37.0902, -95.7129),
    ("China", 35.8617, 104.1954),
    ("Russia", 61.5240, 105.3188),
    ("Germany", 51.1657, 10.4515),
    ("Brazil", -14.2350, -51.9253),
    ("India", 20.5937, 78.9629),
    ("North Korea", 40.3399, 127.5101),
    ("Unknown", 0.0, 0.0),
];

/// Seam to the traffic capture layer.
pub trait TrafficSource: Send {
    fn next_event(&mut self) -> RawEvent;
}

// ============================================================================
// CYCLIC REPLAY SOURCE
// ============================================================================

/// One row of replayable traffic: the parts that survive capture.
#[derive(Debug, Clone)]
pub struct ReplayRow {
    pub destination_port: u16,
    pub features: Vec<f32>,
}

/// Cyclic replay over a finite row set with per-draw fake enrichment.
pub struct ReplaySource {
    rows: Vec<ReplayRow>,
    index: usize,
}

impl ReplaySource {
    pub fn new(rows: Vec<ReplayRow>) -> Self {
        assert!(!rows.is_empty(), "replay source needs at least one row");
        Self { rows, index: 0 }
    }

    /// Built-in mix of benign and attack traffic, roughly 2:1 benign.
    pub fn with_sample_mix() -> Self {
        Self::new(vec![
            ReplayRow { destination_port: 443, features: vec![0.10, 0.15, 0.05] },
            ReplayRow { destination_port: 80, features: vec![0.20, 0.10, 0.12] },
            ReplayRow { destination_port: 80, features: vec![0.92, 0.88, 0.95] }, // DDoS burst
            ReplayRow { destination_port: 443, features: vec![0.08, 0.11, 0.09] },
            ReplayRow { destination_port: 22, features: vec![0.30, 0.25, 0.20] }, // SSH brute force
            ReplayRow { destination_port: 8080, features: vec![0.12, 0.18, 0.10] },
            ReplayRow { destination_port: 3389, features: vec![0.60, 0.55, 0.58] }, // scan sweep
            ReplayRow { destination_port: 23, features: vec![0.35, 0.40, 0.30] }, // telnet botnet
            ReplayRow { destination_port: 443, features: vec![0.14, 0.09, 0.11] },
        ])
    }
}

impl TrafficSource for ReplaySource {
    fn next_event(&mut self) -> RawEvent {
        let row = &self.rows[self.index % self.rows.len()];
        self.index = self.index.wrapping_add(1);

        let mut rng = rand::thread_rng();
        let (country, lat, lon) = *COUNTRY_COORDS
            .choose(&mut rng)
            .unwrap_or(&("Unknown", 0.0, 0.0));

        RawEvent {
            src_ip: format!("192.168.1.{}", rng.gen_range(10..=200)),
            country: country.to_string(),
            lat,
            lon,
            destination_port: row.destination_port,
            features: row.features.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replay_wraps_around() {
        let rows = vec![
            ReplayRow { destination_port: 80, features: vec![0.1] },
            ReplayRow { destination_port: 22, features: vec![0.2] },
        ];
        let mut source = ReplaySource::new(rows);

        let ports: Vec<u16> = (0..5).map(|_| source.next_event().destination_port).collect();
        assert_eq!(ports, vec![80, 22, 80, 22, 80]);
    }

    #[test]
    fn test_enrichment_uses_known_countries() {
        let mut source = ReplaySource::with_sample_mix();
        let event = source.next_event();

        assert!(COUNTRY_COORDS.iter().any(|(c, ..)| *c == event.country));
        assert!(event.src_ip.starts_with("192.168.1."));
    }
}
