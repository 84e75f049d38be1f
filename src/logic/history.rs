//! Rolling History Buffer
//!
//! Fixed-capacity, most-recent-first view of every processed event.
//! Backs the live traffic feed and the threat-only map feed.

use std::collections::VecDeque;

use crate::constants::HISTORY_CAPACITY;
use crate::logic::event::{Action, Event};

/// Bounded rolling buffer; newest entry sits at the front.
#[derive(Debug)]
pub struct HistoryBuffer {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl Default for HistoryBuffer {
    fn default() -> Self {
        Self::new(HISTORY_CAPACITY)
    }
}

impl HistoryBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from a snapshot (most-recent-first order preserved).
    pub fn from_entries(entries: Vec<Event>, capacity: usize) -> Self {
        let mut buffer = Self::new(capacity);
        buffer.entries = entries.into_iter().take(capacity).collect();
        buffer
    }

    /// Insert at the front; evicts the oldest entry past capacity.
    pub fn record(&mut self, event: Event) {
        self.entries.push_front(event);
        while self.entries.len() > self.capacity {
            self.entries.pop_back();
        }
    }

    /// First `n` entries, most-recent-first; `n` is clamped to current size.
    pub fn recent(&self, n: usize) -> Vec<Event> {
        self.entries.iter().take(n).cloned().collect()
    }

    /// Re-disposition a buffered event in place, so the live and threat
    /// feeds reflect analyst resolutions. False when the event has
    /// already rolled off the buffer.
    pub fn update_action(&mut self, id: u64, action: Action) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(event) => {
                event.action = action;
                true
            }
            None => false,
        }
    }

    /// Threat-only view of the buffer (for the map feed).
    pub fn threats(&self) -> Vec<Event> {
        self.entries.iter().filter(|e| e.is_threat()).cloned().collect()
    }

    /// Full copy, most-recent-first (snapshot contract).
    pub fn snapshot(&self) -> Vec<Event> {
        self.entries.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
