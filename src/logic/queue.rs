//! Incident Queue
//!
//! Bounded FIFO of threats awaiting analyst disposition. Enqueue fails
//! fast when full: excess threats stay monitored in history instead of
//! blocking the pipeline.

use std::collections::VecDeque;

use crate::constants::QUEUE_CAPACITY;
use crate::logic::event::Event;

#[derive(Debug)]
pub struct IncidentQueue {
    entries: VecDeque<Event>,
    capacity: usize,
}

impl Default for IncidentQueue {
    fn default() -> Self {
        Self::new(QUEUE_CAPACITY)
    }
}

impl IncidentQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Rebuild from a snapshot (insertion order preserved).
    pub fn from_entries(entries: Vec<Event>, capacity: usize) -> Self {
        let mut queue = Self::new(capacity);
        queue.entries = entries.into_iter().take(capacity).collect();
        queue
    }

    /// Append if there is room. Returns false when full; never blocks.
    pub fn try_enqueue(&mut self, event: Event) -> bool {
        if self.is_full() {
            return false;
        }
        self.entries.push_back(event);
        true
    }

    /// Insertion-order snapshot, oldest first.
    pub fn list(&self) -> Vec<Event> {
        self.entries.iter().cloned().collect()
    }

    /// Remove by id. None when the incident is not queued.
    pub fn remove(&mut self, id: u64) -> Option<Event> {
        let pos = self.entries.iter().position(|e| e.id == id)?;
        self.entries.remove(pos)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::event::{Action, RawEvent};

    fn incident(id: u64) -> Event {
        let raw = RawEvent {
            src_ip: "192.168.1.77".to_string(),
            country: "Unknown".to_string(),
            lat: 0.0,
            lon: 0.0,
            destination_port: 22,
            features: vec![],
        };
        let mut ev = Event::from_classified(id, &raw, "Brute Force".to_string(), 0.80);
        ev.action = Action::PendingReview;
        ev
    }

    #[test]
    fn test_drops_when_full() {
        let mut queue = IncidentQueue::new(10);
        for id in 1..=10 {
            assert!(queue.try_enqueue(incident(id)));
        }
        // The 11th is dropped, not overwritten.
        assert!(queue.is_full());
        assert!(!queue.try_enqueue(incident(11)));
        assert_eq!(queue.len(), 10);
        assert_eq!(queue.list().first().unwrap().id, 1);
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let mut queue = IncidentQueue::new(10);
        for id in [3, 1, 2] {
            queue.try_enqueue(incident(id));
        }
        let ids: Vec<u64> = queue.list().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn test_remove_is_one_shot() {
        let mut queue = IncidentQueue::new(10);
        queue.try_enqueue(incident(5));

        assert_eq!(queue.remove(5).unwrap().id, 5);
        assert!(queue.remove(5).is_none());
        assert!(queue.is_empty());
    }
}
