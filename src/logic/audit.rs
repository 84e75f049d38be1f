//! Audit Log
//!
//! Append-only system of record for every terminal disposition.
//! No update or delete operation exists; entries are immutable once
//! appended.

use std::sync::Arc;

use crate::logic::event::AuditEntry;
use crate::logic::persist::PersistenceHook;

#[derive(Default)]
pub struct AuditLog {
    entries: Vec<AuditEntry>,
    hook: Option<Arc<dyn PersistenceHook>>,
}

impl AuditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from a snapshot (insertion order preserved, no hook).
    pub fn from_entries(entries: Vec<AuditEntry>) -> Self {
        Self {
            entries,
            hook: None,
        }
    }

    pub fn set_hook(&mut self, hook: Arc<dyn PersistenceHook>) {
        self.hook = Some(hook);
    }

    /// Unconditional append, then best-effort external flush. A hook
    /// failure never rolls back the in-memory entry.
    pub fn append(&mut self, entry: AuditEntry) {
        debug_assert!(
            entry.event.action.is_terminal(),
            "audit entries must carry a terminal disposition"
        );
        if let Some(hook) = &self.hook {
            if let Err(e) = hook.on_audit_append(&entry) {
                log::warn!("audit persistence hook failed for event {}: {}", entry.event.id, e);
            }
        }
        self.entries.push(entry);
    }

    /// Insertion-order snapshot.
    pub fn all(&self) -> Vec<AuditEntry> {
        self.entries.clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::event::{Action, Event, RawEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn entry(id: u64, handled_by: &str, action: Action) -> AuditEntry {
        let raw = RawEvent {
            src_ip: "192.168.1.12".to_string(),
            country: "USA".to_string(),
            lat: 37.0902,
            lon: -95.7129,
            destination_port: 8080,
            features: vec![],
        };
        let mut event = Event::from_classified(id, &raw, "Botnet".to_string(), 0.96);
        event.action = action;
        AuditEntry::new(event, handled_by)
    }

    struct FailingHook {
        calls: AtomicUsize,
    }

    impl PersistenceHook for FailingHook {
        fn on_audit_append(&self, _: &AuditEntry) -> std::io::Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(std::io::Error::new(std::io::ErrorKind::Other, "disk gone"))
        }
    }

    #[test]
    fn test_append_preserves_order() {
        let mut log = AuditLog::new();
        log.append(entry(1, "SYSTEM_AUTOMATION", Action::AutoBlocked));
        log.append(entry(2, "alice", Action::ManualBlock));

        let all = log.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].event.id, 1);
        assert_eq!(all[1].event.id, 2);
    }

    #[test]
    fn test_hook_failure_does_not_roll_back() {
        let hook = Arc::new(FailingHook {
            calls: AtomicUsize::new(0),
        });
        let mut log = AuditLog::new();
        log.set_hook(hook.clone());

        log.append(entry(1, "alice", Action::FalsePositive));

        assert_eq!(hook.calls.load(Ordering::SeqCst), 1);
        assert_eq!(log.len(), 1);
    }
}
