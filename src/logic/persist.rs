//! Audit Persistence
//!
//! Best-effort flush of audit entries to external storage. The core only
//! knows the `PersistenceHook` seam; the shipped implementation is an
//! append-only JSONL writer.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::{Datelike, Timelike, Utc};
use parking_lot::Mutex;

use crate::logic::event::AuditEntry;

/// Log file extension
const LOG_EXT: &str = ".jsonl";

/// Called after every audit append. Failures are logged by the caller and
/// never roll back the in-memory append.
pub trait PersistenceHook: Send + Sync {
    fn on_audit_append(&self, entry: &AuditEntry) -> io::Result<()>;
}

// ============================================================================
// JSONL HOOK
// ============================================================================

/// Append-only JSONL hook, one line per audit entry.
pub struct JsonlHook {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlHook {
    /// Open a fresh timestamped log file under `base_dir`.
    pub fn new(base_dir: &Path) -> io::Result<Self> {
        std::fs::create_dir_all(base_dir)?;

        let now = Utc::now();
        let filename = format!(
            "audit_{}_{:02}_{:02}_{:02}{:02}{:02}{}",
            now.year(),
            now.month(),
            now.day(),
            now.hour(),
            now.minute(),
            now.second(),
            LOG_EXT
        );
        let path = base_dir.join(filename);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        log::info!("Opened audit log: {:?}", path);

        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PersistenceHook for JsonlHook {
    fn on_audit_append(&self, entry: &AuditEntry) -> io::Result<()> {
        let line = serde_json::to_string(entry)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.write_all(b"\n")?;
        // Flush per entry: an entry returned by append must survive a crash.
        writer.flush()
    }
}
