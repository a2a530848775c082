//! File-backed usage ledger.
//!
//! [`UsageTracker`] implements the
//! [`TelemetryHook`](comparator_application::TelemetryHook) port: every
//! recorded call is charged to a [`UsageLedger`] that can be saved to and
//! reloaded from a JSON file between runs.

use chrono::NaiveDate;
use comparator_application::TelemetryHook;
use comparator_domain::{ProviderId, UsageLedger, UsageSummary};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum UsageStoreError {
    #[error("usage file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("usage file encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

type Clock = Box<dyn Fn() -> NaiveDate + Send + Sync>;

fn local_today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Thread-safe usage ledger with optional persistence
pub struct UsageTracker {
    ledger: Mutex<UsageLedger>,
    path: Option<PathBuf>,
    today: Clock,
}

impl UsageTracker {
    /// Ledger that lives only as long as the process
    pub fn in_memory() -> Self {
        Self {
            ledger: Mutex::new(UsageLedger::new(local_today())),
            path: None,
            today: Box::new(local_today),
        }
    }

    /// Load the ledger from `path`.
    ///
    /// A missing file starts an empty ledger. An unreadable file is
    /// reported and replaced on the next save.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let today = local_today();

        let ledger = match std::fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str::<UsageLedger>(&content) {
                Ok(mut ledger) => {
                    ledger.roll_over(today);
                    ledger
                }
                Err(e) => {
                    warn!("Ignoring unreadable usage file {}: {}", path.display(), e);
                    UsageLedger::new(today)
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => UsageLedger::new(today),
            Err(e) => {
                warn!("Could not read usage file {}: {}", path.display(), e);
                UsageLedger::new(today)
            }
        };

        Self {
            ledger: Mutex::new(ledger),
            path: Some(path.to_path_buf()),
            today: Box::new(local_today),
        }
    }

    /// Replace the date source used for daily/monthly rollover
    pub fn with_clock<F>(mut self, today: F) -> Self
    where
        F: Fn() -> NaiveDate + Send + Sync + 'static,
    {
        self.today = Box::new(today);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn summary(&self) -> UsageSummary {
        let today = (self.today)();
        let mut ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
        ledger.roll_over(today);
        ledger.summary()
    }

    pub fn reset(&self) {
        let today = (self.today)();
        self.ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .reset(today);
    }

    /// Write the ledger to its file. No-op for in-memory trackers.
    pub fn save(&self) -> Result<(), UsageStoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = {
            let ledger = self.ledger.lock().unwrap_or_else(PoisonError::into_inner);
            serde_json::to_string_pretty(&*ledger)?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)?;
        debug!("Saved usage ledger to {}", path.display());
        Ok(())
    }
}

impl TelemetryHook for UsageTracker {
    fn record_call(&self, provider_id: &ProviderId, estimated_tokens: u32) {
        let today = (self.today)();
        let cost = self
            .ledger
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(provider_id, estimated_tokens, today);
        debug!(provider = %provider_id, estimated_tokens, cost, "Recorded call");
    }
}
