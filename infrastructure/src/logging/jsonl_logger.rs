//! JSONL file writer for fan-out outcomes.
//!
//! Each dispatch and each [`CallOutcome`] is serialized as a single JSON
//! line with a `type` field and `timestamp`, appended to the file via a
//! buffered writer.

use comparator_application::OutcomeSink;
use comparator_domain::{CallError, CallOutcome, ProviderDescriptor};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL outcome logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Appends to an existing file.
/// Flushes on `Drop`.
pub struct JsonlOutcomeLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlOutcomeLogger {
    /// Create a new logger appending to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create outcome log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open outcome log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_record(&self, event_type: &str, mut record: serde_json::Map<String, Value>) {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);
        record.insert("type".to_string(), Value::String(event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));

        let Ok(line) = serde_json::to_string(&Value::Object(record)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            // Flush per record; JSONL is append-only
            let _ = writer.flush();
        }
    }
}

fn outcome_record(outcome: &CallOutcome) -> serde_json::Map<String, Value> {
    let mut record = serde_json::Map::new();
    record.insert(
        "provider".to_string(),
        Value::String(outcome.provider_id().to_string()),
    );
    record.insert("success".to_string(), Value::Bool(outcome.is_success()));

    match outcome.result() {
        Ok(text) => {
            record.insert("text".to_string(), Value::String(text.clone()));
        }
        Err(error) => {
            record.insert("error".to_string(), Value::String(error.to_string()));
            if let CallError::Exhausted { attempts, .. } = error {
                record.insert("attempts".to_string(), json!(attempts));
            }
            if let Some(cause) = error.last_error() {
                record.insert("cause".to_string(), Value::String(cause.to_string()));
                record.insert("cause_kind".to_string(), Value::String(cause.kind().to_string()));
            }
        }
    }
    record
}

impl OutcomeSink for JsonlOutcomeLogger {
    fn on_dispatch(&self, providers: &[ProviderDescriptor]) {
        let ids: Vec<Value> = providers
            .iter()
            .map(|d| Value::String(d.id.to_string()))
            .collect();
        let mut record = serde_json::Map::new();
        record.insert("providers".to_string(), Value::Array(ids));
        self.write_record("dispatch", record);
    }

    fn on_outcome(&self, outcome: &CallOutcome) {
        self.write_record("outcome", outcome_record(outcome));
    }
}

impl Drop for JsonlOutcomeLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
