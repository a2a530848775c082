//! Logging infrastructure: structured outcome logging.
//!
//! Provides [`JsonlOutcomeLogger`], a JSONL file writer that implements
//! the [`OutcomeSink`](comparator_application::OutcomeSink) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlOutcomeLogger;
