//! Usage accounting behind the telemetry port.

mod usage_tracker;

pub use usage_tracker::{UsageStoreError, UsageTracker};
