//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod composite_sink;
pub mod outcome_sink;
pub mod provider_adapter;
pub mod telemetry;
