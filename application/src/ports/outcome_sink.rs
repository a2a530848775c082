//! Outcome notification port
//!
//! Defines the interface for receiving per-provider results while a
//! fan-out is still running.

use comparator_domain::{CallOutcome, ProviderDescriptor};

/// Callback for outcomes during a fan-out
///
/// `on_outcome` is called exactly once per dispatched provider, in
/// completion order. Implementations live in the presentation and
/// infrastructure layers (console board, progress bars, JSONL log).
///
/// Any `Fn(&CallOutcome)` closure is a sink.
pub trait OutcomeSink: Send + Sync {
    /// Called once, before any request is sent, with the providers in
    /// dispatch order.
    fn on_dispatch(&self, _providers: &[ProviderDescriptor]) {}

    /// Called when one provider has settled
    fn on_outcome(&self, outcome: &CallOutcome);
}

impl<F> OutcomeSink for F
where
    F: Fn(&CallOutcome) + Send + Sync,
{
    fn on_outcome(&self, outcome: &CallOutcome) {
        self(outcome)
    }
}

/// No-op sink for when outcomes are only read from the final report
pub struct NoOutcomeSink;

impl OutcomeSink for NoOutcomeSink {
    fn on_outcome(&self, _outcome: &CallOutcome) {}
}
