//! Composite outcome sink: delegates to multiple sinks.
//!
//! Used to feed one fan-out into the console board, the progress display
//! and the outcome log at the same time.

use super::outcome_sink::OutcomeSink;
use comparator_domain::{CallOutcome, ProviderDescriptor};

/// A sink that delegates to multiple inner sinks, in order.
///
/// Uses borrowed references with a lifetime parameter so both owned and
/// borrowed sinks can be composed without wrapper types.
pub struct CompositeOutcomeSink<'a> {
    delegates: Vec<&'a dyn OutcomeSink>,
}

impl<'a> CompositeOutcomeSink<'a> {
    pub fn new(delegates: Vec<&'a dyn OutcomeSink>) -> Self {
        Self { delegates }
    }

    pub fn push(&mut self, sink: &'a dyn OutcomeSink) {
        self.delegates.push(sink);
    }
}

/// Macro to delegate a method call to all inner sinks.
macro_rules! delegate {
    ($self:ident, $method:ident $(, $arg:expr)*) => {
        for d in &$self.delegates {
            d.$method($($arg),*);
        }
    };
}

impl OutcomeSink for CompositeOutcomeSink<'_> {
    fn on_dispatch(&self, providers: &[ProviderDescriptor]) {
        delegate!(self, on_dispatch, providers);
    }

    fn on_outcome(&self, outcome: &CallOutcome) {
        delegate!(self, on_outcome, outcome);
    }
}
