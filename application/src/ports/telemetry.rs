//! Telemetry port
//!
//! Receives one notification per attempted provider call, before the call
//! completes. Usage accounting lives behind this port.

use comparator_domain::ProviderId;

/// Usage hook invoked once per provider call
///
/// Implementations must not block: the hook runs on the dispatching task.
pub trait TelemetryHook: Send + Sync {
    fn record_call(&self, provider_id: &ProviderId, estimated_tokens: u32);
}

impl<F> TelemetryHook for F
where
    F: Fn(&ProviderId, u32) + Send + Sync,
{
    fn record_call(&self, provider_id: &ProviderId, estimated_tokens: u32) {
        self(provider_id, estimated_tokens)
    }
}

/// No-op telemetry
pub struct NoTelemetry;

impl TelemetryHook for NoTelemetry {
    fn record_call(&self, _provider_id: &ProviderId, _estimated_tokens: u32) {}
}
