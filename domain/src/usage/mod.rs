//! Estimated usage and cost accounting.
//!
//! Every attempted provider call is charged a flat token estimate at a
//! per-provider rate; [`UsageLedger`] keeps running totals.

pub mod ledger;
pub mod rates;

pub use ledger::{ProviderUsage, UsageCounter, UsageLedger, UsageSummary};
pub use rates::{DEFAULT_ESTIMATED_TOKENS, cost_per_1k_tokens, estimate_cost};
