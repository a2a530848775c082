//! Flat per-provider cost estimates
//!
//! Rough USD prices per 1K tokens. Cost accounting is intentionally an
//! estimate: every call is charged the same assumed token count.

use crate::provider::ProviderId;

/// Token count charged for every call
pub const DEFAULT_ESTIMATED_TOKENS: u32 = 1000;

/// Rate applied to providers without an entry
pub const DEFAULT_COST_PER_1K_TOKENS: f64 = 0.002;

const COST_PER_1K_TOKENS: [(&str, f64); 8] = [
    ("openai", 0.002),
    ("claude", 0.003),
    ("gemini", 0.0001),
    ("mistral", 0.001),
    ("perplexity", 0.002),
    ("deepseek", 0.0002),
    ("grok", 0.005),
    ("openrouter", 0.002),
];

pub fn cost_per_1k_tokens(provider_id: &ProviderId) -> f64 {
    COST_PER_1K_TOKENS
        .iter()
        .find(|(id, _)| *id == provider_id.as_str())
        .map(|(_, rate)| *rate)
        .unwrap_or(DEFAULT_COST_PER_1K_TOKENS)
}

pub fn estimate_cost(provider_id: &ProviderId, estimated_tokens: u32) -> f64 {
    f64::from(estimated_tokens) / 1000.0 * cost_per_1k_tokens(provider_id)
}
