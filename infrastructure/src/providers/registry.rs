//! Builds the provider registry from configuration

use super::anthropic::ClaudeAdapter;
use super::gemini::GeminiAdapter;
use super::openai_compatible::{ChatCompletionsAdapter, VendorProfile};
use crate::config::FileConfig;
use comparator_application::{ProviderAdapter, ProviderRegistry};
use comparator_domain::{ProviderDescriptor, ProviderKind};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Adapter for one vendor
pub fn build_adapter(
    kind: ProviderKind,
    descriptor: ProviderDescriptor,
    api_key: String,
    client: reqwest::Client,
) -> Arc<dyn ProviderAdapter> {
    match kind {
        ProviderKind::Claude => Arc::new(ClaudeAdapter::new(client, descriptor, api_key)),
        ProviderKind::Gemini => Arc::new(GeminiAdapter::new(client, descriptor, api_key)),
        ProviderKind::OpenAi
        | ProviderKind::Mistral
        | ProviderKind::Perplexity
        | ProviderKind::DeepSeek
        | ProviderKind::Grok
        | ProviderKind::OpenRouter => Arc::new(ChatCompletionsAdapter::new(
            client,
            descriptor,
            api_key,
            VendorProfile::for_kind(kind),
        )),
    }
}

/// Register every enabled vendor that has an API key.
///
/// `lookup_env` resolves environment variable names; pass
/// `|name| std::env::var(name).ok()` in production. A vendor without a key
/// is left out, so selecting it later fails as an unknown provider.
pub fn build_registry<F>(
    config: &FileConfig,
    client: &reqwest::Client,
    lookup_env: F,
) -> ProviderRegistry
where
    F: Fn(&str) -> Option<String>,
{
    let mut registry = ProviderRegistry::new();

    for kind in ProviderKind::ALL {
        let entry = config.providers.entry(kind);
        if !entry.enabled {
            debug!(provider = %kind, "Provider disabled in config");
            continue;
        }

        let Some(api_key) = entry.resolve_api_key(kind, &lookup_env) else {
            let env_name = entry.api_key_env_for(kind);
            if config.providers.has_section(kind) {
                warn!(provider = %kind, "No API key found in {}, skipping", env_name);
            } else {
                debug!(provider = %kind, "No API key found in {}, skipping", env_name);
            }
            continue;
        };

        let descriptor = entry.descriptor_for(kind);
        registry.register(build_adapter(kind, descriptor, api_key, client.clone()));
    }

    info!("Registered {} providers", registry.len());
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileProviderEntry;
    use comparator_domain::ProviderId;

    fn keys_for(names: &'static [&'static str]) -> impl Fn(&str) -> Option<String> {
        move |var: &str| names.iter().any(|n| *n == var).then(|| format!("{var}-value"))
    }

    #[test]
    fn test_only_providers_with_keys_are_registered() {
        let registry = build_registry(
            &FileConfig::default(),
            &reqwest::Client::new(),
            keys_for(&["GROK_API_KEY", "CLAUDE_API_KEY"]),
        );

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&ProviderId::from("grok")));
        assert!(registry.contains(&ProviderId::from("claude")));
        assert!(!registry.contains(&ProviderId::from("openai")));
    }

    #[test]
    fn test_disabled_provider_is_skipped() {
        let mut config = FileConfig::default();
        config.providers.insert(
            "grok",
            FileProviderEntry {
                enabled: false,
                ..Default::default()
            },
        );

        let registry = build_registry(
            &config,
            &reqwest::Client::new(),
            keys_for(&["GROK_API_KEY"]),
        );
        assert!(registry.is_empty());
    }

    #[test]
    fn test_overrides_are_applied() {
        let mut config = FileConfig::default();
        config.providers.insert(
            "openrouter",
            FileProviderEntry {
                api_key: Some("direct".to_string()),
                endpoint: Some("http://localhost:8080/v1/chat/completions".to_string()),
                model: Some("qwen/qwen-2.5-72b-instruct".to_string()),
                ..Default::default()
            },
        );

        let registry = build_registry(&config, &reqwest::Client::new(), |_| None);
        let provider = registry.get(&ProviderId::from("openrouter")).unwrap();
        assert_eq!(
            provider.descriptor().endpoint,
            "http://localhost:8080/v1/chat/completions"
        );
        assert_eq!(provider.descriptor().default_model, "qwen/qwen-2.5-72b-instruct");
    }
}
