//! Provider registry
//!
//! Maps provider ids to their adapters. Built once at startup and shared
//! read-only afterwards.

use crate::ports::provider_adapter::ProviderAdapter;
use comparator_domain::{MAX_PROVIDERS_PER_REQUEST, ProviderDescriptor, ProviderId};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use thiserror::Error;

/// Errors that reject a request before any provider is called
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RequestError {
    #[error("No providers selected")]
    NoProviders,

    #[error("Too many providers selected ({count}); at most {max} per request")]
    TooManyProviders { count: usize, max: usize },

    #[error("Provider selected more than once: {0}")]
    DuplicateProvider(ProviderId),

    #[error("Unknown provider: {0}")]
    UnknownProvider(ProviderId),
}

/// An adapter together with its descriptor
#[derive(Clone)]
pub struct RegisteredProvider {
    descriptor: ProviderDescriptor,
    adapter: Arc<dyn ProviderAdapter>,
}

impl RegisteredProvider {
    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    pub fn adapter(&self) -> Arc<dyn ProviderAdapter> {
        Arc::clone(&self.adapter)
    }
}

impl std::fmt::Debug for RegisteredProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisteredProvider")
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

/// Provider id → adapter lookup
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<ProviderId, RegisteredProvider>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an adapter under its descriptor's id.
    ///
    /// Returns the provider previously registered under that id, if any.
    pub fn register(&mut self, adapter: Arc<dyn ProviderAdapter>) -> Option<RegisteredProvider> {
        let descriptor = adapter.descriptor().clone();
        self.providers.insert(
            descriptor.id.clone(),
            RegisteredProvider {
                descriptor,
                adapter,
            },
        )
    }

    pub fn with_provider(mut self, adapter: Arc<dyn ProviderAdapter>) -> Self {
        self.register(adapter);
        self
    }

    pub fn get(&self, id: &ProviderId) -> Option<&RegisteredProvider> {
        self.providers.get(id)
    }

    pub fn contains(&self, id: &ProviderId) -> bool {
        self.providers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// All registered descriptors, in priority order
    pub fn descriptors(&self) -> Vec<&ProviderDescriptor> {
        let mut descriptors: Vec<_> = self.providers.values().map(|p| &p.descriptor).collect();
        descriptors.sort_by(|a, b| a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id)));
        descriptors
    }

    /// Providers used when the caller names none: those enabled by default,
    /// in priority order, capped at the per-request maximum.
    pub fn default_selection(&self) -> Vec<ProviderId> {
        self.descriptors()
            .into_iter()
            .filter(|d| d.enabled_by_default)
            .take(MAX_PROVIDERS_PER_REQUEST)
            .map(|d| d.id.clone())
            .collect()
    }

    /// Validate a selection and look every provider up.
    ///
    /// Fails on the first problem found; nothing is returned for partially
    /// valid selections. The result is in priority order.
    pub fn resolve(&self, ids: &[ProviderId]) -> Result<Vec<&RegisteredProvider>, RequestError> {
        if ids.is_empty() {
            return Err(RequestError::NoProviders);
        }
        if ids.len() > MAX_PROVIDERS_PER_REQUEST {
            return Err(RequestError::TooManyProviders {
                count: ids.len(),
                max: MAX_PROVIDERS_PER_REQUEST,
            });
        }

        let mut seen = HashSet::with_capacity(ids.len());
        let mut resolved = Vec::with_capacity(ids.len());
        for id in ids {
            if !seen.insert(id) {
                return Err(RequestError::DuplicateProvider(id.clone()));
            }
            let provider = self
                .get(id)
                .ok_or_else(|| RequestError::UnknownProvider(id.clone()))?;
            resolved.push(provider);
        }

        resolved.sort_by(|a, b| {
            a.descriptor
                .priority
                .cmp(&b.descriptor.priority)
                .then_with(|| a.descriptor.id.cmp(&b.descriptor.id))
        });
        Ok(resolved)
    }
}
