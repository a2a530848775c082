//! Provider configuration from TOML (`[providers.<id>]` sections)

use comparator_domain::{ProviderDescriptor, ProviderKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Settings for one vendor
///
/// Every field is optional; a vendor without a section uses its built-in
/// descriptor and reads its key from the default environment variable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileProviderEntry {
    /// Register this provider at all
    pub enabled: bool,
    /// Environment variable holding the API key
    pub api_key_env: Option<String>,
    /// Direct API key (not recommended, use an env var instead)
    pub api_key: Option<String>,
    /// Endpoint override (proxies, regional hosts, tests)
    pub endpoint: Option<String>,
    /// Default model override
    pub model: Option<String>,
}

impl Default for FileProviderEntry {
    fn default() -> Self {
        Self {
            enabled: true,
            api_key_env: None,
            api_key: None,
            endpoint: None,
            model: None,
        }
    }
}

impl FileProviderEntry {
    pub fn api_key_env_for(&self, kind: ProviderKind) -> String {
        self.api_key_env
            .clone()
            .unwrap_or_else(|| kind.default_api_key_env().to_string())
    }

    /// Direct key if set, otherwise the value of the key variable.
    ///
    /// Blank values count as missing.
    pub fn resolve_api_key<F>(&self, kind: ProviderKind, lookup_env: F) -> Option<String>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.api_key
            .clone()
            .or_else(|| lookup_env(&self.api_key_env_for(kind)))
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }

    /// Built-in descriptor with this entry's overrides applied
    pub fn descriptor_for(&self, kind: ProviderKind) -> ProviderDescriptor {
        let mut descriptor = kind.descriptor();
        if let Some(endpoint) = &self.endpoint {
            descriptor = descriptor.with_endpoint(endpoint.clone());
        }
        if let Some(model) = &self.model {
            descriptor = descriptor.with_default_model(model.clone());
        }
        descriptor
    }
}

/// All `[providers.<id>]` sections, keyed by provider id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileProvidersConfig {
    entries: BTreeMap<String, FileProviderEntry>,
}

impl FileProvidersConfig {
    /// Entry for `kind`, or the defaults if it has no section
    pub fn entry(&self, kind: ProviderKind) -> FileProviderEntry {
        self.entries.get(kind.as_str()).cloned().unwrap_or_default()
    }

    pub fn has_section(&self, kind: ProviderKind) -> bool {
        self.entries.contains_key(kind.as_str())
    }

    pub fn insert(&mut self, id: impl Into<String>, entry: FileProviderEntry) {
        self.entries.insert(id.into(), entry);
    }

    /// Section names that match no built-in vendor
    pub fn unknown_ids(&self) -> Vec<&str> {
        self.entries
            .keys()
            .filter(|id| id.parse::<ProviderKind>().is_err())
            .map(String::as_str)
            .collect()
    }
}
