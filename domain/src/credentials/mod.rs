//! Per-provider credentials supplied by the caller.

use crate::providers::ProviderId;
use std::collections::BTreeMap;

/// Mapping from provider id to an opaque credential string.
///
/// An absent or empty entry means the provider is not configured. Values are
/// stored and handed to providers exactly as given; no format validation is
/// performed here. `Debug` never prints the secret values.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CredentialSet {
    entries: BTreeMap<ProviderId, String>,
}

impl CredentialSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a credential, replacing any previous value for the provider.
    pub fn set(&mut self, provider: impl Into<ProviderId>, credential: impl Into<String>) {
        self.entries.insert(provider.into(), credential.into());
    }

    /// Builder-style variant of [`CredentialSet::set`].
    pub fn with(mut self, provider: impl Into<ProviderId>, credential: impl Into<String>) -> Self {
        self.set(provider, credential);
        self
    }

    /// Remove a credential, returning the previous value.
    pub fn remove(&mut self, provider: &ProviderId) -> Option<String> {
        self.entries.remove(provider)
    }

    /// The credential for a provider, if one is configured (non-empty).
    pub fn get(&self, provider: &ProviderId) -> Option<&str> {
        self.entries
            .get(provider)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
    }

    /// Returns `true` if the provider has a non-empty credential.
    pub fn is_configured(&self, provider: &ProviderId) -> bool {
        self.get(provider).is_some()
    }

    /// Ids of providers that have a non-empty credential, in id order.
    pub fn configured_ids(&self) -> impl Iterator<Item = &ProviderId> {
        self.entries
            .iter()
            .filter(|(_, c)| !c.is_empty())
            .map(|(id, _)| id)
    }

    pub fn is_empty(&self) -> bool {
        self.configured_ids().next().is_none()
    }
}

impl std::fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(self.entries.iter().map(|(id, c)| {
                let shown = if c.is_empty() { "<empty>" } else { "<redacted>" };
                (id.as_str(), shown)
            }))
            .finish()
    }
}

impl<K, V> FromIterator<(K, V)> for CredentialSet
where
    K: Into<ProviderId>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut set = Self::new();
        for (id, credential) in iter {
            set.set(id, credential);
        }
        set
    }
}
