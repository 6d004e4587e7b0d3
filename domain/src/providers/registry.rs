//! Ordered table of provider descriptors.

use super::builtin;
use super::{ProviderDescriptor, ProviderId, ProviderSettings};
use crate::credentials::CredentialSet;
use std::sync::Arc;

/// Fixed-order collection of providers, shared read-only by all submissions.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    providers: Vec<Arc<dyn ProviderDescriptor>>,
}

impl ProviderRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in providers with their default settings.
    pub fn builtin() -> Self {
        Self::builtin_with(builtin::default_settings)
    }

    /// Built-in providers, with settings chosen per id.
    ///
    /// Returning `None` for an id leaves that provider out.
    pub fn builtin_with<F>(mut settings_for: F) -> Self
    where
        F: FnMut(&str) -> Option<ProviderSettings>,
    {
        let providers = builtin::BUILTIN_IDS
            .iter()
            .filter_map(|id| settings_for(id).and_then(|s| builtin::create(id, s)))
            .collect();
        Self { providers }
    }

    /// Add a provider at the end, or replace one with the same id in place.
    pub fn register(mut self, descriptor: Arc<dyn ProviderDescriptor>) -> Self {
        match self
            .providers
            .iter()
            .position(|p| p.id() == descriptor.id())
        {
            Some(idx) => self.providers[idx] = descriptor,
            None => self.providers.push(descriptor),
        }
        self
    }

    /// Keep only the providers for which `keep` returns `true`.
    pub fn retain<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&ProviderId) -> bool,
    {
        self.providers.retain(|p| keep(p.id()));
        self
    }

    /// Every registered provider, in registry order.
    pub fn list_providers(&self) -> &[Arc<dyn ProviderDescriptor>] {
        &self.providers
    }

    /// Providers with a non-empty credential, in registry order.
    pub fn list_eligible(&self, credentials: &CredentialSet) -> Vec<Arc<dyn ProviderDescriptor>> {
        self.providers
            .iter()
            .filter(|p| credentials.is_configured(p.id()))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &ProviderId) -> Option<&Arc<dyn ProviderDescriptor>> {
        self.providers.iter().find(|p| p.id() == id)
    }

    pub fn contains(&self, id: &ProviderId) -> bool {
        self.get(id).is_some()
    }

    pub fn ids(&self) -> Vec<ProviderId> {
        self.providers.iter().map(|p| p.id().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::ProviderError;
    use crate::core::question::Question;
    use crate::providers::ProviderRequest;
    use serde_json::Value;

    #[derive(Debug)]
    struct EchoProvider {
        id: ProviderId,
    }

    impl ProviderDescriptor for EchoProvider {
        fn id(&self) -> &ProviderId {
            &self.id
        }

        fn display_name(&self) -> &str {
            "Echo"
        }

        fn endpoint(&self) -> String {
            "http://localhost/echo".to_string()
        }

        fn model(&self) -> &str {
            "echo-1"
        }

        fn build_request(&self, question: &Question, _credential: &str) -> ProviderRequest {
            ProviderRequest::post(self.endpoint(), Value::String(question.to_string()))
        }

        fn extract_answer(&self, body: &Value) -> Result<String, ProviderError> {
            body.as_str()
                .map(str::to_string)
                .ok_or_else(|| ProviderError::parse("Echo", "expected a string"))
        }
    }

    fn ids(providers: &[Arc<dyn ProviderDescriptor>]) -> Vec<&str> {
        providers.iter().map(|p| p.id().as_str()).collect()
    }

    #[test]
    fn test_builtin_order_is_stable() {
        let registry = ProviderRegistry::builtin();
        let expected = vec!["openai", "anthropic", "google", "cohere", "mistral"];
        assert_eq!(ids(registry.list_providers()), expected);
        assert_eq!(ids(ProviderRegistry::builtin().list_providers()), expected);
    }

    #[test]
    fn test_list_eligible_filters_and_keeps_order() {
        let registry = ProviderRegistry::builtin();
        let creds = CredentialSet::new()
            .with("cohere", "c")
            .with("openai", "o")
            .with("google", "")
            .with("unknown", "x");

        assert_eq!(ids(&registry.list_eligible(&creds)), vec!["openai", "cohere"]);
    }

    #[test]
    fn test_list_eligible_every_subset() {
        let registry = ProviderRegistry::builtin();
        let all = builtin::BUILTIN_IDS;
        for mask in 0u32..(1 << all.len()) {
            let mut creds = CredentialSet::new();
            let mut expected = Vec::new();
            for (bit, id) in all.iter().enumerate() {
                if mask & (1 << bit) != 0 {
                    creds.set(*id, "key");
                    expected.push(*id);
                } else {
                    creds.set(*id, "");
                }
            }
            assert_eq!(ids(&registry.list_eligible(&creds)), expected);
        }
    }

    #[test]
    fn test_register_custom_provider_appends() {
        let registry = ProviderRegistry::builtin().register(Arc::new(EchoProvider {
            id: ProviderId::from("echo"),
        }));
        assert_eq!(registry.len(), 6);
        assert_eq!(registry.list_providers()[5].display_name(), "Echo");
        assert!(registry.contains(&ProviderId::from("echo")));
    }

    #[test]
    fn test_register_replaces_same_id_in_place() {
        let registry = ProviderRegistry::builtin().register(Arc::new(EchoProvider {
            id: ProviderId::from("anthropic"),
        }));
        assert_eq!(registry.len(), 5);
        assert_eq!(registry.list_providers()[1].display_name(), "Echo");
    }

    #[test]
    fn test_builtin_with_skips_none() {
        let registry = ProviderRegistry::builtin_with(|id| {
            (id != builtin::GOOGLE).then(|| builtin::default_settings(id)).flatten()
        });
        assert!(!registry.contains(&ProviderId::from("google")));
        assert_eq!(registry.len(), 4);
    }

    #[test]
    fn test_retain() {
        let registry = ProviderRegistry::builtin().retain(|id| id.as_str() == "openai");
        assert_eq!(registry.ids(), vec![ProviderId::from("openai")]);
        assert!(!registry.is_empty());
    }
}
