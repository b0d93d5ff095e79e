//! Named stream-provider set injected into consuming units.

use crate::provider::StreamProvider;
use std::collections::HashMap;
use std::sync::Arc;

/// Providers a unit may subscribe through, keyed by provider name.
///
/// Built once at wiring time and shared immutably afterwards; explicit
/// resolution through this registry replaces any ambient provider lookup.
pub struct StreamProviderRegistry<T> {
    providers: HashMap<String, Arc<dyn StreamProvider<T>>>,
}

impl<T> StreamProviderRegistry<T> {
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Registers a provider under its own name. Returns `true` only when
    /// the name was free; the first registration wins.
    pub fn register(&mut self, provider: Arc<dyn StreamProvider<T>>) -> bool {
        let name = provider.name().to_string();
        if self.providers.contains_key(&name) {
            return false;
        }
        self.providers.insert(name, provider);
        true
    }

    pub fn resolve(&self, name: &str) -> Option<Arc<dyn StreamProvider<T>>> {
        self.providers.get(name).cloned()
    }
}

impl<T> Default for StreamProviderRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::StreamProviderRegistry;
    use crate::provider::{ProviderError, StreamHandle, StreamProvider};
    use crate::stream_id::StreamId;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NamedProvider {
        name: String,
    }

    #[async_trait]
    impl StreamProvider<u32> for NamedProvider {
        fn name(&self) -> &str {
            &self.name
        }

        async fn stream_handle(
            &self,
            _stream_id: &StreamId,
        ) -> Result<Arc<dyn StreamHandle<u32>>, ProviderError> {
            Err(ProviderError::handle("not used in registry tests"))
        }
    }

    fn provider(name: &str) -> Arc<NamedProvider> {
        Arc::new(NamedProvider {
            name: name.to_string(),
        })
    }

    #[test]
    fn first_registration_wins_for_a_name() {
        let mut registry = StreamProviderRegistry::new();

        assert!(registry.register(provider("halo-streams")));
        assert!(!registry.register(provider("halo-streams")));
        assert!(registry.register(provider("billing-streams")));
    }

    #[test]
    fn resolve_returns_none_for_unregistered_names() {
        let mut registry = StreamProviderRegistry::new();
        registry.register(provider("halo-streams"));

        assert!(registry.resolve("halo-streams").is_some());
        assert!(registry.resolve("billing-streams").is_none());
    }
}
