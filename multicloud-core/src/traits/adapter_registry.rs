//! Adapter registry abstract Trait

use async_trait::async_trait;
use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::RwLock;

use multicloud_provider::{ClusterAdapter, DnsAdapter, StorageAdapter};

/// Adapter Registry Trait
///
/// Holds one adapter per provider id and family, keyed by the adapter's own
/// `id()` (e.g. `"aws_route53"`). Registering the same id twice replaces the
/// earlier adapter.
#[async_trait]
pub trait AdapterRegistry: Send + Sync {
    async fn register_dns(&self, adapter: Arc<dyn DnsAdapter>);

    async fn register_cluster(&self, adapter: Arc<dyn ClusterAdapter>);

    async fn register_storage(&self, adapter: Arc<dyn StorageAdapter>);

    /// Remove every adapter registered under `provider_id`
    async fn unregister(&self, provider_id: &str);

    async fn dns(&self, provider_id: &str) -> Option<Arc<dyn DnsAdapter>>;

    async fn cluster(&self, provider_id: &str) -> Option<Arc<dyn ClusterAdapter>>;

    async fn storage(&self, provider_id: &str) -> Option<Arc<dyn StorageAdapter>>;

    /// All registered provider ids, sorted, across families
    async fn list_provider_ids(&self) -> Vec<String>;
}

#[derive(Default)]
struct Adapters {
    dns: HashMap<String, Arc<dyn DnsAdapter>>,
    cluster: HashMap<String, Arc<dyn ClusterAdapter>>,
    storage: HashMap<String, Arc<dyn StorageAdapter>>,
}

/// In-memory adapter registry
#[derive(Clone)]
pub struct InMemoryAdapterRegistry {
    adapters: Arc<RwLock<Adapters>>,
}

impl InMemoryAdapterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self {
            adapters: Arc::new(RwLock::new(Adapters::default())),
        }
    }
}

impl Default for InMemoryAdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AdapterRegistry for InMemoryAdapterRegistry {
    async fn register_dns(&self, adapter: Arc<dyn DnsAdapter>) {
        let id = adapter.id().to_string();
        log::debug!("Registering DNS adapter {id}");
        self.adapters.write().await.dns.insert(id, adapter);
    }

    async fn register_cluster(&self, adapter: Arc<dyn ClusterAdapter>) {
        let id = adapter.id().to_string();
        log::debug!("Registering cluster adapter {id}");
        self.adapters.write().await.cluster.insert(id, adapter);
    }

    async fn register_storage(&self, adapter: Arc<dyn StorageAdapter>) {
        let id = adapter.id().to_string();
        log::debug!("Registering storage adapter {id}");
        self.adapters.write().await.storage.insert(id, adapter);
    }

    async fn unregister(&self, provider_id: &str) {
        let mut adapters = self.adapters.write().await;
        adapters.dns.remove(provider_id);
        adapters.cluster.remove(provider_id);
        adapters.storage.remove(provider_id);
    }

    async fn dns(&self, provider_id: &str) -> Option<Arc<dyn DnsAdapter>> {
        self.adapters.read().await.dns.get(provider_id).cloned()
    }

    async fn cluster(&self, provider_id: &str) -> Option<Arc<dyn ClusterAdapter>> {
        self.adapters.read().await.cluster.get(provider_id).cloned()
    }

    async fn storage(&self, provider_id: &str) -> Option<Arc<dyn StorageAdapter>> {
        self.adapters.read().await.storage.get(provider_id).cloned()
    }

    async fn list_provider_ids(&self) -> Vec<String> {
        let adapters = self.adapters.read().await;
        adapters
            .dns
            .keys()
            .chain(adapters.cluster.keys())
            .chain(adapters.storage.keys())
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{MockClusterAdapter, MockDnsAdapter, MockStorageAdapter};

    #[tokio::test]
    async fn registers_by_adapter_id() {
        let registry = InMemoryAdapterRegistry::new();
        registry.register_dns(Arc::new(MockDnsAdapter::new("mock_dns"))).await;
        registry
            .register_storage(Arc::new(MockStorageAdapter::new("mock_storage")))
            .await;

        assert!(registry.dns("mock_dns").await.is_some());
        assert!(registry.dns("mock_storage").await.is_none());
        assert!(registry.storage("mock_storage").await.is_some());
        assert!(registry.cluster("mock_dns").await.is_none());
    }

    #[tokio::test]
    async fn lists_ids_once_across_families() {
        let registry = InMemoryAdapterRegistry::new();
        registry.register_dns(Arc::new(MockDnsAdapter::new("b_cloud"))).await;
        registry
            .register_cluster(Arc::new(MockClusterAdapter::new("a_cloud")))
            .await;
        registry
            .register_storage(Arc::new(MockStorageAdapter::new("b_cloud")))
            .await;

        assert_eq!(registry.list_provider_ids().await, vec!["a_cloud", "b_cloud"]);
    }

    #[tokio::test]
    async fn unregister_removes_every_family() {
        let registry = InMemoryAdapterRegistry::new();
        registry.register_dns(Arc::new(MockDnsAdapter::new("x"))).await;
        registry.register_storage(Arc::new(MockStorageAdapter::new("x"))).await;

        registry.unregister("x").await;
        assert!(registry.dns("x").await.is_none());
        assert!(registry.storage("x").await.is_none());
        assert!(registry.list_provider_ids().await.is_empty());
    }
}
