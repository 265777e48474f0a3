use std::collections::HashMap;

use async_trait::async_trait;
use gatewise_application::TenantConfigRepository;
use gatewise_core::{AppResult, TenantId};
use gatewise_domain::TenantConfig;
use tokio::sync::RwLock;

/// In-memory tenant configuration store.
#[derive(Debug, Default)]
pub struct InMemoryTenantConfigRepository {
    configs: RwLock<HashMap<TenantId, TenantConfig>>,
}

impl InMemoryTenantConfigRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a tenant's configuration.
    ///
    /// This is the admin-action mutator path; entitlement resolution picks
    /// the change up on its next read.
    pub async fn upsert_config(&self, tenant_id: TenantId, config: TenantConfig) {
        self.configs.write().await.insert(tenant_id, config);
    }
}

#[async_trait]
impl TenantConfigRepository for InMemoryTenantConfigRepository {
    async fn find_config(&self, tenant_id: TenantId) -> AppResult<Option<TenantConfig>> {
        Ok(self.configs.read().await.get(&tenant_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use gatewise_application::TenantConfigRepository;
    use gatewise_core::TenantId;
    use gatewise_domain::{SubscriptionTier, TenantConfig};

    use super::InMemoryTenantConfigRepository;

    #[tokio::test]
    async fn upsert_replaces_previous_config() {
        let repository = InMemoryTenantConfigRepository::new();
        let tenant_id = TenantId::new();
        repository
            .upsert_config(tenant_id, TenantConfig::for_tier(SubscriptionTier::Starter))
            .await;
        repository
            .upsert_config(
                tenant_id,
                TenantConfig::for_tier(SubscriptionTier::Enterprise),
            )
            .await;

        let config = repository.find_config(tenant_id).await.ok().flatten();
        assert_eq!(
            config.map(|value| value.tier),
            Some(SubscriptionTier::Enterprise)
        );
    }

    #[tokio::test]
    async fn unknown_tenant_reads_as_absent() {
        let repository = InMemoryTenantConfigRepository::new();
        let config = repository.find_config(TenantId::new()).await;
        assert!(config.ok().flatten().is_none());
    }
}
