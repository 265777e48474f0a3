use std::sync::Arc;

use gatewise_core::TenantId;
use gatewise_domain::{FeatureAccessMap, SubscriptionTier, TenantConfig, TenantEntitlement};
use tracing::warn;

use crate::TenantConfigRepository;

/// The two entitlement authorities resolved together for one tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TenantGrants {
    /// Effective quota limits and feature flags (tier authority).
    pub entitlement: TenantEntitlement,
    /// Plan-derived feature access (plan authority).
    pub features: FeatureAccessMap,
}

/// Resolves tenant configuration into effective grants.
#[derive(Clone)]
pub struct EntitlementService {
    configs: Arc<dyn TenantConfigRepository>,
}

impl EntitlementService {
    /// Creates a new entitlement resolver over a configuration store.
    #[must_use]
    pub fn new(configs: Arc<dyn TenantConfigRepository>) -> Self {
        Self { configs }
    }

    /// Resolves the effective grants for a tenant.
    ///
    /// Nothing is cached; every call re-reads configuration so credential
    /// or tier changes take effect on the next resolution. A missing record
    /// and a store failure both degrade to Starter defaults with a warning
    /// so a config outage does not lock tenants out of already-entitled
    /// actions.
    pub async fn resolve(&self, tenant_id: TenantId) -> TenantGrants {
        let config = match self.configs.find_config(tenant_id).await {
            Ok(Some(config)) => config,
            Ok(None) => {
                warn!(tenant_id = %tenant_id, "no tenant configuration, using starter defaults");
                TenantConfig::for_tier(SubscriptionTier::Starter)
            }
            Err(error) => {
                warn!(tenant_id = %tenant_id, %error, "tenant configuration fetch failed, using starter defaults");
                TenantConfig::for_tier(SubscriptionTier::Starter)
            }
        };

        TenantGrants {
            entitlement: TenantEntitlement::resolve(tenant_id, &config),
            features: FeatureAccessMap::for_plan(config.plan),
        }
    }
}
