//! Ports onto the external stores the resolvers read from.
//!
//! Every store is read-only from this crate's perspective; the only mutator
//! paths (admin actions, quota-consuming increments) live with the stores
//! themselves.

use async_trait::async_trait;
use gatewise_core::{AppResult, TenantId};
use gatewise_domain::{StaffOverrides, TenantConfig, UsageCounters, UsagePeriod, UserId};
use serde::{Deserialize, Serialize};

/// Core identity row for a user, as returned by the identity store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityRecord {
    /// Stable user identifier.
    pub user_id: UserId,
    /// Tenant the user belongs to.
    pub tenant_id: TenantId,
    /// Whether the account is active.
    pub is_active: bool,
}

/// Port for the identity store.
///
/// The role lives in a separate record keyed by user id, so it is fetched
/// independently of the identity row.
#[async_trait]
pub trait IdentityRepository: Send + Sync {
    /// Finds the identity row for a user.
    async fn find_identity(&self, user_id: UserId) -> AppResult<Option<IdentityRecord>>;

    /// Finds the raw stored role value for a user.
    ///
    /// Returned untyped; the resolver owns the unknown-value policy.
    async fn find_role(&self, user_id: UserId) -> AppResult<Option<String>>;
}

/// Port for the per-user staff override store.
#[async_trait]
pub trait StaffOverrideRepository: Send + Sync {
    /// Finds the override record for a user, if one was ever written.
    async fn find_overrides(&self, user_id: UserId) -> AppResult<Option<StaffOverrides>>;
}

/// Port for the tenant configuration store.
#[async_trait]
pub trait TenantConfigRepository: Send + Sync {
    /// Finds the configuration record for a tenant.
    async fn find_config(&self, tenant_id: TenantId) -> AppResult<Option<TenantConfig>>;
}

/// Port for the usage/credits store.
#[async_trait]
pub trait UsageRepository: Send + Sync {
    /// Reads the counters scoped to the given period.
    ///
    /// A tenant with no recorded consumption reads as zero counters, not as
    /// an error.
    async fn counters_for_period(
        &self,
        tenant_id: TenantId,
        period: UsagePeriod,
    ) -> AppResult<UsageCounters>;
}
