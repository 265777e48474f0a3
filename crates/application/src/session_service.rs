use std::sync::Arc;

use chrono::{DateTime, Utc};
use gatewise_core::AppResult;
use gatewise_domain::{AuthenticatedPrincipal, UserId};

use crate::{
    EntitlementService, FeatureGate, IdentityRepository, PrincipalService,
    StaffOverrideRepository, TenantConfigRepository, TenantGrants, UsageMeterService,
    UsageRepository, UsageSnapshot,
};

/// Phase-one record of an established session: the raw user id only.
///
/// Session start-up is two-phase by design. The notification handler that
/// owns the session store only records this handle; the dependent identity
/// and tenant fetches run later as their own scheduled task, so the handler
/// never re-enters the store it is being called from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionHandle {
    user_id: UserId,
}

impl SessionHandle {
    /// Returns the session's user id.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

/// A fully resolved session: the one context value threaded through every
/// gate decision. There is no ambient session state anywhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// Resolved principal.
    pub principal: AuthenticatedPrincipal,
    /// Resolved tenant grants (both authorities).
    pub grants: TenantGrants,
    /// Most recently applied usage snapshot.
    pub usage: UsageSnapshot,
}

impl SessionContext {
    /// Builds the decision surface for this context.
    #[must_use]
    pub fn gate(&self) -> FeatureGate {
        FeatureGate::new(
            self.principal.clone(),
            self.grants,
            self.usage.counters,
        )
    }

    /// Applies a usage snapshot if it still belongs to this session's
    /// tenant, returning whether it was applied.
    ///
    /// The guard drops reads that were in flight across a tenant switch;
    /// there is no cancellation token, the owning id is the check.
    pub fn apply_usage(&mut self, snapshot: UsageSnapshot) -> bool {
        if snapshot.tenant_id != self.principal.tenant_id {
            return false;
        }

        self.usage = snapshot;
        true
    }
}

/// Owns the resolvers and runs session establishment end to end.
#[derive(Clone)]
pub struct SessionService {
    principals: PrincipalService,
    entitlements: EntitlementService,
    usage_meter: UsageMeterService,
}

impl SessionService {
    /// Wires the session service from the four store ports.
    #[must_use]
    pub fn new(
        identities: Arc<dyn IdentityRepository>,
        staff_overrides: Arc<dyn StaffOverrideRepository>,
        configs: Arc<dyn TenantConfigRepository>,
        usage: Arc<dyn UsageRepository>,
    ) -> Self {
        Self {
            principals: PrincipalService::new(identities, staff_overrides),
            entitlements: EntitlementService::new(configs),
            usage_meter: UsageMeterService::new(usage),
        }
    }

    /// Phase one: records the raw session without any dependent fetch.
    #[must_use]
    pub fn begin(&self, user_id: UserId) -> SessionHandle {
        SessionHandle { user_id }
    }

    /// Phase two: runs the dependent fetches for a recorded session.
    ///
    /// The identity comes first because every tenant-scoped read is gated
    /// on a known tenant id; entitlement and usage are then resolved for
    /// the principal's tenant.
    pub async fn resolve(
        &self,
        handle: SessionHandle,
        now: DateTime<Utc>,
    ) -> AppResult<SessionContext> {
        let principal = self.principals.resolve(handle.user_id()).await?;
        let grants = self.entitlements.resolve(principal.tenant_id).await;
        let usage = self.usage_meter.snapshot(principal.tenant_id, now).await;

        Ok(SessionContext {
            principal,
            grants,
            usage,
        })
    }

    /// Re-reads usage for the context's tenant and applies it.
    ///
    /// Used both for interval polling and immediately after an action that
    /// consumed quota. A brief staleness window between the two is
    /// acceptable; strict consistency is not promised.
    pub async fn refresh_usage(&self, context: &mut SessionContext, now: DateTime<Utc>) -> bool {
        let snapshot = self
            .usage_meter
            .snapshot(context.principal.tenant_id, now)
            .await;
        context.apply_usage(snapshot)
    }
}
