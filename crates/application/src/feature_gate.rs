use gatewise_core::TenantId;
use gatewise_domain::{
    AuthenticatedPrincipal, FeatureAccessMap, Permission, Plan, QuotaKind, Remaining, Role,
    SubscriptionTier, TierFlag, TierLimits, UsageCounters,
};

use crate::TenantGrants;

/// The single decision surface for "am I allowed to do X".
///
/// Pure and synchronous: built once from a resolved session and answering
/// every check from that snapshot. It never refetches; refreshing inputs is
/// the session's responsibility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureGate {
    principal: AuthenticatedPrincipal,
    grants: TenantGrants,
    usage: UsageCounters,
}

impl FeatureGate {
    /// Builds a gate from resolved session inputs.
    #[must_use]
    pub fn new(
        principal: AuthenticatedPrincipal,
        grants: TenantGrants,
        usage: UsageCounters,
    ) -> Self {
        Self {
            principal,
            grants,
            usage,
        }
    }

    /// Returns the tenant the gate is scoped to.
    #[must_use]
    pub fn tenant_id(&self) -> TenantId {
        self.principal.tenant_id
    }

    /// Returns the principal's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.principal.role
    }

    /// Returns the tenant's subscription tier.
    #[must_use]
    pub fn tier(&self) -> SubscriptionTier {
        self.grants.entitlement.tier
    }

    /// Returns the tenant's plan (feature-access authority).
    #[must_use]
    pub fn plan(&self) -> Plan {
        self.grants.features.plan()
    }

    /// Returns the effective limits.
    #[must_use]
    pub fn limits(&self) -> &TierLimits {
        &self.grants.entitlement.limits
    }

    /// Returns the usage counters the gate was built with.
    #[must_use]
    pub fn usage(&self) -> &UsageCounters {
        &self.usage
    }

    /// Permission check for the session principal.
    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.principal.has_permission(permission)
    }

    /// Route-guard check against a required role.
    #[must_use]
    pub fn satisfies_role(&self, required: Role) -> bool {
        self.principal.satisfies_role(required)
    }

    /// Route-guard check against a list of acceptable roles.
    #[must_use]
    pub fn satisfies_any_role(&self, acceptable: &[Role]) -> bool {
        self.principal.satisfies_any_role(acceptable)
    }

    /// Plan-authority feature check by name; unknown names are denied.
    #[must_use]
    pub fn can_access(&self, feature_name: &str) -> bool {
        self.grants.features.allows_name(feature_name)
    }

    /// Logical negation of [`Self::can_access`], for upgrade prompts.
    #[must_use]
    pub fn requires_upgrade(&self, feature_name: &str) -> bool {
        !self.can_access(feature_name)
    }

    /// Minimum plan needed for a feature name; unknown names report
    /// [`Plan::Enterprise`].
    #[must_use]
    pub fn required_plan(&self, feature_name: &str) -> Plan {
        FeatureAccessMap::required_plan_for(feature_name)
    }

    /// Tier-authority boolean feature check.
    #[must_use]
    pub fn has_feature(&self, flag: TierFlag) -> bool {
        self.grants.entitlement.limits.flag(flag)
    }

    /// Returns whether the metered resource is exhausted.
    ///
    /// The gate only answers; it never blocks the action itself. Callers
    /// must check before consuming quota.
    #[must_use]
    pub fn has_reached_limit(&self, kind: QuotaKind) -> bool {
        self.usage
            .has_reached_limit(kind, &self.grants.entitlement.limits)
    }

    /// Returns the credits left for a metered resource.
    #[must_use]
    pub fn remaining_credits(&self, kind: QuotaKind) -> Remaining {
        self.usage
            .remaining_credits(kind, &self.grants.entitlement.limits)
    }

    /// Returns consumption as a clamped whole percentage of the limit.
    #[must_use]
    pub fn usage_percentage(&self, kind: QuotaKind) -> u8 {
        self.usage
            .usage_percentage(kind, &self.grants.entitlement.limits)
    }
}
