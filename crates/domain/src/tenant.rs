use gatewise_core::{NonEmptyString, TenantId};
use serde::{Deserialize, Serialize};

use crate::{Plan, SubscriptionTier, TierLimits};

/// Tenant-specific numeric quota deviations from the tier defaults.
///
/// An absent value and a configured zero both mean "not set": the billing
/// tool writes `0` when an operator clears an override, so zero must never
/// be read as a zero quota.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TenantOverrides {
    /// Override for leads per calendar month.
    pub leads_per_month: Option<i64>,
    /// Override for searches per calendar day.
    pub searches_per_day: Option<i64>,
    /// Override for messages per calendar day.
    pub messages_per_day: Option<i64>,
    /// Override for seats.
    pub seats: Option<i64>,
    /// Override for voice minutes per calendar month.
    pub voice_minutes_per_month: Option<i64>,
}

/// Third-party credentials stored for a tenant.
///
/// Possession of a credential is an escalation path: the matching feature
/// flag resolves to true independent of billing tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntegrationCredentials {
    /// Apollo enrichment API key.
    pub apollo_api_key: Option<NonEmptyString>,
    /// Hunter email-finder API key.
    pub hunter_api_key: Option<NonEmptyString>,
    /// Apify scraping API key.
    pub apify_api_key: Option<NonEmptyString>,
}

impl IntegrationCredentials {
    /// Returns whether any enrichment credential is on file.
    #[must_use]
    pub fn has_enrichment_key(&self) -> bool {
        self.apollo_api_key.is_some() || self.hunter_api_key.is_some() || self.apify_api_key.is_some()
    }
}

/// Tenant configuration record supplied by the external config store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantConfig {
    /// Subscription tier of the tenant (quota/limits authority).
    pub tier: SubscriptionTier,
    /// Subscription plan (feature-access authority).
    ///
    /// The two vocabularies are independent; a record without a plan reads
    /// as [`Plan::Free`].
    #[serde(default)]
    pub plan: Plan,
    /// Numeric quota overrides.
    pub overrides: TenantOverrides,
    /// Stored third-party credentials.
    pub credentials: IntegrationCredentials,
}

impl TenantConfig {
    /// Creates a configuration with tier defaults and nothing overridden.
    #[must_use]
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        Self {
            tier,
            plan: Plan::default(),
            overrides: TenantOverrides::default(),
            credentials: IntegrationCredentials::default(),
        }
    }
}

/// The effective post-override limits for one tenant.
///
/// Derived on every read from tier defaults plus the tenant configuration;
/// never persisted separately and never cached beyond the current session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantEntitlement {
    /// Owning tenant.
    pub tenant_id: TenantId,
    /// Tier the limits were derived from.
    pub tier: SubscriptionTier,
    /// Effective limits after overrides and credential escalation.
    pub limits: TierLimits,
}

impl TenantEntitlement {
    /// Resolves the effective entitlement for a tenant.
    ///
    /// Numeric quotas take the tenant override when it is present and
    /// greater than zero, else the tier default. Credential-gated flags are
    /// OR'd with credential presence, so flags are never weaker than the
    /// tier defaults.
    #[must_use]
    pub fn resolve(tenant_id: TenantId, config: &TenantConfig) -> Self {
        let defaults = config.tier.default_limits();
        let overrides = &config.overrides;

        let limits = TierLimits {
            leads_per_month: override_or(overrides.leads_per_month, defaults.leads_per_month),
            searches_per_day: override_or(overrides.searches_per_day, defaults.searches_per_day),
            messages_per_day: override_or(overrides.messages_per_day, defaults.messages_per_day),
            seats: override_or(overrides.seats, defaults.seats),
            voice_minutes_per_month: override_or(
                overrides.voice_minutes_per_month,
                defaults.voice_minutes_per_month,
            ),
            has_apollo_access: defaults.has_apollo_access
                || config.credentials.apollo_api_key.is_some(),
            has_white_label: defaults.has_white_label,
            has_voice_agents: defaults.has_voice_agents,
            has_whatsapp: defaults.has_whatsapp,
            has_api_access: defaults.has_api_access,
        };

        Self {
            tenant_id,
            tier: config.tier,
            limits,
        }
    }
}

fn override_or(configured: Option<i64>, default: i64) -> i64 {
    match configured {
        Some(value) if value > 0 => value,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use gatewise_core::{NonEmptyString, TenantId};
    use proptest::prelude::*;

    use super::{TenantConfig, TenantEntitlement, TenantOverrides};
    use crate::{SubscriptionTier, TierFlag};

    fn apollo_key() -> Option<NonEmptyString> {
        NonEmptyString::new("apollo-key").ok()
    }

    #[test]
    fn tier_defaults_apply_without_overrides() {
        let config = TenantConfig::for_tier(SubscriptionTier::Professional);
        let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
        assert_eq!(entitlement.limits, SubscriptionTier::Professional.default_limits());
    }

    #[test]
    fn positive_override_replaces_default() {
        let mut config = TenantConfig::for_tier(SubscriptionTier::Starter);
        config.overrides.leads_per_month = Some(500);
        let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
        assert_eq!(entitlement.limits.leads_per_month, 500);
        assert_eq!(entitlement.limits.searches_per_day, 25);
    }

    #[test]
    fn zero_override_means_not_set() {
        let mut config = TenantConfig::for_tier(SubscriptionTier::Starter);
        config.overrides.leads_per_month = Some(0);
        let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
        assert_eq!(entitlement.limits.leads_per_month, 100);
    }

    #[test]
    fn negative_override_means_not_set() {
        let mut config = TenantConfig::for_tier(SubscriptionTier::Starter);
        config.overrides.searches_per_day = Some(-1);
        let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
        assert_eq!(entitlement.limits.searches_per_day, 25);
    }

    #[test]
    fn apollo_credential_escalates_starter() {
        let mut config = TenantConfig::for_tier(SubscriptionTier::Starter);
        config.credentials.apollo_api_key = apollo_key();
        let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
        assert!(entitlement.limits.has_apollo_access);
    }

    #[test]
    fn credential_absence_keeps_tier_grant() {
        let config = TenantConfig::for_tier(SubscriptionTier::Professional);
        let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
        assert!(entitlement.limits.has_apollo_access);
    }

    proptest! {
        #[test]
        fn flags_never_weaker_than_tier_defaults(
            tier in prop::sample::select(SubscriptionTier::all().to_vec()),
            with_key in any::<bool>(),
        ) {
            let mut config = TenantConfig::for_tier(tier);
            if with_key {
                config.credentials.apollo_api_key = apollo_key();
            }
            let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
            let defaults = tier.default_limits();
            for flag in [
                TierFlag::ApolloAccess,
                TierFlag::WhiteLabel,
                TierFlag::VoiceAgents,
                TierFlag::Whatsapp,
                TierFlag::ApiAccess,
            ] {
                prop_assert!(entitlement.limits.flag(flag) || !defaults.flag(flag));
            }
        }

        #[test]
        fn numeric_overrides_only_apply_when_positive(value in any::<i64>()) {
            let mut config = TenantConfig::for_tier(SubscriptionTier::Starter);
            config.overrides.leads_per_month = Some(value);
            let entitlement = TenantEntitlement::resolve(TenantId::new(), &config);
            if value > 0 {
                prop_assert_eq!(entitlement.limits.leads_per_month, value);
            } else {
                prop_assert_eq!(entitlement.limits.leads_per_month, 100);
            }
        }
    }
}
