use std::str::FromStr;

use gatewise_core::AppError;
use serde::{Deserialize, Serialize};

/// Subscription tier of a tenant; gates quotas and feature flags.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionTier {
    /// Entry tier.
    Starter,
    /// Mid tier.
    Professional,
    /// Top tier.
    Enterprise,
}

impl SubscriptionTier {
    /// Returns a stable storage value for this tier.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }

    /// Returns all tiers in ascending order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[SubscriptionTier] = &[
            SubscriptionTier::Starter,
            SubscriptionTier::Professional,
            SubscriptionTier::Enterprise,
        ];

        ALL
    }

    /// Returns the fixed quota and feature defaults for this tier.
    ///
    /// Rows are static and never mutated; tenant-specific deviations are
    /// applied by entitlement resolution, not by editing these rows.
    #[must_use]
    pub fn default_limits(&self) -> TierLimits {
        match self {
            Self::Starter => TierLimits {
                leads_per_month: 100,
                searches_per_day: 25,
                messages_per_day: 200,
                seats: 3,
                voice_minutes_per_month: 0,
                has_apollo_access: false,
                has_white_label: false,
                has_voice_agents: false,
                has_whatsapp: false,
                has_api_access: false,
            },
            Self::Professional => TierLimits {
                leads_per_month: 1_000,
                searches_per_day: 150,
                messages_per_day: 2_000,
                seats: 10,
                voice_minutes_per_month: 500,
                has_apollo_access: true,
                has_white_label: false,
                has_voice_agents: true,
                has_whatsapp: true,
                has_api_access: false,
            },
            Self::Enterprise => TierLimits {
                leads_per_month: 0,
                searches_per_day: 0,
                messages_per_day: 0,
                seats: 0,
                voice_minutes_per_month: 0,
                has_apollo_access: true,
                has_white_label: true,
                has_voice_agents: true,
                has_whatsapp: true,
                has_api_access: true,
            },
        }
    }
}

impl FromStr for SubscriptionTier {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "starter" => Ok(Self::Starter),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(AppError::Validation(format!("unknown tier value '{value}'"))),
        }
    }
}

/// Numeric quotas and boolean feature flags for one tier.
///
/// A quota of zero or below means unlimited; the Enterprise row is encoded
/// entirely that way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Leads that may be generated per calendar month.
    pub leads_per_month: i64,
    /// Prospect searches per calendar day.
    pub searches_per_day: i64,
    /// Outbound messages per calendar day.
    pub messages_per_day: i64,
    /// Seats available in the billing period.
    pub seats: i64,
    /// Voice-agent minutes per calendar month.
    pub voice_minutes_per_month: i64,
    /// Apollo enrichment is available.
    pub has_apollo_access: bool,
    /// White-label branding is available.
    pub has_white_label: bool,
    /// Voice agents are available.
    pub has_voice_agents: bool,
    /// WhatsApp channel is available.
    pub has_whatsapp: bool,
    /// Public API access is available.
    pub has_api_access: bool,
}

/// Boolean feature flags carried by [`TierLimits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierFlag {
    /// Apollo enrichment.
    ApolloAccess,
    /// White-label branding.
    WhiteLabel,
    /// Voice agents.
    VoiceAgents,
    /// WhatsApp channel.
    Whatsapp,
    /// Public API access.
    ApiAccess,
}

impl TierLimits {
    /// Returns the value of a boolean feature flag.
    #[must_use]
    pub fn flag(&self, flag: TierFlag) -> bool {
        match flag {
            TierFlag::ApolloAccess => self.has_apollo_access,
            TierFlag::WhiteLabel => self.has_white_label,
            TierFlag::VoiceAgents => self.has_voice_agents,
            TierFlag::Whatsapp => self.has_whatsapp,
            TierFlag::ApiAccess => self.has_api_access,
        }
    }
}

/// Period granularity over which a quota is counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaPeriod {
    /// Calendar-month window.
    Monthly,
    /// Calendar-day window.
    Daily,
    /// The whole billing period.
    Billing,
}

/// A metered resource kind tracked against its entitled limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuotaKind {
    /// Generated leads.
    Leads,
    /// Prospect searches.
    Searches,
    /// Outbound messages.
    Messages,
    /// Voice-agent minutes.
    VoiceMinutes,
    /// Occupied seats.
    Seats,
}

impl QuotaKind {
    /// Returns all quota kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[QuotaKind] = &[
            QuotaKind::Leads,
            QuotaKind::Searches,
            QuotaKind::Messages,
            QuotaKind::VoiceMinutes,
            QuotaKind::Seats,
        ];

        ALL
    }

    /// Returns the counting window for this kind.
    #[must_use]
    pub fn period(&self) -> QuotaPeriod {
        match self {
            Self::Leads | Self::VoiceMinutes => QuotaPeriod::Monthly,
            Self::Searches | Self::Messages => QuotaPeriod::Daily,
            Self::Seats => QuotaPeriod::Billing,
        }
    }

    /// Returns the configured limit for this kind within a limits row.
    #[must_use]
    pub fn limit_in(&self, limits: &TierLimits) -> i64 {
        match self {
            Self::Leads => limits.leads_per_month,
            Self::Searches => limits.searches_per_day,
            Self::Messages => limits.messages_per_day,
            Self::VoiceMinutes => limits.voice_minutes_per_month,
            Self::Seats => limits.seats,
        }
    }
}
