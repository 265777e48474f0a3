//! Plan-based feature gating.
//!
//! A second entitlement vocabulary alongside the tier/limits model: plans
//! start at `Free` and gate named product features rather than quotas. The
//! two authorities are deliberately independent; callers pick one per check.

use std::str::FromStr;

use gatewise_core::AppError;
use serde::{Deserialize, Serialize};

/// Subscription plan used by the feature-access authority.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Plan {
    /// No paid subscription.
    #[default]
    Free,
    /// Entry plan.
    Starter,
    /// Mid plan.
    Professional,
    /// Top plan.
    Enterprise,
}

impl Plan {
    /// Returns a stable storage value for this plan.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Starter => "starter",
            Self::Professional => "professional",
            Self::Enterprise => "enterprise",
        }
    }

    /// Returns all plans in ascending order.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[Plan] = &[Plan::Free, Plan::Starter, Plan::Professional, Plan::Enterprise];

        ALL
    }
}

impl FromStr for Plan {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "free" => Ok(Self::Free),
            "starter" => Ok(Self::Starter),
            "professional" => Ok(Self::Professional),
            "enterprise" => Ok(Self::Enterprise),
            _ => Err(AppError::Validation(format!("unknown plan value '{value}'"))),
        }
    }
}

/// A product feature gated by plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanFeature {
    /// Contact and pipeline management.
    Crm,
    /// Lead generation tooling.
    LeadGeneration,
    /// Outbound campaigns.
    Campaigns,
    /// AI-assisted tooling.
    AiTools,
    /// Voice agents.
    VoiceAgents,
    /// WhatsApp channel.
    Whatsapp,
    /// White-label branding.
    WhiteLabel,
    /// Public API access.
    ApiAccess,
    /// Bespoke integrations.
    CustomIntegrations,
}

impl PlanFeature {
    /// Returns the stable feature name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crm => "crm",
            Self::LeadGeneration => "lead_generation",
            Self::Campaigns => "campaigns",
            Self::AiTools => "ai_tools",
            Self::VoiceAgents => "voice_agents",
            Self::Whatsapp => "whatsapp",
            Self::WhiteLabel => "white_label",
            Self::ApiAccess => "api_access",
            Self::CustomIntegrations => "custom_integrations",
        }
    }

    /// Returns all gated features.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[PlanFeature] = &[
            PlanFeature::Crm,
            PlanFeature::LeadGeneration,
            PlanFeature::Campaigns,
            PlanFeature::AiTools,
            PlanFeature::VoiceAgents,
            PlanFeature::Whatsapp,
            PlanFeature::WhiteLabel,
            PlanFeature::ApiAccess,
            PlanFeature::CustomIntegrations,
        ];

        ALL
    }

    /// Parses a feature name leniently.
    ///
    /// Unknown names are `None`, never an error: gate checks against an
    /// unrecognized feature must resolve to "not accessible" instead of
    /// failing the caller.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::all()
            .iter()
            .find(|feature| feature.as_str() == value)
            .copied()
    }

    /// Returns the minimum plan that grants this feature.
    #[must_use]
    pub fn required_plan(&self) -> Plan {
        match self {
            Self::Crm => Plan::Free,
            Self::LeadGeneration | Self::Campaigns => Plan::Starter,
            Self::AiTools | Self::VoiceAgents | Self::Whatsapp => Plan::Professional,
            Self::WhiteLabel | Self::ApiAccess | Self::CustomIntegrations => Plan::Enterprise,
        }
    }
}

/// Precomputed per-feature access map for one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureAccessMap {
    plan: Plan,
}

impl FeatureAccessMap {
    /// Builds the access map for a plan.
    #[must_use]
    pub fn for_plan(plan: Plan) -> Self {
        Self { plan }
    }

    /// Returns the plan this map was derived from.
    #[must_use]
    pub fn plan(&self) -> Plan {
        self.plan
    }

    /// Returns whether the plan grants the feature.
    #[must_use]
    pub fn allows(&self, feature: PlanFeature) -> bool {
        self.plan >= feature.required_plan()
    }

    /// Gate check by raw feature name; unknown names are not accessible.
    #[must_use]
    pub fn allows_name(&self, feature_name: &str) -> bool {
        PlanFeature::parse(feature_name).is_some_and(|feature| self.allows(feature))
    }

    /// Minimum plan needed for a raw feature name.
    ///
    /// Unknown names report [`Plan::Enterprise`] so the upgrade prompt never
    /// undersells what an unrecognized feature needs.
    #[must_use]
    pub fn required_plan_for(feature_name: &str) -> Plan {
        PlanFeature::parse(feature_name)
            .map_or(Plan::Enterprise, |feature| feature.required_plan())
    }
}
