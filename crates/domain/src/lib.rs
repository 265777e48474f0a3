//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod permission;
mod plan;
mod principal;
mod role;
mod subscription;
mod tenant;
mod usage;
mod user;

pub use permission::{Permission, StaffOverrides};
pub use plan::{FeatureAccessMap, Plan, PlanFeature};
pub use principal::AuthenticatedPrincipal;
pub use role::Role;
pub use subscription::{QuotaKind, QuotaPeriod, SubscriptionTier, TierFlag, TierLimits};
pub use tenant::{IntegrationCredentials, TenantConfig, TenantEntitlement, TenantOverrides};
pub use usage::{Remaining, UsageCounters, UsagePeriod};
pub use user::UserId;
