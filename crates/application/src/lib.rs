//! Application services and ports.

#![forbid(unsafe_code)]

mod access_ports;
mod entitlement_service;
mod feature_gate;
mod principal_service;
mod session_service;
mod usage_service;

pub use access_ports::{
    IdentityRecord, IdentityRepository, StaffOverrideRepository, TenantConfigRepository,
    UsageRepository,
};
pub use entitlement_service::{EntitlementService, TenantGrants};
pub use feature_gate::FeatureGate;
pub use principal_service::PrincipalService;
pub use session_service::{SessionContext, SessionHandle, SessionService};
pub use usage_service::{UsageMeterService, UsageSnapshot};
