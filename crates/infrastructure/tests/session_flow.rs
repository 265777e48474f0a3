//! Full session flow over the in-memory adapters.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use gatewise_application::{IdentityRecord, SessionService};
use gatewise_core::{NonEmptyString, TenantId};
use gatewise_domain::{
    Permission, Plan, QuotaKind, Remaining, Role, StaffOverrides, SubscriptionTier, TenantConfig,
    UsagePeriod, UserId,
};
use gatewise_infrastructure::{
    InMemoryIdentityRepository, InMemoryTenantConfigRepository, InMemoryUsageRepository,
};

struct Harness {
    identities: Arc<InMemoryIdentityRepository>,
    configs: Arc<InMemoryTenantConfigRepository>,
    usage: Arc<InMemoryUsageRepository>,
    service: SessionService,
}

fn harness() -> Harness {
    let identities = Arc::new(InMemoryIdentityRepository::new());
    let configs = Arc::new(InMemoryTenantConfigRepository::new());
    let usage = Arc::new(InMemoryUsageRepository::new());
    let service = SessionService::new(
        identities.clone(),
        identities.clone(),
        configs.clone(),
        usage.clone(),
    );

    Harness {
        identities,
        configs,
        usage,
        service,
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 8, 28, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

#[tokio::test]
async fn staff_session_resolves_overrides_limits_and_usage() {
    let harness = harness();
    let tenant_id = TenantId::new();
    let user_id = UserId::new();

    harness
        .identities
        .upsert_identity(IdentityRecord {
            user_id,
            tenant_id,
            is_active: true,
        })
        .await;
    harness.identities.assign_role(user_id, Role::Staff).await;
    harness
        .identities
        .upsert_overrides(
            user_id,
            StaffOverrides {
                can_access_leads: true,
                ..StaffOverrides::default()
            },
        )
        .await;

    let mut config = TenantConfig::for_tier(SubscriptionTier::Starter);
    config.plan = Plan::Starter;
    config.overrides.leads_per_month = Some(50);
    config.credentials.apollo_api_key = NonEmptyString::new("apollo-key").ok();
    harness.configs.upsert_config(tenant_id, config).await;

    let period = UsagePeriod::current(now());
    harness.usage.record_leads(tenant_id, period, 20).await;

    let handle = harness.service.begin(user_id);
    let context = match harness.service.resolve(handle, now()).await {
        Ok(context) => context,
        Err(error) => panic!("session must resolve: {error}"),
    };
    let gate = context.gate();

    // Overridden staff permission plus the messaging defaults.
    assert!(gate.has_permission(Permission::AccessLeads));
    assert!(gate.has_permission(Permission::AccessInbox));
    assert!(!gate.has_permission(Permission::ManageTeam));

    // Tenant override and credential escalation.
    assert_eq!(gate.limits().leads_per_month, 50);
    assert!(gate.limits().has_apollo_access);

    // Usage against the overridden limit.
    assert!(!gate.has_reached_limit(QuotaKind::Leads));
    assert_eq!(gate.remaining_credits(QuotaKind::Leads), Remaining::Exactly(30));
    assert_eq!(gate.usage_percentage(QuotaKind::Leads), 40);

    // Plan authority answers independently of the tier authority.
    assert!(gate.can_access("lead_generation"));
    assert!(gate.requires_upgrade("ai_tools"));
    assert_eq!(gate.required_plan("ai_tools"), Plan::Professional);
}

#[tokio::test]
async fn consuming_quota_then_refreshing_flips_the_gate() {
    let harness = harness();
    let tenant_id = TenantId::new();
    let user_id = UserId::new();

    harness
        .identities
        .upsert_identity(IdentityRecord {
            user_id,
            tenant_id,
            is_active: true,
        })
        .await;
    harness.identities.assign_role(user_id, Role::Admin).await;
    harness
        .configs
        .upsert_config(tenant_id, TenantConfig::for_tier(SubscriptionTier::Starter))
        .await;

    let handle = harness.service.begin(user_id);
    let mut context = match harness.service.resolve(handle, now()).await {
        Ok(context) => context,
        Err(error) => panic!("session must resolve: {error}"),
    };
    assert!(!context.gate().has_reached_limit(QuotaKind::Searches));

    // Consume the whole daily search budget, then refresh on demand.
    let period = UsagePeriod::current(now());
    harness.usage.record_searches(tenant_id, period, 25).await;
    assert!(harness.service.refresh_usage(&mut context, now()).await);

    let gate = context.gate();
    assert!(gate.has_reached_limit(QuotaKind::Searches));
    assert_eq!(gate.usage_percentage(QuotaKind::Searches), 100);
    assert_eq!(gate.remaining_credits(QuotaKind::Searches), Remaining::Exactly(0));
}

#[tokio::test]
async fn deactivating_an_account_denies_on_next_resolve() {
    let harness = harness();
    let tenant_id = TenantId::new();
    let user_id = UserId::new();

    harness
        .identities
        .upsert_identity(IdentityRecord {
            user_id,
            tenant_id,
            is_active: true,
        })
        .await;
    harness
        .identities
        .assign_role(user_id, Role::MasterAdmin)
        .await;
    harness
        .configs
        .upsert_config(
            tenant_id,
            TenantConfig::for_tier(SubscriptionTier::Enterprise),
        )
        .await;

    let handle = harness.service.begin(user_id);
    let before = match harness.service.resolve(handle, now()).await {
        Ok(context) => context,
        Err(error) => panic!("session must resolve: {error}"),
    };
    assert!(before.gate().satisfies_role(Role::Admin));

    harness.identities.set_active(user_id, false).await;

    let after = match harness.service.resolve(handle, now()).await {
        Ok(context) => context,
        Err(error) => panic!("session must resolve: {error}"),
    };
    let gate = after.gate();
    assert!(!gate.satisfies_role(Role::Staff));
    assert!(!gate.has_permission(Permission::AccessInbox));
}

#[tokio::test]
async fn unknown_role_in_store_resolves_restricted() {
    let harness = harness();
    let tenant_id = TenantId::new();
    let user_id = UserId::new();

    harness
        .identities
        .upsert_identity(IdentityRecord {
            user_id,
            tenant_id,
            is_active: true,
        })
        .await;
    harness
        .identities
        .assign_raw_role(user_id, "owner_emeritus")
        .await;
    harness
        .configs
        .upsert_config(tenant_id, TenantConfig::for_tier(SubscriptionTier::Starter))
        .await;

    let handle = harness.service.begin(user_id);
    let context = match harness.service.resolve(handle, now()).await {
        Ok(context) => context,
        Err(error) => panic!("session must resolve: {error}"),
    };
    let gate = context.gate();

    assert_eq!(gate.role(), Role::Staff);
    for permission in Permission::all() {
        assert!(!gate.has_permission(*permission));
    }
}
