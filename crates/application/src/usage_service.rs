use std::sync::Arc;

use chrono::{DateTime, Utc};
use gatewise_core::TenantId;
use gatewise_domain::{UsageCounters, UsagePeriod};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::UsageRepository;

/// A period-scoped usage read, tagged with the tenant it belongs to.
///
/// The tag is the stale-response guard: a caller that switched tenants while
/// the read was in flight compares ids and drops the snapshot instead of
/// applying it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageSnapshot {
    /// Tenant the counters were read for.
    pub tenant_id: TenantId,
    /// Period the counters are scoped to.
    pub period: UsagePeriod,
    /// The counters themselves.
    pub counters: UsageCounters,
}

/// Reads period-scoped consumption against the external usage store.
#[derive(Clone)]
pub struct UsageMeterService {
    usage: Arc<dyn UsageRepository>,
}

impl UsageMeterService {
    /// Creates a new usage meter over a usage store.
    #[must_use]
    pub fn new(usage: Arc<dyn UsageRepository>) -> Self {
        Self { usage }
    }

    /// Reads the counters for the period containing `now`.
    ///
    /// Never fails: a store error is logged and degrades to the zero-usage
    /// state so already-permitted actions stay available during an outage.
    /// `days_remaining` is calendar-derived here, not trusted from the
    /// store.
    pub async fn snapshot(&self, tenant_id: TenantId, now: DateTime<Utc>) -> UsageSnapshot {
        let period = UsagePeriod::current(now);

        let mut counters = match self.usage.counters_for_period(tenant_id, period).await {
            Ok(counters) => counters,
            Err(error) => {
                warn!(tenant_id = %tenant_id, %error, "usage fetch failed, assuming zero usage");
                UsageCounters::zero(period.days_remaining)
            }
        };
        counters.days_remaining = period.days_remaining;

        UsageSnapshot {
            tenant_id,
            period,
            counters,
        }
    }
}
