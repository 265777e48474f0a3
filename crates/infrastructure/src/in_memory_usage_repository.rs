use std::collections::HashMap;

use async_trait::async_trait;
use chrono::NaiveDate;
use gatewise_application::UsageRepository;
use gatewise_core::{AppResult, TenantId};
use gatewise_domain::{UsageCounters, UsagePeriod};
use tokio::sync::RwLock;

#[derive(Debug, Default, Clone, Copy)]
struct MonthlyRow {
    leads: u64,
    voice_minutes: u64,
}

#[derive(Debug, Default, Clone, Copy)]
struct DailyRow {
    searches: u64,
    messages: u64,
}

/// In-memory usage/credits store.
///
/// Counters are keyed by period start, so a period rollover reads fresh
/// rows without any explicit reset or archival. The `record_*` helpers are
/// the quota-consuming mutator path; the resolver side only reads.
#[derive(Debug, Default)]
pub struct InMemoryUsageRepository {
    monthly: RwLock<HashMap<(TenantId, NaiveDate), MonthlyRow>>,
    daily: RwLock<HashMap<(TenantId, NaiveDate), DailyRow>>,
    seats: RwLock<HashMap<TenantId, u64>>,
}

impl InMemoryUsageRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records generated leads for the period's month.
    pub async fn record_leads(&self, tenant_id: TenantId, period: UsagePeriod, count: u64) {
        let mut monthly = self.monthly.write().await;
        let row = monthly.entry((tenant_id, period.month_start)).or_default();
        row.leads = row.leads.saturating_add(count);
    }

    /// Records consumed voice minutes for the period's month.
    pub async fn record_voice_minutes(&self, tenant_id: TenantId, period: UsagePeriod, minutes: u64) {
        let mut monthly = self.monthly.write().await;
        let row = monthly.entry((tenant_id, period.month_start)).or_default();
        row.voice_minutes = row.voice_minutes.saturating_add(minutes);
    }

    /// Records searches for the period's day.
    pub async fn record_searches(&self, tenant_id: TenantId, period: UsagePeriod, count: u64) {
        let mut daily = self.daily.write().await;
        let row = daily.entry((tenant_id, period.day_start)).or_default();
        row.searches = row.searches.saturating_add(count);
    }

    /// Records sent messages for the period's day.
    pub async fn record_messages(&self, tenant_id: TenantId, period: UsagePeriod, count: u64) {
        let mut daily = self.daily.write().await;
        let row = daily.entry((tenant_id, period.day_start)).or_default();
        row.messages = row.messages.saturating_add(count);
    }

    /// Sets the occupied seat count for a tenant.
    pub async fn set_seats_in_use(&self, tenant_id: TenantId, seats: u64) {
        self.seats.write().await.insert(tenant_id, seats);
    }
}

#[async_trait]
impl UsageRepository for InMemoryUsageRepository {
    async fn counters_for_period(
        &self,
        tenant_id: TenantId,
        period: UsagePeriod,
    ) -> AppResult<UsageCounters> {
        let monthly = self
            .monthly
            .read()
            .await
            .get(&(tenant_id, period.month_start))
            .copied()
            .unwrap_or_default();
        let daily = self
            .daily
            .read()
            .await
            .get(&(tenant_id, period.day_start))
            .copied()
            .unwrap_or_default();
        let seats_in_use = self
            .seats
            .read()
            .await
            .get(&tenant_id)
            .copied()
            .unwrap_or_default();

        Ok(UsageCounters {
            leads_this_month: monthly.leads,
            searches_today: daily.searches,
            messages_today: daily.messages,
            voice_minutes_this_month: monthly.voice_minutes,
            seats_in_use,
            days_remaining: period.days_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use gatewise_application::UsageRepository;
    use gatewise_core::TenantId;
    use gatewise_domain::UsagePeriod;

    use super::InMemoryUsageRepository;

    fn period_at(year: i32, month: u32, day: u32) -> UsagePeriod {
        let now = Utc
            .with_ymd_and_hms(year, month, day, 9, 0, 0)
            .single()
            .unwrap_or_default();
        UsagePeriod::current(now)
    }

    #[tokio::test]
    async fn counters_accumulate_within_a_period() {
        let repository = InMemoryUsageRepository::new();
        let tenant_id = TenantId::new();
        let period = period_at(2026, 8, 28);

        repository.record_leads(tenant_id, period, 3).await;
        repository.record_leads(tenant_id, period, 2).await;
        repository.record_searches(tenant_id, period, 1).await;

        let counters = repository.counters_for_period(tenant_id, period).await;
        let counters = match counters {
            Ok(value) => value,
            Err(error) => panic!("read must succeed: {error}"),
        };
        assert_eq!(counters.leads_this_month, 5);
        assert_eq!(counters.searches_today, 1);
        assert_eq!(counters.messages_today, 0);
    }

    #[tokio::test]
    async fn new_day_reads_fresh_daily_counters() {
        let repository = InMemoryUsageRepository::new();
        let tenant_id = TenantId::new();
        let yesterday = period_at(2026, 8, 27);
        let today = period_at(2026, 8, 28);

        repository.record_searches(tenant_id, yesterday, 9).await;

        let counters = repository.counters_for_period(tenant_id, today).await;
        let counters = match counters {
            Ok(value) => value,
            Err(error) => panic!("read must succeed: {error}"),
        };
        // Same month, new day: monthly counters persist, daily roll over.
        assert_eq!(counters.searches_today, 0);
    }

    #[tokio::test]
    async fn new_month_reads_fresh_monthly_counters() {
        let repository = InMemoryUsageRepository::new();
        let tenant_id = TenantId::new();
        let august = period_at(2026, 8, 31);
        let september = period_at(2026, 9, 1);

        repository.record_leads(tenant_id, august, 50).await;

        let counters = repository.counters_for_period(tenant_id, september).await;
        let counters = match counters {
            Ok(value) => value,
            Err(error) => panic!("read must succeed: {error}"),
        };
        assert_eq!(counters.leads_this_month, 0);
    }
}
