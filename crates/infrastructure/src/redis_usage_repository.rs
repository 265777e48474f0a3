//! Redis-backed usage counter repository.

use async_trait::async_trait;
use gatewise_application::UsageRepository;
use gatewise_core::{AppError, AppResult, TenantId};
use gatewise_domain::{UsageCounters, UsagePeriod};

/// Redis implementation of the usage repository port.
///
/// Reads the period-scoped counter keys maintained by the consuming
/// actions. Keys follow `{prefix}:{tenant}:{period}:{metric}` with the
/// month formatted as `YYYY-MM` and the day as `YYYY-MM-DD`; seats are
/// period-free. Absent keys read as zero and negative values are clamped,
/// so counters can never go below zero on this side.
#[derive(Clone)]
pub struct RedisUsageRepository {
    client: redis::Client,
    key_prefix: String,
}

impl RedisUsageRepository {
    /// Creates a repository with a configured Redis client and key prefix.
    #[must_use]
    pub fn new(client: redis::Client, key_prefix: impl Into<String>) -> Self {
        Self {
            client,
            key_prefix: key_prefix.into(),
        }
    }

    fn monthly_key(&self, tenant_id: TenantId, period: UsagePeriod, metric: &str) -> String {
        format!(
            "{}:{tenant_id}:{}:{metric}",
            self.key_prefix,
            period.month_start.format("%Y-%m")
        )
    }

    fn daily_key(&self, tenant_id: TenantId, period: UsagePeriod, metric: &str) -> String {
        format!(
            "{}:{tenant_id}:{}:{metric}",
            self.key_prefix,
            period.day_start.format("%Y-%m-%d")
        )
    }

    fn seats_key(&self, tenant_id: TenantId) -> String {
        format!("{}:{tenant_id}:seats", self.key_prefix)
    }
}

fn clamped(value: Option<i64>) -> u64 {
    value.unwrap_or(0).max(0).unsigned_abs()
}

#[async_trait]
impl UsageRepository for RedisUsageRepository {
    async fn counters_for_period(
        &self,
        tenant_id: TenantId,
        period: UsagePeriod,
    ) -> AppResult<UsageCounters> {
        let mut connection = self
            .client
            .get_multiplexed_async_connection()
            .await
            .map_err(|error| {
                AppError::Unavailable(format!("failed to connect to redis: {error}"))
            })?;

        let keys = [
            self.monthly_key(tenant_id, period, "leads"),
            self.daily_key(tenant_id, period, "searches"),
            self.daily_key(tenant_id, period, "messages"),
            self.monthly_key(tenant_id, period, "voice_minutes"),
            self.seats_key(tenant_id),
        ];

        let mut command = redis::cmd("MGET");
        for key in &keys {
            command.arg(key);
        }

        let values: Vec<Option<i64>> =
            command.query_async(&mut connection).await.map_err(|error| {
                AppError::Unavailable(format!("failed to read redis usage counters: {error}"))
            })?;

        let mut values = values.into_iter();
        let mut next = || clamped(values.next().flatten());

        Ok(UsageCounters {
            leads_this_month: next(),
            searches_today: next(),
            messages_today: next(),
            voice_minutes_this_month: next(),
            seats_in_use: next(),
            days_remaining: period.days_remaining,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use gatewise_core::TenantId;
    use gatewise_domain::UsagePeriod;
    use uuid::Uuid;

    use super::{RedisUsageRepository, clamped};

    fn repository() -> RedisUsageRepository {
        let client = match redis::Client::open("redis://localhost:6379") {
            Ok(client) => client,
            Err(error) => panic!("client must build without connecting: {error}"),
        };
        RedisUsageRepository::new(client, "gatewise:usage")
    }

    #[test]
    fn keys_are_period_scoped() {
        let tenant_id = TenantId::from_uuid(Uuid::nil());
        let now = Utc.with_ymd_and_hms(2026, 8, 28, 10, 0, 0).single();
        let period = UsagePeriod::current(now.unwrap_or_default());
        let repository = repository();

        assert_eq!(
            repository.monthly_key(tenant_id, period, "leads"),
            format!("gatewise:usage:{tenant_id}:2026-08:leads")
        );
        assert_eq!(
            repository.daily_key(tenant_id, period, "searches"),
            format!("gatewise:usage:{tenant_id}:2026-08-28:searches")
        );
        assert_eq!(
            repository.seats_key(tenant_id),
            format!("gatewise:usage:{tenant_id}:seats")
        );
    }

    #[test]
    fn absent_and_negative_values_clamp_to_zero() {
        assert_eq!(clamped(None), 0);
        assert_eq!(clamped(Some(-5)), 0);
        assert_eq!(clamped(Some(7)), 7);
    }
}
