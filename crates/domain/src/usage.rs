use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{QuotaKind, TierLimits};

/// Period boundaries a usage read is scoped to.
///
/// Monthly counters roll over at calendar month start, daily counters at
/// calendar day start. There is no explicit reset; a new period simply reads
/// different keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UsagePeriod {
    /// First day of the current calendar month.
    pub month_start: NaiveDate,
    /// The current calendar day.
    pub day_start: NaiveDate,
    /// Whole days until the monthly counters roll over.
    pub days_remaining: u32,
}

impl UsagePeriod {
    /// Computes the period containing the given instant.
    #[must_use]
    pub fn current(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let month_start = today.with_day(1).unwrap_or(today);

        let (next_year, next_month) = if today.month() == 12 {
            (today.year() + 1, 1)
        } else {
            (today.year(), today.month() + 1)
        };
        let next_month_start =
            NaiveDate::from_ymd_opt(next_year, next_month, 1).unwrap_or(month_start);

        let days_remaining =
            u32::try_from((next_month_start - today).num_days().max(0)).unwrap_or(0);

        Self {
            month_start,
            day_start: today,
            days_remaining,
        }
    }
}

/// Remaining credits for a metered resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Remaining {
    /// No limit is configured for the resource.
    Unlimited,
    /// Credits left before the limit, clamped at zero.
    Exactly(u64),
}

/// Per-tenant, per-period consumption counts.
///
/// Counts are unsigned so they cannot go negative; the store adapters clamp
/// on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounters {
    /// Leads generated in the current calendar month.
    pub leads_this_month: u64,
    /// Prospect searches run today.
    pub searches_today: u64,
    /// Outbound messages sent today.
    pub messages_today: u64,
    /// Voice-agent minutes consumed this month.
    pub voice_minutes_this_month: u64,
    /// Seats currently occupied.
    pub seats_in_use: u64,
    /// Whole days left in the billing period.
    pub days_remaining: u32,
}

impl UsageCounters {
    /// Returns the zero-usage state, the fail-open fallback when the usage
    /// store cannot be read.
    #[must_use]
    pub fn zero(days_remaining: u32) -> Self {
        Self {
            days_remaining,
            ..Self::default()
        }
    }

    /// Returns the consumed amount for a quota kind.
    #[must_use]
    pub fn used(&self, kind: QuotaKind) -> u64 {
        match kind {
            QuotaKind::Leads => self.leads_this_month,
            QuotaKind::Searches => self.searches_today,
            QuotaKind::Messages => self.messages_today,
            QuotaKind::VoiceMinutes => self.voice_minutes_this_month,
            QuotaKind::Seats => self.seats_in_use,
        }
    }

    /// Returns whether consumption has reached the configured limit.
    ///
    /// A limit of zero or below is unlimited and never reached.
    #[must_use]
    pub fn has_reached_limit(&self, kind: QuotaKind, limits: &TierLimits) -> bool {
        let limit = kind.limit_in(limits);
        if limit <= 0 {
            return false;
        }

        self.used(kind) >= limit.unsigned_abs()
    }

    /// Returns the credits left before the limit.
    #[must_use]
    pub fn remaining_credits(&self, kind: QuotaKind, limits: &TierLimits) -> Remaining {
        let limit = kind.limit_in(limits);
        if limit <= 0 {
            return Remaining::Unlimited;
        }

        Remaining::Exactly(limit.unsigned_abs().saturating_sub(self.used(kind)))
    }

    /// Returns consumption as a whole percentage of the limit, clamped to
    /// 100. Unlimited resources always report zero.
    #[must_use]
    pub fn usage_percentage(&self, kind: QuotaKind, limits: &TierLimits) -> u8 {
        let limit = kind.limit_in(limits);
        if limit <= 0 {
            return 0;
        }

        let percent = u128::from(self.used(kind)) * 100 / u128::from(limit.unsigned_abs());
        u8::try_from(percent.min(100)).unwrap_or(100)
    }
}
