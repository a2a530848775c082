//! Running usage totals with daily and monthly windows

use super::rates::estimate_cost;
use crate::provider::ProviderId;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Call count and estimated spend for one window or provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct UsageCounter {
    pub calls: u64,
    pub estimated_cost: f64,
}

impl UsageCounter {
    fn add(&mut self, cost: f64) {
        self.calls += 1;
        self.estimated_cost += cost;
    }
}

/// Accumulated usage for all providers
///
/// The `today` and `this_month` windows are cleared lazily: every
/// operation that takes a date first rolls the windows over if that date
/// falls on a new day or month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLedger {
    total: UsageCounter,
    today: UsageCounter,
    this_month: UsageCounter,
    last_reset_date: NaiveDate,
    last_month_reset: NaiveDate,
    providers: BTreeMap<ProviderId, UsageCounter>,
}

impl UsageLedger {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            total: UsageCounter::default(),
            today: UsageCounter::default(),
            this_month: UsageCounter::default(),
            last_reset_date: today,
            last_month_reset: today,
            providers: BTreeMap::new(),
        }
    }

    /// Clear the daily/monthly windows if `today` starts a new one.
    ///
    /// Returns `true` if anything was reset.
    pub fn roll_over(&mut self, today: NaiveDate) -> bool {
        let mut changed = false;

        if self.last_reset_date != today {
            self.today = UsageCounter::default();
            self.last_reset_date = today;
            changed = true;
        }

        let same_month = self.last_month_reset.year() == today.year()
            && self.last_month_reset.month() == today.month();
        if !same_month {
            self.this_month = UsageCounter::default();
            self.last_month_reset = today;
            changed = true;
        }

        changed
    }

    /// Record one call and return the cost charged for it
    pub fn record(
        &mut self,
        provider_id: &ProviderId,
        estimated_tokens: u32,
        today: NaiveDate,
    ) -> f64 {
        self.roll_over(today);

        let cost = estimate_cost(provider_id, estimated_tokens);
        self.total.add(cost);
        self.today.add(cost);
        self.this_month.add(cost);
        self.providers
            .entry(provider_id.clone())
            .or_default()
            .add(cost);
        cost
    }

    pub fn reset(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }

    pub fn total(&self) -> UsageCounter {
        self.total
    }

    pub fn provider(&self, provider_id: &ProviderId) -> UsageCounter {
        self.providers.get(provider_id).copied().unwrap_or_default()
    }

    /// Summary view: providers with at least one call, busiest first
    pub fn summary(&self) -> UsageSummary {
        let mut providers: Vec<ProviderUsage> = self
            .providers
            .iter()
            .filter(|(_, counter)| counter.calls > 0)
            .map(|(id, counter)| ProviderUsage {
                provider_id: id.clone(),
                calls: counter.calls,
                estimated_cost: counter.estimated_cost,
            })
            .collect();
        providers.sort_by(|a, b| b.calls.cmp(&a.calls));

        UsageSummary {
            total: self.total,
            today: self.today,
            this_month: self.this_month,
            providers,
        }
    }
}

/// Usage of one provider in a [`UsageSummary`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProviderUsage {
    pub provider_id: ProviderId,
    pub calls: u64,
    pub estimated_cost: f64,
}

/// Snapshot of a [`UsageLedger`] for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub total: UsageCounter,
    pub today: UsageCounter,
    pub this_month: UsageCounter,
    pub providers: Vec<ProviderUsage>,
}
