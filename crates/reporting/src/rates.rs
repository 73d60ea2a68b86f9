//! Shared rate math and display formatting used by every aggregation.

use campaign_core::{DeviceRecord, RegionalRecord, WeeklyRecord};
use serde::{Deserialize, Serialize};

/// `numerator / denominator`, or 0 when the denominator is zero or the
/// result is not finite.
pub fn safe_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let ratio = numerator / denominator;
    if ratio.is_finite() {
        ratio
    } else {
        0.0
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Format a ratio as a two-decimal percentage, `0.1234` -> `"12.34%"`.
pub fn format_percent(ratio: f64) -> String {
    format!("{:.2}%", ratio * 100.0)
}

/// Format a currency amount with thousands separators, `1234.5` -> `"$1,234.50"`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Running sums for one aggregation group. Every derived rate is computed from
/// these totals, never averaged from per-record rates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTotals {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

impl PerformanceTotals {
    /// Counts saturate at `u64::MAX` instead of wrapping.
    pub fn add_counts(&mut self, impressions: u64, clicks: u64, conversions: u64) {
        self.impressions = self.impressions.saturating_add(impressions);
        self.clicks = self.clicks.saturating_add(clicks);
        self.conversions = self.conversions.saturating_add(conversions);
    }

    pub fn add_financials(&mut self, spend: f64, revenue: f64) {
        self.spend += spend;
        self.revenue += revenue;
    }

    pub fn add_weekly(&mut self, record: &WeeklyRecord) {
        self.add_counts(record.impressions, record.clicks, record.conversions);
        self.add_financials(record.spend, record.revenue);
    }

    pub fn add_device(&mut self, record: &DeviceRecord) {
        self.add_counts(record.impressions, record.clicks, record.conversions);
        self.add_financials(record.spend, record.revenue);
    }

    pub fn add_regional(&mut self, record: &RegionalRecord) {
        self.add_counts(record.impressions, record.clicks, record.conversions);
        self.add_financials(record.spend, record.revenue);
    }

    /// True when no engagement at all was recorded.
    pub fn has_no_engagement(&self) -> bool {
        self.impressions == 0 && self.clicks == 0 && self.conversions == 0
    }

    /// Clicks per impression.
    pub fn ctr(&self) -> f64 {
        safe_ratio(self.clicks as f64, self.impressions as f64)
    }

    /// Conversions per click.
    pub fn conversion_rate(&self) -> f64 {
        safe_ratio(self.conversions as f64, self.clicks as f64)
    }

    pub fn cpc(&self) -> f64 {
        safe_ratio(self.spend, self.clicks as f64)
    }

    pub fn cpa(&self) -> f64 {
        safe_ratio(self.spend, self.conversions as f64)
    }

    pub fn roas(&self) -> f64 {
        safe_ratio(self.revenue, self.spend)
    }
}
