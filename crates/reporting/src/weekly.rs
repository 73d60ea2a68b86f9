//! Weekly timeline: per-week totals across all campaigns.

use crate::charts::SeriesPoint;
use crate::grouping::group_by;
use crate::rates::{round2, safe_ratio, PerformanceTotals};
use campaign_core::{Campaign, WeeklyRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyGroup {
    pub week_start: String,
    /// `week_end` of the first record seen for this `week_start`.
    pub week_end: String,
    #[serde(flatten)]
    pub totals: PerformanceTotals,
    pub ctr: f64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    /// Ascending by `week_start` date.
    pub weeks: Vec<WeeklyGroup>,
    pub total_revenue: f64,
    pub total_spend: f64,
    /// `Σconversions / Σclicks` over every week.
    pub avg_conversion_rate: f64,
}

/// Group every weekly record by `week_start` and compute per-week rates.
pub fn aggregate_weekly(campaigns: &[Campaign]) -> WeeklyReport {
    let records = campaigns.iter().flat_map(|c| c.weekly_performance.iter());
    let groups = group_by(
        records,
        |record| record.week_start.clone(),
        |record: &&WeeklyRecord| (record.week_end.clone(), PerformanceTotals::default()),
        |(_, totals), record| totals.add_weekly(record),
    );

    let mut weeks: Vec<WeeklyGroup> = groups
        .into_iter_keyed()
        .map(|(week_start, (week_end, totals))| WeeklyGroup {
            week_start,
            week_end,
            ctr: totals.ctr(),
            conversion_rate: totals.conversion_rate(),
            totals,
        })
        .collect();

    weeks.sort_by(|a, b| compare_week_starts(&a.week_start, &b.week_start));

    let total_revenue = weeks.iter().map(|w| w.totals.revenue).sum();
    let total_spend = weeks.iter().map(|w| w.totals.spend).sum();
    let total_clicks = weeks
        .iter()
        .fold(0u64, |acc, w| acc.saturating_add(w.totals.clicks));
    let total_conversions = weeks
        .iter()
        .fold(0u64, |acc, w| acc.saturating_add(w.totals.conversions));

    WeeklyReport {
        weeks,
        total_revenue,
        total_spend,
        avg_conversion_rate: safe_ratio(total_conversions as f64, total_clicks as f64),
    }
}

impl WeeklyReport {
    pub fn revenue_series(&self) -> Vec<SeriesPoint> {
        self.series(|w| round2(w.totals.revenue))
    }

    pub fn spend_series(&self) -> Vec<SeriesPoint> {
        self.series(|w| round2(w.totals.spend))
    }

    /// Conversion rate per week, as a percentage.
    pub fn conversion_rate_series(&self) -> Vec<SeriesPoint> {
        self.series(|w| round2(w.conversion_rate * 100.0))
    }

    fn series(&self, value_of: impl Fn(&WeeklyGroup) -> f64) -> Vec<SeriesPoint> {
        self.weeks
            .iter()
            .map(|week| SeriesPoint {
                label: short_label(&week.week_start),
                value: value_of(week),
                tooltip_label: Some(range_label(&week.week_start, &week.week_end)),
            })
            .collect()
    }
}

/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and naive `YYYY-MM-DDTHH:MM:SS`.
pub fn parse_week_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(raw).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

/// Parseable dates first in ascending order, then unparseable labels
/// lexicographically.
fn compare_week_starts(a: &str, b: &str) -> Ordering {
    match (parse_week_date(a), parse_week_date(b)) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn short_label(week_start: &str) -> String {
    parse_week_date(week_start)
        .map(|d| d.format("%b %d").to_string())
        .unwrap_or_else(|| week_start.to_string())
}

fn range_label(week_start: &str, week_end: &str) -> String {
    match (parse_week_date(week_start), parse_week_date(week_end)) {
        (Some(start), Some(end)) => format!(
            "{} - {}",
            start.format("%b %d"),
            end.format("%b %d, %Y")
        ),
        _ => format!("{} - {}", week_start, week_end),
    }
}
