//! Demographic breakdown by gender and age group.
//!
//! Demographic slices report engagement counts only. Spend and revenue are
//! redistributed from the parent campaign in proportion to each slice's
//! `percentage_of_audience`, relative to the campaign's own percentage sum.

use crate::charts::{CategoryPoint, REVENUE_COLOR, SPEND_COLOR};
use crate::grouping::{group_by, OrderedGroups};
use crate::rates::{format_currency, format_percent, safe_ratio, PerformanceTotals};
use campaign_core::{Campaign, Gender};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A demographic slice with its share of the campaign financials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributedDemographic {
    pub gender: Gender,
    pub age_group: String,
    /// `percentage_of_audience / Σ percentage_of_audience` for the campaign.
    pub ratio: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicGroup {
    pub gender: Gender,
    pub age_group: String,
    #[serde(flatten)]
    pub totals: PerformanceTotals,
    pub ctr: f64,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct GenderTotals {
    pub clicks: u64,
    pub spend: f64,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicReport {
    /// Ascending by age group.
    pub male: Vec<DemographicGroup>,
    /// Ascending by age group.
    pub female: Vec<DemographicGroup>,
    pub male_totals: GenderTotals,
    pub female_totals: GenderTotals,
    /// Spend per age group, both genders combined.
    pub age_group_spend: Vec<CategoryPoint>,
    /// Revenue per age group, both genders combined.
    pub age_group_revenue: Vec<CategoryPoint>,
}

/// Table row with display strings plus raw values for numeric sorting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicTableRow {
    pub gender: Gender,
    pub age_group: String,
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub spend: String,
    pub spend_sort: f64,
    pub revenue: String,
    pub revenue_sort: f64,
    pub ctr: String,
    pub ctr_sort: f64,
    pub conversion_rate: String,
    pub conversion_rate_sort: f64,
}

/// Split one campaign's spend and revenue across its demographic slices.
///
/// When the campaign's audience percentages sum to zero every slice gets a
/// zero ratio, so nothing is redistributed even if engagement counts exist.
pub fn distribute(campaign: &Campaign) -> Vec<DistributedDemographic> {
    let total_audience: f64 = campaign
        .demographic_breakdown
        .iter()
        .map(|d| d.percentage_of_audience)
        .sum();

    campaign
        .demographic_breakdown
        .iter()
        .map(|record| {
            let ratio = safe_ratio(record.percentage_of_audience, total_audience);
            DistributedDemographic {
                gender: record.gender,
                age_group: record.age_group.clone(),
                ratio,
                impressions: record.performance.impressions,
                clicks: record.performance.clicks,
                conversions: record.performance.conversions,
                spend: campaign.spend * ratio,
                revenue: campaign.revenue * ratio,
            }
        })
        .collect()
}

pub fn aggregate_demographics(campaigns: &[Campaign]) -> DemographicReport {
    let slices = campaigns.iter().flat_map(distribute);
    let groups = group_by(
        slices,
        |slice| format!("{}-{}", slice.gender.as_str(), slice.age_group),
        |slice| DemographicGroup {
            gender: slice.gender,
            age_group: slice.age_group.clone(),
            totals: PerformanceTotals::default(),
            ctr: 0.0,
            conversion_rate: 0.0,
        },
        |group, slice| {
            group
                .totals
                .add_counts(slice.impressions, slice.clicks, slice.conversions);
            group.totals.add_financials(slice.spend, slice.revenue);
        },
    );

    let mut male = Vec::new();
    let mut female = Vec::new();
    for mut group in groups.into_values() {
        group.ctr = group.totals.ctr();
        group.conversion_rate = group.totals.conversion_rate();
        match group.gender {
            Gender::Male => male.push(group),
            Gender::Female => female.push(group),
            Gender::Unknown => {
                tracing::debug!(age_group = %group.age_group, "Skipping demographic group without a known gender");
            }
        }
    }
    male.sort_by(|a, b| compare_age_groups(&a.age_group, &b.age_group));
    female.sort_by(|a, b| compare_age_groups(&a.age_group, &b.age_group));

    let (age_group_spend, age_group_revenue) = age_group_series(male.iter().chain(female.iter()));

    DemographicReport {
        male_totals: gender_totals(&male),
        female_totals: gender_totals(&female),
        male,
        female,
        age_group_spend,
        age_group_revenue,
    }
}

impl DemographicReport {
    /// Rows for the sortable demographic table, male groups first.
    pub fn table_rows(&self) -> Vec<DemographicTableRow> {
        self.male
            .iter()
            .chain(self.female.iter())
            .map(|group| DemographicTableRow {
                gender: group.gender,
                age_group: group.age_group.clone(),
                impressions: group.totals.impressions,
                clicks: group.totals.clicks,
                conversions: group.totals.conversions,
                spend: format_currency(group.totals.spend),
                spend_sort: group.totals.spend,
                revenue: format_currency(group.totals.revenue),
                revenue_sort: group.totals.revenue,
                ctr: format_percent(group.ctr),
                ctr_sort: group.ctr,
                conversion_rate: format_percent(group.conversion_rate),
                conversion_rate_sort: group.conversion_rate,
            })
            .collect()
    }
}

fn gender_totals(groups: &[DemographicGroup]) -> GenderTotals {
    groups.iter().fold(GenderTotals::default(), |mut acc, g| {
        acc.clicks = acc.clicks.saturating_add(g.totals.clicks);
        acc.spend += g.totals.spend;
        acc.revenue += g.totals.revenue;
        acc
    })
}

fn age_group_series<'a>(
    groups: impl Iterator<Item = &'a DemographicGroup>,
) -> (Vec<CategoryPoint>, Vec<CategoryPoint>) {
    let mut by_age: OrderedGroups<(f64, f64)> = OrderedGroups::new();
    for group in groups {
        let (spend, revenue) = by_age.entry_or_insert_with(group.age_group.clone(), || (0.0, 0.0));
        *spend += group.totals.spend;
        *revenue += group.totals.revenue;
    }

    let mut ages: Vec<(String, (f64, f64))> = by_age.into_iter_keyed().collect();
    ages.sort_by(|(a, _), (b, _)| compare_age_groups(a, b));

    ages.into_iter()
        .map(|(label, (spend, revenue))| {
            (
                CategoryPoint {
                    label: label.clone(),
                    value: spend,
                    color: SPEND_COLOR.to_string(),
                },
                CategoryPoint {
                    label,
                    value: revenue,
                    color: REVENUE_COLOR.to_string(),
                },
            )
        })
        .unzip()
}

/// Leading digit run of an age label: `"18-24"` -> 18, `"65+"` -> 65.
/// Runs too long for a `u64` clamp to `u64::MAX`.
pub fn age_group_floor(label: &str) -> Option<u64> {
    let digits: String = label
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    Some(digits.parse().unwrap_or(u64::MAX))
}

/// Numeric labels ascending by their floor, then labels without one,
/// lexicographically.
pub fn compare_age_groups(a: &str, b: &str) -> Ordering {
    match (age_group_floor(a), age_group_floor(b)) {
        (Some(x), Some(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use campaign_core::{DemographicRecord, EngagementCounts};

    fn slice(gender: Gender, age: &str, pct: f64, clicks: u64) -> DemographicRecord {
        DemographicRecord {
            gender,
            age_group: age.to_string(),
            percentage_of_audience: pct,
            performance: EngagementCounts {
                impressions: clicks * 20,
                clicks,
                conversions: clicks / 5,
            },
        }
    }

    fn campaign(spend: f64, revenue: f64, slices: Vec<DemographicRecord>) -> Campaign {
        Campaign {
            spend,
            revenue,
            demographic_breakdown: slices,
            ..Default::default()
        }
    }

    #[test]
    fn test_distribution_follows_audience_share() {
        let distributed = distribute(&campaign(
            200.0,
            1_000.0,
            vec![
                slice(Gender::Male, "18-24", 30.0, 10),
                slice(Gender::Female, "18-24", 70.0, 10),
            ],
        ));

        assert!((distributed[0].spend - 60.0).abs() < 1e-9);
        assert!((distributed[1].spend - 140.0).abs() < 1e-9);
        assert!((distributed[0].revenue - 300.0).abs() < 1e-9);
        assert!((distributed[1].ratio - 0.7).abs() < 1e-9);
    }

    #[test]
    fn test_distribution_preserves_campaign_spend() {
        let c = campaign(
            987.65,
            0.0,
            vec![
                slice(Gender::Male, "18-24", 12.5, 1),
                slice(Gender::Male, "25-34", 33.3, 1),
                slice(Gender::Female, "25-34", 41.1, 1),
                slice(Gender::Female, "35-44", 7.0, 1),
            ],
        );
        let total: f64 = distribute(&c).iter().map(|d| d.spend).sum();
        assert!((total - 987.65).abs() < 1e-9);
    }

    #[test]
    fn test_zero_audience_sum_distributes_nothing() {
        let report = aggregate_demographics(&[campaign(
            500.0,
            900.0,
            vec![
                slice(Gender::Male, "18-24", 0.0, 10),
                slice(Gender::Female, "18-24", 0.0, 20),
            ],
        )]);

        assert_eq!(report.male[0].totals.spend, 0.0);
        assert_eq!(report.male[0].totals.revenue, 0.0);
        assert_eq!(report.female[0].totals.spend, 0.0);
        assert_eq!(report.male[0].totals.clicks, 10);
        assert_eq!(report.female[0].totals.clicks, 20);
        assert_eq!(report.female_totals.clicks, 20);
    }

    #[test]
    fn test_groups_merge_across_campaigns() {
        let report = aggregate_demographics(&[
            campaign(100.0, 400.0, vec![slice(Gender::Male, "25-34", 100.0, 10)]),
            campaign(
                300.0,
                600.0,
                vec![
                    slice(Gender::Male, "25-34", 50.0, 30),
                    slice(Gender::Female, "25-34", 50.0, 5),
                ],
            ),
        ]);

        assert_eq!(report.male.len(), 1);
        let male = &report.male[0];
        assert_eq!(male.totals.clicks, 40);
        assert!((male.totals.spend - 250.0).abs() < 1e-9);
        assert!((male.totals.revenue - 700.0).abs() < 1e-9);
        assert!((male.ctr - 0.05).abs() < 1e-9);

        assert!((report.male_totals.spend - 250.0).abs() < 1e-9);
        assert!((report.female_totals.revenue - 300.0).abs() < 1e-9);

        assert_eq!(report.age_group_spend.len(), 1);
        assert!((report.age_group_spend[0].value - 400.0).abs() < 1e-9);
        assert!((report.age_group_revenue[0].value - 1_000.0).abs() < 1e-9);
        assert_eq!(report.age_group_revenue[0].color, REVENUE_COLOR);
    }

    #[test]
    fn test_age_groups_sorted_numerically() {
        let report = aggregate_demographics(&[campaign(
            100.0,
            100.0,
            vec![
                slice(Gender::Female, "65+", 10.0, 1),
                slice(Gender::Female, "unknown", 10.0, 1),
                slice(Gender::Female, "35-44", 10.0, 1),
                slice(Gender::Female, "18-24", 10.0, 1),
                slice(Gender::Male, "9-17", 10.0, 1),
            ],
        )]);

        let ages: Vec<_> = report.female.iter().map(|g| g.age_group.as_str()).collect();
        assert_eq!(ages, vec!["18-24", "35-44", "65+", "unknown"]);

        let series: Vec<_> = report
            .age_group_spend
            .iter()
            .map(|p| p.label.as_str())
            .collect();
        assert_eq!(series, vec!["9-17", "18-24", "35-44", "65+", "unknown"]);
    }

    #[test]
    fn test_unknown_gender_is_not_charted() {
        let report = aggregate_demographics(&[campaign(
            100.0,
            100.0,
            vec![
                slice(Gender::Unknown, "18-24", 50.0, 4),
                slice(Gender::Male, "18-24", 50.0, 4),
            ],
        )]);

        assert_eq!(report.male.len(), 1);
        assert!(report.female.is_empty());
        // Unknown still takes its audience share of the financials.
        assert!((report.male_totals.spend - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_table_rows_format_and_keep_sort_keys() {
        let report = aggregate_demographics(&[campaign(
            1_500.0,
            4_000.0,
            vec![slice(Gender::Male, "18-24", 100.0, 25)],
        )]);
        let rows = report.table_rows();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].ctr, "5.00%");
        assert!((rows[0].ctr_sort - 0.05).abs() < 1e-9);
        assert_eq!(rows[0].conversion_rate, "20.00%");
        assert_eq!(rows[0].spend, "$1,500.00");
        assert!((rows[0].revenue_sort - 4_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_age_group_floor() {
        assert_eq!(age_group_floor("18-24"), Some(18));
        assert_eq!(age_group_floor(" 65+"), Some(65));
        assert_eq!(age_group_floor("teens"), None);
        assert_eq!(compare_age_groups("25-34", "18-24"), Ordering::Greater);
        assert_eq!(compare_age_groups("n/a", "18-24"), Ordering::Greater);
    }

    #[test]
    fn test_oversized_age_label_stays_numeric() {
        assert_eq!(age_group_floor("99999999999-x"), Some(99_999_999_999));
        assert_eq!(age_group_floor("999999999999999999999999+"), Some(u64::MAX));
        assert_eq!(compare_age_groups("99999999999-x", "65+"), Ordering::Greater);
        assert_eq!(compare_age_groups("99999999999-x", "n/a"), Ordering::Less);
    }

    #[test]
    fn test_gender_click_totals_saturate() {
        let mut a = slice(Gender::Male, "18-24", 50.0, 0);
        a.performance.clicks = u64::MAX - 5;
        let mut b = slice(Gender::Male, "25-34", 50.0, 0);
        b.performance.clicks = 100;

        let report = aggregate_demographics(&[campaign(10.0, 10.0, vec![a, b])]);
        assert_eq!(report.male_totals.clicks, u64::MAX);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(aggregate_demographics(&[]), DemographicReport::default());
    }
}
