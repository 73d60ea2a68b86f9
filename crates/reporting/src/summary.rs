//! Headline KPIs and per-campaign rows.
//!
//! Spend and revenue come from each campaign's top-level fields; engagement
//! counts come from its weekly records.

use crate::rates::{format_currency, format_percent, PerformanceTotals};
use campaign_core::Campaign;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSummary {
    pub campaign_count: usize,
    #[serde(flatten)]
    pub totals: PerformanceTotals,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CampaignRow {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub totals: PerformanceTotals,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub roas: f64,
    pub spend_display: String,
    pub revenue_display: String,
    pub ctr_display: String,
}

fn campaign_totals(campaign: &Campaign) -> PerformanceTotals {
    let mut totals = PerformanceTotals::default();
    for week in &campaign.weekly_performance {
        totals.add_counts(week.impressions, week.clicks, week.conversions);
    }
    totals.add_financials(campaign.spend, campaign.revenue);
    totals
}

pub fn summarize(campaigns: &[Campaign]) -> KpiSummary {
    let totals = campaigns
        .iter()
        .map(campaign_totals)
        .fold(PerformanceTotals::default(), |mut acc, t| {
            acc.add_counts(t.impressions, t.clicks, t.conversions);
            acc.add_financials(t.spend, t.revenue);
            acc
        });

    KpiSummary {
        campaign_count: campaigns.len(),
        ctr: totals.ctr(),
        conversion_rate: totals.conversion_rate(),
        roas: totals.roas(),
        totals,
    }
}

/// One row per campaign, revenue descending; ties keep input order.
pub fn campaign_rows(campaigns: &[Campaign]) -> Vec<CampaignRow> {
    let mut rows: Vec<CampaignRow> = campaigns
        .iter()
        .map(|campaign| {
            let totals = campaign_totals(campaign);
            CampaignRow {
                id: campaign.id.clone(),
                name: campaign.name.clone(),
                ctr: totals.ctr(),
                conversion_rate: totals.conversion_rate(),
                roas: totals.roas(),
                spend_display: format_currency(totals.spend),
                revenue_display: format_currency(totals.revenue),
                ctr_display: format_percent(totals.ctr()),
                totals,
            }
        })
        .collect();
    rows.sort_by(|a, b| b.totals.revenue.total_cmp(&a.totals.revenue));
    rows
}
