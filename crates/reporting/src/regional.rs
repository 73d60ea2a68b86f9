//! Regional performance with map enrichment.

use crate::charts::GeoBubble;
use crate::geo::{GeoLookup, GeoPoint};
use crate::grouping::group_by;
use crate::rates::{format_currency, format_percent, PerformanceTotals};
use campaign_core::{Campaign, RegionalRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalGroup {
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
    #[serde(flatten)]
    pub totals: PerformanceTotals,
    pub ctr: f64,
    pub conversion_rate: f64,
    pub cpc: f64,
    pub cpa: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalReport {
    /// Mapped regions only, revenue descending; equal revenue keeps
    /// first-encountered order.
    pub regions: Vec<RegionalGroup>,
    /// Mean of per-region ROAS values, not total revenue over total spend.
    pub average_roas: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalTableRow {
    pub region: String,
    pub country: String,
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
    pub roas: String,
    pub roas_sort: f64,
}

/// Group regional records by `region-country`, attach map positions and drop
/// regions the lookup cannot place.
///
/// The position is resolved once per key, from the first record seen.
pub fn aggregate_regions(campaigns: &[Campaign], geo: &impl GeoLookup) -> RegionalReport {
    let records = campaigns.iter().flat_map(|c| c.regional_performance.iter());
    let groups = group_by(
        records,
        |record| record.group_key(),
        |record: &&RegionalRecord| {
            (
                record.region.clone(),
                record.country.clone(),
                geo.lookup(&record.region),
                PerformanceTotals::default(),
            )
        },
        |(_, _, _, totals), record| totals.add_regional(record),
    );

    let mut regions: Vec<RegionalGroup> = groups
        .into_values()
        .filter_map(|(region, country, point, totals)| {
            if point.is_unmapped() {
                debug!(region = %region, country = %country, "Dropping region without map position");
                return None;
            }
            Some(enrich(region, country, point, totals))
        })
        .collect();

    // `sort_by` is stable, so ties keep first-encountered order.
    regions.sort_by(|a, b| b.totals.revenue.total_cmp(&a.totals.revenue));

    let average_roas = if regions.is_empty() {
        0.0
    } else {
        regions.iter().map(|r| r.roas).sum::<f64>() / regions.len() as f64
    };

    RegionalReport {
        regions,
        average_roas,
    }
}

fn enrich(region: String, country: String, point: GeoPoint, totals: PerformanceTotals) -> RegionalGroup {
    RegionalGroup {
        region,
        country,
        latitude: point.latitude,
        longitude: point.longitude,
        color: point.color,
        ctr: totals.ctr(),
        conversion_rate: totals.conversion_rate(),
        cpc: totals.cpc(),
        cpa: totals.cpa(),
        roas: totals.roas(),
        totals,
    }
}

impl RegionalReport {
    /// Highest-revenue region.
    pub fn top_region(&self) -> Option<&RegionalGroup> {
        self.regions.first()
    }

    pub fn total_revenue(&self) -> f64 {
        self.regions.iter().map(|r| r.totals.revenue).sum()
    }

    pub fn map_bubbles(&self) -> Vec<GeoBubble> {
        self.regions
            .iter()
            .map(|r| GeoBubble {
                region: r.region.clone(),
                country: r.country.clone(),
                value: r.totals.revenue,
                color: r.color.clone(),
                latitude: r.latitude,
                longitude: r.longitude,
            })
            .collect()
    }

    pub fn table_rows(&self) -> Vec<RegionalTableRow> {
        self.regions
            .iter()
            .map(|r| RegionalTableRow {
                region: r.region.clone(),
                country: r.country.clone(),
                impressions: r.totals.impressions,
                clicks: r.totals.clicks,
                conversions: r.totals.conversions,
                spend: format_currency(r.totals.spend),
                spend_sort: r.totals.spend,
                revenue: format_currency(r.totals.revenue),
                revenue_sort: r.totals.revenue,
                ctr: format_percent(r.ctr),
                ctr_sort: r.ctr,
                conversion_rate: format_percent(r.conversion_rate),
                conversion_rate_sort: r.conversion_rate,
                roas: format!("{:.2}x", r.roas),
                roas_sort: r.roas,
            })
            .collect()
    }
}
