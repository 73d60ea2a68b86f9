//! Campaign performance dashboard. Every view is computed once per data load.

use crate::charts::{CategoryPoint, GeoBubble, SeriesPoint};
use crate::demographic::{aggregate_demographics, DemographicReport, DemographicTableRow};
use crate::device::{aggregate_devices, DeviceComparison, DeviceKind, DeviceReport};
use crate::geo::{GeoLookup, StaticGeoTable};
use crate::regional::{aggregate_regions, RegionalGroup, RegionalReport, RegionalTableRow};
use crate::summary::{campaign_rows, summarize, CampaignRow, KpiSummary};
use crate::weekly::{aggregate_weekly, WeeklyReport};
use campaign_core::Campaign;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyView {
    pub report: WeeklyReport,
    pub revenue_series: Vec<SeriesPoint>,
    pub spend_series: Vec<SeriesPoint>,
    pub conversion_rate_series: Vec<SeriesPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemographicView {
    pub report: DemographicReport,
    pub table: Vec<DemographicTableRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceView {
    pub report: DeviceReport,
    /// Absent when a tracked device is missing; see `missing_devices`.
    pub comparison: Option<DeviceComparison>,
    pub missing_devices: Vec<DeviceKind>,
    pub revenue_bars: Vec<CategoryPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalView {
    pub report: RegionalReport,
    pub top_region: Option<RegionalGroup>,
    /// Revenue across the mapped regions.
    pub total_revenue: f64,
    pub bubbles: Vec<GeoBubble>,
    pub table: Vec<RegionalTableRow>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub summary: KpiSummary,
    pub campaigns: Vec<CampaignRow>,
    pub weekly: WeeklyView,
    pub demographics: DemographicView,
    pub devices: DeviceView,
    pub regions: RegionalView,
    /// Load failure message; the views are then computed over no campaigns.
    pub load_error: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl DashboardSnapshot {
    pub fn build(campaigns: &[Campaign]) -> Self {
        Self::build_with_geo(campaigns, &StaticGeoTable)
    }

    pub fn build_with_geo(campaigns: &[Campaign], geo: &impl GeoLookup) -> Self {
        let weekly = aggregate_weekly(campaigns);
        let demographics = aggregate_demographics(campaigns);
        let devices = aggregate_devices(campaigns);
        let regions = aggregate_regions(campaigns, geo);

        Self {
            summary: summarize(campaigns),
            campaigns: campaign_rows(campaigns),
            weekly: WeeklyView {
                revenue_series: weekly.revenue_series(),
                spend_series: weekly.spend_series(),
                conversion_rate_series: weekly.conversion_rate_series(),
                report: weekly,
            },
            demographics: DemographicView {
                table: demographics.table_rows(),
                report: demographics,
            },
            devices: DeviceView {
                comparison: devices.comparison(),
                missing_devices: devices.missing_devices(),
                revenue_bars: devices.revenue_bars(),
                report: devices,
            },
            regions: RegionalView {
                top_region: regions.top_region().cloned(),
                total_revenue: regions.total_revenue(),
                bubbles: regions.map_bubbles(),
                table: regions.table_rows(),
                report: regions,
            },
            load_error: None,
            generated_at: Utc::now(),
        }
    }
}

/// Holds the most recent data load and its snapshot. Views are recomputed
/// only when new data is loaded.
pub struct CampaignDashboard {
    campaigns: Vec<Campaign>,
    snapshot: DashboardSnapshot,
    loads: u64,
}

impl CampaignDashboard {
    pub fn new() -> Self {
        Self {
            campaigns: Vec::new(),
            snapshot: DashboardSnapshot::build(&[]),
            loads: 0,
        }
    }

    /// Replace the campaign list and recompute every view.
    pub fn load(&mut self, campaigns: Vec<Campaign>, load_error: Option<String>) -> &DashboardSnapshot {
        let mut snapshot = DashboardSnapshot::build(&campaigns);
        snapshot.load_error = load_error;
        self.campaigns = campaigns;
        self.snapshot = snapshot;
        self.loads += 1;

        info!(
            campaigns = self.campaigns.len(),
            weeks = self.snapshot.weekly.report.weeks.len(),
            regions = self.snapshot.regions.report.regions.len(),
            load = self.loads,
            "Dashboard snapshot rebuilt"
        );
        &self.snapshot
    }

    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Number of loads since creation.
    pub fn load_count(&self) -> u64 {
        self.loads
    }
}

impl Default for CampaignDashboard {
    fn default() -> Self {
        Self::new()
    }
}
