//! Device comparison, Mobile vs Desktop.

use crate::charts::{CategoryPoint, DESKTOP_COLOR, MOBILE_COLOR};
use crate::grouping::OrderedGroups;
use crate::rates::{round2, safe_ratio, PerformanceTotals};
use campaign_core::Campaign;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The device categories tracked by the comparison view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeviceKind {
    Mobile,
    Desktop,
}

impl DeviceKind {
    /// Exact, case-sensitive match after trimming. Anything else is untracked.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "Mobile" => Some(DeviceKind::Mobile),
            "Desktop" => Some(DeviceKind::Desktop),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceKind::Mobile => "Mobile",
            DeviceKind::Desktop => "Desktop",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            DeviceKind::Mobile => MOBILE_COLOR,
            DeviceKind::Desktop => DESKTOP_COLOR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceGroup {
    pub device: DeviceKind,
    #[serde(flatten)]
    pub totals: PerformanceTotals,
    /// CTR as a percentage, two decimals.
    pub avg_ctr: f64,
    /// Conversion rate as a percentage, two decimals.
    pub avg_conversion_rate: f64,
    pub roas: f64,
}

/// Mobile vs Desktop revenue comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceComparison {
    /// Mobile revenue minus Desktop revenue.
    pub revenue_delta: f64,
    /// Delta relative to Desktop revenue, in percent. Desktop revenue of 0 is
    /// treated as 1.
    pub delta_percent: f64,
    /// Mobile share of combined Mobile + Desktop revenue, in percent.
    pub mobile_revenue_share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceReport {
    /// Mobile before Desktop; devices with no engagement are omitted.
    pub devices: Vec<DeviceGroup>,
}

pub fn aggregate_devices(campaigns: &[Campaign]) -> DeviceReport {
    let mut groups: OrderedGroups<PerformanceTotals> = OrderedGroups::new();
    // Fixed output order regardless of which device is seen first.
    for kind in [DeviceKind::Mobile, DeviceKind::Desktop] {
        groups.entry_or_insert_with(kind.as_str().to_string(), PerformanceTotals::default);
    }

    for record in campaigns.iter().flat_map(|c| c.device_performance.iter()) {
        match DeviceKind::parse(&record.device) {
            Some(kind) => groups
                .entry_or_insert_with(kind.as_str().to_string(), PerformanceTotals::default)
                .add_device(record),
            None => debug!(device = %record.device, "Dropping untracked device record"),
        }
    }

    let devices = groups
        .into_iter_keyed()
        .filter(|(_, totals)| !totals.has_no_engagement())
        .filter_map(|(key, totals)| {
            DeviceKind::parse(&key).map(|device| DeviceGroup {
                device,
                avg_ctr: round2(totals.ctr() * 100.0),
                avg_conversion_rate: round2(totals.conversion_rate() * 100.0),
                roas: totals.roas(),
                totals,
            })
        })
        .collect();

    DeviceReport { devices }
}

impl DeviceReport {
    pub fn get(&self, kind: DeviceKind) -> Option<&DeviceGroup> {
        self.devices.iter().find(|g| g.device == kind)
    }

    /// `None` when Mobile or Desktop is missing; the view shows a
    /// missing-device warning instead of the comparison.
    pub fn comparison(&self) -> Option<DeviceComparison> {
        let mobile = self.get(DeviceKind::Mobile)?.totals.revenue;
        let desktop = self.get(DeviceKind::Desktop)?.totals.revenue;

        let revenue_delta = mobile - desktop;
        let base = if desktop == 0.0 { 1.0 } else { desktop };
        Some(DeviceComparison {
            revenue_delta,
            delta_percent: revenue_delta / base * 100.0,
            mobile_revenue_share: safe_ratio(mobile, mobile + desktop) * 100.0,
        })
    }

    /// Tracked devices absent from the report.
    pub fn missing_devices(&self) -> Vec<DeviceKind> {
        [DeviceKind::Mobile, DeviceKind::Desktop]
            .into_iter()
            .filter(|kind| self.get(*kind).is_none())
            .collect()
    }

    pub fn revenue_bars(&self) -> Vec<CategoryPoint> {
        self.devices
            .iter()
            .map(|g| CategoryPoint {
                label: g.device.as_str().to_string(),
                value: round2(g.totals.revenue),
                color: g.device.color().to_string(),
            })
            .collect()
    }
}
