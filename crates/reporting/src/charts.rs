//! Chart-ready point types consumed by the dashboard widgets.

use serde::{Deserialize, Serialize};

pub const SPEND_COLOR: &str = "#ef4444";
pub const REVENUE_COLOR: &str = "#10b981";
pub const MOBILE_COLOR: &str = "#3b82f6";
pub const DESKTOP_COLOR: &str = "#8b5cf6";

/// One point of an ordered time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tooltip_label: Option<String>,
}

/// One bar of a categorical chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPoint {
    pub label: String,
    pub value: f64,
    pub color: String,
}

/// One bubble on the regional map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoBubble {
    pub region: String,
    pub country: String,
    pub value: f64,
    pub color: String,
    pub latitude: f64,
    pub longitude: f64,
}
