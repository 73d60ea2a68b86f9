//! Campaign performance aggregation: weekly timeline, demographic
//! breakdown, device comparison and regional map, plus the dashboard
//! snapshot that bundles them for one data load.

pub mod charts;
pub mod dashboard;
pub mod demographic;
pub mod device;
pub mod geo;
pub mod grouping;
pub mod rates;
pub mod regional;
pub mod summary;
pub mod weekly;

pub use dashboard::{CampaignDashboard, DashboardSnapshot};
pub use demographic::{aggregate_demographics, DemographicReport};
pub use device::{aggregate_devices, DeviceKind, DeviceReport};
pub use geo::{GeoLookup, GeoPoint, StaticGeoTable};
pub use regional::{aggregate_regions, RegionalReport};
pub use summary::{campaign_rows, summarize, KpiSummary};
pub use weekly::{aggregate_weekly, WeeklyReport};
