//! Campaign data source boundary. Fetches the campaign payload, unwraps it
//! and hands a typed campaign list to the reporting layer.

pub mod payload;
pub mod source;

pub use payload::parse_campaigns;
pub use source::{load_or_empty, CampaignSource, FileCampaignSource, HttpCampaignSource, LoadOutcome};
