//! Payload unwrapping and validation.
//!
//! The endpoint returns either a bare JSON array of campaigns or an object
//! wrapping that array under `data` or `campaigns`.

use campaign_core::{Campaign, CampaignError, CampaignResult};
use serde_json::Value;
use tracing::debug;

const WRAPPER_KEYS: [&str; 2] = ["data", "campaigns"];

/// Parse a raw response body into campaigns.
pub fn parse_campaigns(body: &str) -> CampaignResult<Vec<Campaign>> {
    let value: Value = serde_json::from_str(body)?;
    let array = unwrap_array(value)?;
    let campaigns: Vec<Campaign> = serde_json::from_value(array)?;
    debug!(count = campaigns.len(), "Parsed campaign payload");
    Ok(campaigns)
}

fn unwrap_array(value: Value) -> CampaignResult<Value> {
    match value {
        Value::Array(_) => Ok(value),
        Value::Object(mut map) => {
            for key in WRAPPER_KEYS {
                if let Some(inner @ Value::Array(_)) = map.remove(key) {
                    debug!(wrapper = key, "Unwrapped campaign array");
                    return Ok(inner);
                }
            }
            Err(CampaignError::Schema(
                "expected a JSON array of campaigns or an object with a `data` or `campaigns` array, found object"
                    .to_string(),
            ))
        }
        other => Err(CampaignError::Schema(format!(
            "expected a JSON array of campaigns, found {}",
            kind_of(&other)
        ))),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
