//! Raw campaign data model as delivered by the campaign performance endpoint.
//!
//! Every numeric field is lenient: numbers, numeric strings, `null` and missing
//! keys are all accepted, with anything unusable read as zero.

use serde::{Deserialize, Deserializer, Serialize};

/// One marketing campaign with its nested performance breakdowns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    #[serde(default, alias = "campaign_id", deserialize_with = "lenient::identifier")]
    pub id: String,
    #[serde(default, alias = "campaign_name", deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, alias = "total_spend", deserialize_with = "lenient::amount")]
    pub spend: f64,
    #[serde(default, alias = "total_revenue", deserialize_with = "lenient::amount")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "lenient::list")]
    pub weekly_performance: Vec<WeeklyRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub demographic_breakdown: Vec<DemographicRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub device_performance: Vec<DeviceRecord>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub regional_performance: Vec<RegionalRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub week_start: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub week_end: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub conversions: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub spend: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub revenue: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Gender {
    Male,
    Female,
    /// Any label other than male/female. Accumulated, never charted.
    #[default]
    Unknown,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Unknown => "Unknown",
        }
    }
}

impl<'de> Deserialize<'de> for Gender {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?.unwrap_or_default();
        Ok(match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Unknown,
        })
    }
}

/// Engagement counts carried by a demographic slice. Spend and revenue are not
/// reported per slice and must be redistributed from the parent campaign.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngagementCounts {
    #[serde(default, deserialize_with = "lenient::count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub conversions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DemographicRecord {
    #[serde(default)]
    pub gender: Gender,
    #[serde(default, deserialize_with = "lenient::text")]
    pub age_group: String,
    /// Share of the campaign audience in `[0, 100]`.
    #[serde(default, deserialize_with = "lenient::amount")]
    pub percentage_of_audience: f64,
    #[serde(default, deserialize_with = "lenient::nested")]
    pub performance: EngagementCounts,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviceRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub device: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub conversions: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub spend: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionalRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub region: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub country: String,
    #[serde(default, deserialize_with = "lenient::count")]
    pub impressions: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub clicks: u64,
    #[serde(default, deserialize_with = "lenient::count")]
    pub conversions: u64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub spend: f64,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub revenue: f64,
}

impl RegionalRecord {
    /// Grouping key, `region-country`.
    pub fn group_key(&self) -> String {
        format!("{}-{}", self.region, self.country)
    }
}

mod lenient {
    use serde::de::DeserializeOwned;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Number(f64),
        Text(String),
        Flag(bool),
        Other(serde_json::Value),
    }

    impl Scalar {
        fn as_f64(&self) -> f64 {
            let value = match self {
                Scalar::Number(n) => *n,
                Scalar::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
                Scalar::Flag(_) | Scalar::Other(_) => 0.0,
            };
            if value.is_finite() {
                value
            } else {
                0.0
            }
        }
    }

    pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<Scalar>::deserialize(deserializer)?
            .map(|s| s.as_f64())
            .unwrap_or(0.0))
    }

    pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = amount(deserializer)?;
        Ok(if value > 0.0 { value.round() as u64 } else { 0 })
    }

    pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Option::<serde_json::Value>::deserialize(deserializer)? {
            Some(serde_json::Value::String(s)) => s,
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        })
    }

    pub fn list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned,
    {
        Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
    }

    pub fn nested<'de, D, T>(deserializer: D) -> Result<T, D::Error>
    where
        D: Deserializer<'de>,
        T: DeserializeOwned + Default,
    {
        Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
    }
}
