//! Static region → map position lookup for the regional bubble map.

use serde::{Deserialize, Serialize};

/// Marker color for regions missing from the table.
pub const FALLBACK_COLOR: &str = "#94a3b8";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub color: String,
}

impl GeoPoint {
    pub fn fallback() -> Self {
        Self {
            latitude: 0.0,
            longitude: 0.0,
            color: FALLBACK_COLOR.to_string(),
        }
    }

    /// True for the zero-coordinate fallback position.
    pub fn is_unmapped(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// Resolves a region name to a map position. Total: unknown names resolve to
/// [`GeoPoint::fallback`].
pub trait GeoLookup {
    fn lookup(&self, region: &str) -> GeoPoint;
}

/// GCC and major global cities.
const REGIONS: &[(&str, f64, f64, &str)] = &[
    ("Dubai", 25.2048, 55.2708, "#3b82f6"),
    ("Abu Dhabi", 24.4539, 54.3773, "#6366f1"),
    ("Sharjah", 25.3463, 55.4209, "#8b5cf6"),
    ("Riyadh", 24.7136, 46.6753, "#10b981"),
    ("Jeddah", 21.4858, 39.1925, "#14b8a6"),
    ("Dammam", 26.4207, 50.0888, "#22c55e"),
    ("Doha", 25.2854, 51.5310, "#f59e0b"),
    ("Kuwait City", 29.3759, 47.9774, "#f97316"),
    ("Manama", 26.2285, 50.5860, "#ef4444"),
    ("Muscat", 23.5880, 58.3829, "#ec4899"),
    ("Cairo", 30.0444, 31.2357, "#d946ef"),
    ("London", 51.5074, -0.1278, "#0ea5e9"),
    ("New York", 40.7128, -74.0060, "#06b6d4"),
    ("Paris", 48.8566, 2.3522, "#84cc16"),
    ("Singapore", 1.3521, 103.8198, "#eab308"),
    ("Mumbai", 19.0760, 72.8777, "#a855f7"),
    ("Tokyo", 35.6762, 139.6503, "#f43f5e"),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGeoTable;

impl GeoLookup for StaticGeoTable {
    fn lookup(&self, region: &str) -> GeoPoint {
        REGIONS
            .iter()
            .find(|(name, ..)| *name == region)
            .map(|(_, latitude, longitude, color)| GeoPoint {
                latitude: *latitude,
                longitude: *longitude,
                color: color.to_string(),
            })
            .unwrap_or_else(GeoPoint::fallback)
    }
}
