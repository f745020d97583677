use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub total_distance_km: f64,
    pub duration_minutes: f64,
    pub avg_speed_kmh: f64,
    pub elevation_gain_m: f64,
    /// Epoch seconds of the last point of the analyzed segment.
    pub activity_timestamp: i64,
}

/// Named columns handed to the classifier. Built from a [`FeatureVector`]
/// without its `activity_timestamp`.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    columns: Vec<(&'static str, f64)>,
}

impl FeatureRow {
    pub const COLUMNS: [&'static str; 4] = [
        "total_distance_km",
        "duration_minutes",
        "avg_speed_kmh",
        "elevation_gain_m",
    ];

    pub fn get(&self, name: &str) -> Option<f64> {
        self.columns
            .iter()
            .find(|(column, _)| *column == name)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.columns.iter().copied()
    }
}

impl From<&FeatureVector> for FeatureRow {
    fn from(features: &FeatureVector) -> Self {
        let values = [
            features.total_distance_km,
            features.duration_minutes,
            features.avg_speed_kmh,
            features.elevation_gain_m,
        ];
        Self {
            columns: Self::COLUMNS.into_iter().zip(values).collect(),
        }
    }
}
