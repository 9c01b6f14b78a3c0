//! Record types for the climate dataset.
//!
//! The dataset is owned elsewhere; these types describe the columns the
//! service expects to find and never write back.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Table holding one row per (station, date) observation
pub const MEASUREMENT_TABLE: &str = "measurement";

/// Table holding one row per monitoring station
pub const STATION_TABLE: &str = "station";

/// Columns that must exist in the measurement table
pub const MEASUREMENT_COLUMNS: &[&str] = &["id", "station", "date", "prcp", "tobs"];

/// Columns that must exist in the station table
pub const STATION_COLUMNS: &[&str] = &["id", "station"];

/// One observation from the measurement table
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    /// Station identifier, e.g. USC00519397
    pub station: String,
    /// Observation date as stored, YYYY-MM-DD
    pub date: String,
    /// Precipitation, absent on some days
    pub prcp: Option<f64>,
    /// Temperature observation in degrees Fahrenheit
    pub tobs: f64,
}

/// One monitoring station
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Station {
    pub id: i64,
    pub station: String,
    pub name: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub elevation: Option<f64>,
}

/// Min, max and mean temperature over a set of observations.
///
/// Serialized as the positional list `[min, max, avg]`; every entry is
/// `null` when no observation matched.
#[derive(Debug, Clone, Copy, PartialEq, Default, FromRow, Serialize, Deserialize)]
#[serde(into = "[Option<f64>; 3]", from = "[Option<f64>; 3]")]
pub struct TemperatureStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub avg: Option<f64>,
}

impl TemperatureStats {
    /// Whether any observation contributed to the aggregate
    pub fn is_empty(&self) -> bool {
        self.min.is_none() && self.max.is_none() && self.avg.is_none()
    }
}

impl From<TemperatureStats> for [Option<f64>; 3] {
    fn from(stats: TemperatureStats) -> Self {
        [stats.min, stats.max, stats.avg]
    }
}

impl From<[Option<f64>; 3]> for TemperatureStats {
    fn from([min, max, avg]: [Option<f64>; 3]) -> Self {
        Self { min, max, avg }
    }
}
