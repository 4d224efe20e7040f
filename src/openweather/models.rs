use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AppError, AppResult};

/// Response from `/data/2.5/air_pollution/history`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AirPollutionResponse {
    #[serde(default)]
    pub coord: Option<Coordinates>,
    /// Entries are kept as raw JSON so they can be archived verbatim.
    #[serde(default)]
    pub list: Option<Vec<serde_json::Value>>,
}

impl AirPollutionResponse {
    /// Entries in API order. A response without `list` has none.
    #[must_use]
    pub fn entries(&self) -> &[serde_json::Value] {
        self.list.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Typed view of a single `list` entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PollutionEntry {
    /// Epoch seconds, UTC
    pub dt: i64,
    pub main: MainIndex,
    /// Concentration per pollutant name (μg/m³)
    pub components: BTreeMap<String, f64>,
}

impl PollutionEntry {
    /// Parse a raw `list` entry, rejecting entries without `dt`, `main.aqi`
    /// or `components`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::InvalidEntry` if a required field is missing or mistyped.
    pub fn from_raw(raw: &serde_json::Value) -> AppResult<Self> {
        serde_json::from_value(raw.clone()).map_err(|e| {
            let dt = raw.get("dt").map_or_else(|| "?".to_string(), ToString::to_string);
            AppError::InvalidEntry(format!("dt={dt}: {e}"))
        })
    }

    /// # Errors
    ///
    /// Returns `AppError::InvalidEntry` if `dt` is outside chrono's range.
    pub fn timestamp(&self) -> AppResult<DateTime<Utc>> {
        DateTime::from_timestamp(self.dt, 0)
            .ok_or_else(|| AppError::InvalidEntry(format!("timestamp out of range: {}", self.dt)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMainIndex")]
pub struct MainIndex {
    pub aqi: i32,
}

/// The API documents `aqi` as an integer 1-5 but numbers may arrive as floats
#[derive(Debug, Clone, Deserialize)]
struct RawMainIndex {
    aqi: f64,
}

impl TryFrom<RawMainIndex> for MainIndex {
    type Error = String;

    fn try_from(raw: RawMainIndex) -> Result<Self, Self::Error> {
        if !raw.aqi.is_finite() || raw.aqi < f64::from(i32::MIN) || raw.aqi > f64::from(i32::MAX) {
            return Err(format!("aqi out of range: {}", raw.aqi));
        }
        Ok(Self {
            // Truncate any fractional part
            aqi: raw.aqi as i32,
        })
    }
}
