//! Value types shared by the scoring core and the collaborator layer.
//!
//! Everything here is request-scoped: built from one query plus the external
//! API responses for it, read by the core, then dropped.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

// ---------------------------------------------------------------------------
// Thermal band
// ---------------------------------------------------------------------------

/// Coarse preferred water-temperature range of a species.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ThermalBand {
    Cold,
    Cool,
    Warm,
}

impl ThermalBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThermalBand::Cold => "cold",
            ThermalBand::Cool => "cool",
            ThermalBand::Warm => "warm",
        }
    }
}

impl fmt::Display for ThermalBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Conditions
// ---------------------------------------------------------------------------

/// Environmental readings for one place and time.
///
/// Every measurement is optional. `None` means "unknown" and each scoring
/// rule has its own fallback for it; a measured `0.0` is a real reading.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConditionSet {
    /// Water temperature in °F, measured or estimated from air temperature.
    pub water_temp_f: Option<f64>,
    pub wind_mph: Option<f64>,
    /// Cloud cover, 0–100.
    pub cloud_pct: Option<f64>,
    pub barometer_inhg: Option<f64>,
    /// Turbidity in Formazin Nephelometric Units.
    pub turbidity_fnu: Option<f64>,
    /// True when `water_temp_f` was not directly measured.
    pub estimated: bool,
}

// ---------------------------------------------------------------------------
// Water sites
// ---------------------------------------------------------------------------

/// Classification of a body of water as reported by the site collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WaterKind {
    Lake,
    River,
    Stream,
    Reservoir,
    /// Unclassified water.
    Water,
}

impl WaterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterKind::Lake => "Lake",
            WaterKind::River => "River",
            WaterKind::Stream => "Stream",
            WaterKind::Reservoir => "Reservoir",
            WaterKind::Water => "Water",
        }
    }
}

impl fmt::Display for WaterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a water-type string describes flowing water.
///
/// Case-insensitive substring match, so upstream labels like "Small Stream"
/// or "RIVER" work without being mapped onto `WaterKind` first.
pub fn is_river_like(water_type: &str) -> bool {
    let lower = water_type.to_lowercase();
    lower.contains("river") || lower.contains("stream")
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WaterSite {
    pub id: String,
    pub name: String,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: WaterKind,
}

// ---------------------------------------------------------------------------
// Hourly weather
// ---------------------------------------------------------------------------

/// One hour of weather for the requested day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyRecord {
    pub time: DateTime<Utc>,
    pub air_temp_f: Option<f64>,
    pub wind_mph: Option<f64>,
    pub cloud_pct: Option<f64>,
    /// Mean sea-level pressure in hPa.
    pub pressure_msl_hpa: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DaySunEvents {
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Outputs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GearRecommendation {
    pub rod_and_line: String,
    pub lures: Vec<String>,
    pub flies: Vec<String>,
    pub fly_setup: String,
    pub fly_presentation: String,
    pub locations: Vec<String>,
}

/// A ranked hour of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimeWindow {
    pub time: DateTime<Utc>,
    pub score: u8,
}
