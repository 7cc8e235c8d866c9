//! Success scorer.
//!
//! Additive model over five independently bounded components:
//!
//! | component   | range  | unknown |
//! |-------------|--------|---------|
//! | temperature | 35–85  | 45      |
//! | wind        | 0–10   | 10      |
//! | cloud       | 0–8    | 5       |
//! | pressure    | 0–7    | 5       |
//! | turbidity   | 0–5    | 5       |
//!
//! The sum can reach 115 and is clamped to 100, so near-ideal conditions
//! saturate even with a small penalty on one component.

use serde::Serialize;

use super::models::{is_river_like, ConditionSet, ThermalBand};
use super::species::classify;

/// Preferred water temperatures for a band, in °F.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TempPreference {
    pub ideal: f64,
    pub low: f64,
    pub high: f64,
}

pub fn temp_preference(band: ThermalBand) -> TempPreference {
    match band {
        ThermalBand::Cold => TempPreference {
            ideal: 54.0,
            low: 44.0,
            high: 64.0,
        },
        ThermalBand::Cool => TempPreference {
            ideal: 64.0,
            low: 52.0,
            high: 74.0,
        },
        ThermalBand::Warm => TempPreference {
            ideal: 75.0,
            low: 62.0,
            high: 85.0,
        },
    }
}

const TEMP_FLOOR: f64 = 35.0;
const TEMP_SPAN: f64 = 50.0;
const TEMP_UNKNOWN: f64 = 45.0;
/// Narrowest shoulder used when normalizing temperature distance (°F).
const MIN_SHOULDER_F: f64 = 8.0;

const WIND_MAX: f64 = 10.0;
const WIND_UNKNOWN: f64 = 10.0;
const WIND_SWEET_RIVER_MPH: f64 = 3.0;
const WIND_SWEET_LAKE_MPH: f64 = 6.0;
const WIND_WINDOW_MPH: f64 = 10.0;

const CLOUD_MAX: f64 = 8.0;
const CLOUD_UNKNOWN: f64 = 5.0;
const CLOUD_TARGET_COLD_PCT: f64 = 60.0;
const CLOUD_TARGET_OTHER_PCT: f64 = 40.0;
const CLOUD_WINDOW_PCT: f64 = 50.0;

const PRESSURE_MAX: f64 = 7.0;
const PRESSURE_UNKNOWN: f64 = 5.0;
const PRESSURE_STEADY_INHG: f64 = 29.95;
const PRESSURE_WINDOW_INHG: f64 = 0.35;

const TURBIDITY_MAX: f64 = 5.0;
const TURBIDITY_UNKNOWN: f64 = 5.0;

/// Per-component points plus the unclamped sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub temperature: f64,
    pub wind: f64,
    pub cloud: f64,
    pub pressure: f64,
    pub turbidity: f64,
    pub total: f64,
}

impl ScoreBreakdown {
    /// Final 0–100 score.
    pub fn score(&self) -> u8 {
        self.total.clamp(0.0, 100.0).round() as u8
    }
}

/// NaN and infinities carry no information; treat them as unknown.
fn known(v: Option<f64>) -> Option<f64> {
    v.filter(|x| x.is_finite())
}

/// `1` at zero distance, falling linearly to `0` at `window`.
fn linear_falloff(distance: f64, window: f64) -> f64 {
    (1.0 - distance / window).clamp(0.0, 1.0)
}

pub fn temperature_points(band: ThermalBand, water_temp_f: Option<f64>) -> f64 {
    let Some(t) = known(water_temp_f) else {
        return TEMP_UNKNOWN;
    };
    let pref = temp_preference(band);
    let shoulder = if t < pref.ideal {
        pref.ideal - pref.low
    } else {
        pref.high - pref.ideal
    }
    .max(MIN_SHOULDER_F);

    let fraction = linear_falloff((t - pref.ideal).abs(), shoulder);
    TEMP_FLOOR + fraction * TEMP_SPAN
}

pub fn wind_points(river_like: bool, wind_mph: Option<f64>) -> f64 {
    let Some(w) = known(wind_mph) else {
        return WIND_UNKNOWN;
    };
    let sweet = if river_like {
        WIND_SWEET_RIVER_MPH
    } else {
        WIND_SWEET_LAKE_MPH
    };
    linear_falloff((w - sweet).abs(), WIND_WINDOW_MPH) * WIND_MAX
}

pub fn cloud_points(band: ThermalBand, cloud_pct: Option<f64>) -> f64 {
    let Some(c) = known(cloud_pct) else {
        return CLOUD_UNKNOWN;
    };
    // Cold-water fish favour low light.
    let target = if band == ThermalBand::Cold {
        CLOUD_TARGET_COLD_PCT
    } else {
        CLOUD_TARGET_OTHER_PCT
    };
    linear_falloff((c - target).abs(), CLOUD_WINDOW_PCT) * CLOUD_MAX
}

pub fn pressure_points(barometer_inhg: Option<f64>) -> f64 {
    let Some(p) = known(barometer_inhg) else {
        return PRESSURE_UNKNOWN;
    };
    linear_falloff((p - PRESSURE_STEADY_INHG).abs(), PRESSURE_WINDOW_INHG) * PRESSURE_MAX
}

pub fn turbidity_points(band: ThermalBand, turbidity_fnu: Option<f64>) -> f64 {
    let Some(f) = known(turbidity_fnu) else {
        return TURBIDITY_UNKNOWN;
    };
    let (ideal, window) = if band == ThermalBand::Cold {
        (5.0, 10.0)
    } else {
        (15.0, 25.0)
    };
    linear_falloff((f - ideal).abs(), window) * TURBIDITY_MAX
}

/// Component-level view of a score. Species and conditions are required here;
/// use [`success_score`] for the nullable contract.
pub fn score_breakdown(
    species: &str,
    water_type: &str,
    conditions: &ConditionSet,
) -> ScoreBreakdown {
    let band = classify(species);
    let river_like = is_river_like(water_type);

    let temperature = temperature_points(band, conditions.water_temp_f);
    let wind = wind_points(river_like, conditions.wind_mph);
    let cloud = cloud_points(band, conditions.cloud_pct);
    let pressure = pressure_points(conditions.barometer_inhg);
    let turbidity = turbidity_points(band, conditions.turbidity_fnu);

    ScoreBreakdown {
        temperature,
        wind,
        cloud,
        pressure,
        turbidity,
        total: temperature + wind + cloud + pressure + turbidity,
    }
}

/// Success score in `0..=100`.
///
/// `None` means the inputs cannot be evaluated at all (no species, or no
/// conditions). Individual unknown readings never produce `None`.
pub fn success_score(
    species: Option<&str>,
    water_type: &str,
    conditions: Option<&ConditionSet>,
) -> Option<u8> {
    let species = species.filter(|s| !s.is_empty())?;
    let conditions = conditions?;
    Some(score_breakdown(species, water_type, conditions).score())
}
