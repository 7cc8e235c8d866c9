//! Open-Meteo forecast client.
//!
//! Fetches one calendar day of hourly weather plus sunrise/sunset for a
//! location. See: https://open-meteo.com/en/docs
//!
//! Requests use `timeformat=unixtime` so every timestamp is absolute, and
//! `timezone=auto` so the requested date is the site's local day.

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::advisor::{DaySunEvents, HourlyRecord};
use crate::errors::AppError;

const FORECAST_PATH: &str = "/v1/forecast";
const HOURLY_FIELDS: &str = "temperature_2m,wind_speed_10m,cloud_cover,pressure_msl";

/// Client for the Open-Meteo forecast API.
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: reqwest::Client,
    base_url: String,
}

/// One local day of weather for a location.
#[derive(Debug, Clone, Serialize)]
pub struct DayForecast {
    pub hourly: Vec<HourlyRecord>,
    pub sun: DaySunEvents,
    /// Offset of the site's local time from UTC.
    pub utc_offset_seconds: i32,
}

impl DayForecast {
    pub fn local_offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_seconds).unwrap_or(Utc.fix())
    }
}

// --- Open-Meteo JSON response types ---

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    #[serde(default)]
    utc_offset_seconds: i32,
    hourly: Option<OpenMeteoHourly>,
    daily: Option<OpenMeteoDaily>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoHourly {
    time: Vec<i64>,
    #[serde(default)]
    temperature_2m: Vec<Option<f64>>,
    #[serde(default)]
    wind_speed_10m: Vec<Option<f64>>,
    #[serde(default)]
    cloud_cover: Vec<Option<f64>>,
    #[serde(default)]
    pressure_msl: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoDaily {
    #[serde(default)]
    sunrise: Vec<Option<i64>>,
    #[serde(default)]
    sunset: Vec<Option<i64>>,
}

impl OpenMeteoClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the raw forecast JSON for one local day.
    pub async fn fetch_day(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        let day = date.format("%Y-%m-%d").to_string();

        let response = self
            .client
            .get(&url)
            .query(&[
                ("latitude", format!("{:.4}", lat)),
                ("longitude", format!("{:.4}", lon)),
                ("hourly", HOURLY_FIELDS.to_string()),
                ("daily", "sunrise,sunset".to_string()),
                ("temperature_unit", "fahrenheit".to_string()),
                ("wind_speed_unit", "mph".to_string()),
                ("timezone", "auto".to_string()),
                ("timeformat", "unixtime".to_string()),
                ("start_date", day.clone()),
                ("end_date", day),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("open-meteo request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "open-meteo returned HTTP {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("open-meteo JSON parse error: {}", e))
        })
    }
}

fn at(values: &[Option<f64>], i: usize) -> Option<f64> {
    values.get(i).copied().flatten()
}

fn timestamp(secs: Option<i64>) -> Option<DateTime<Utc>> {
    secs.and_then(|s| DateTime::from_timestamp(s, 0))
}

/// Parse a forecast response into hourly records and sun events.
///
/// Hourly arrays are zipped by index against `hourly.time`; a short or null
/// array yields `None` for that field rather than an error.
pub fn parse_day_forecast(raw_json: &serde_json::Value) -> Result<DayForecast, AppError> {
    let response: OpenMeteoResponse = serde_json::from_value(raw_json.clone()).map_err(|e| {
        AppError::ExternalServiceError(format!("open-meteo response structure error: {}", e))
    })?;

    let hourly = response.hourly.ok_or_else(|| {
        AppError::ExternalServiceError("open-meteo response has no hourly block".to_string())
    })?;

    let records = hourly
        .time
        .iter()
        .enumerate()
        .filter_map(|(i, &secs)| {
            Some(HourlyRecord {
                time: DateTime::from_timestamp(secs, 0)?,
                air_temp_f: at(&hourly.temperature_2m, i),
                wind_mph: at(&hourly.wind_speed_10m, i),
                cloud_pct: at(&hourly.cloud_cover, i),
                pressure_msl_hpa: at(&hourly.pressure_msl, i),
            })
        })
        .collect();

    let sun = response
        .daily
        .map(|d| DaySunEvents {
            sunrise: timestamp(d.sunrise.first().copied().flatten()),
            sunset: timestamp(d.sunset.first().copied().flatten()),
        })
        .unwrap_or_default();

    Ok(DayForecast {
        hourly: records,
        sun,
        utc_offset_seconds: response.utc_offset_seconds,
    })
}
