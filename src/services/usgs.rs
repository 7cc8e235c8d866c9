//! USGS NWIS Instantaneous Values client.
//!
//! Finds active gauges around a site and reads their latest water
//! temperature and turbidity.
//! See: https://waterservices.usgs.gov/docs/instantaneous-values/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::helpers::{celsius_to_fahrenheit, haversine_km};

const IV_PATH: &str = "/nwis/iv/";

/// USGS parameter code for water temperature, in °C.
pub const PARAM_WATER_TEMP: &str = "00010";

/// USGS parameter code for turbidity, in FNU.
pub const PARAM_TURBIDITY: &str = "63680";

/// Kilometres per degree of latitude.
const KM_PER_DEGREE: f64 = 111.32;

#[derive(Debug, Clone)]
pub struct UsgsClient {
    client: reqwest::Client,
    base_url: String,
}

/// Latest value of one parameter at one gauge.
#[derive(Debug, Clone, PartialEq)]
pub struct GaugeReading {
    pub site_code: String,
    pub site_name: String,
    pub lat: f64,
    pub lon: f64,
    pub parameter_code: String,
    /// Value in the parameter's native unit (°C for temperature).
    pub value: f64,
    pub datetime: Option<DateTime<Utc>>,
}

/// A gauge that contributed a reading to a `HydroSnapshot`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GaugeRef {
    pub site_code: String,
    pub site_name: String,
    pub distance_km: f64,
}

/// Measured hydrology near a site. Both readings are optional and may come
/// from different gauges.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HydroSnapshot {
    pub water_temp_f: Option<f64>,
    pub turbidity_fnu: Option<f64>,
    pub temperature_gauge: Option<GaugeRef>,
    pub turbidity_gauge: Option<GaugeRef>,
}

// --- NWIS JSON response types ---

#[derive(Debug, Deserialize)]
struct IvResponse {
    value: IvValue,
}

#[derive(Debug, Deserialize)]
struct IvValue {
    #[serde(rename = "timeSeries", default)]
    time_series: Vec<IvTimeSeries>,
}

#[derive(Debug, Deserialize)]
struct IvTimeSeries {
    #[serde(rename = "sourceInfo")]
    source_info: IvSourceInfo,
    variable: IvVariable,
    #[serde(default)]
    values: Vec<IvValues>,
}

#[derive(Debug, Deserialize)]
struct IvSourceInfo {
    #[serde(rename = "siteName")]
    site_name: String,
    #[serde(rename = "siteCode")]
    site_code: Vec<IvCode>,
    #[serde(rename = "geoLocation")]
    geo_location: IvGeoLocation,
}

#[derive(Debug, Deserialize)]
struct IvCode {
    value: String,
}

#[derive(Debug, Deserialize)]
struct IvGeoLocation {
    #[serde(rename = "geogLocation")]
    geog_location: IvGeogLocation,
}

#[derive(Debug, Deserialize)]
struct IvGeogLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct IvVariable {
    #[serde(rename = "variableCode")]
    variable_code: Vec<IvCode>,
    #[serde(rename = "noDataValue")]
    no_data_value: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct IvValues {
    #[serde(default)]
    value: Vec<IvPoint>,
}

#[derive(Debug, Deserialize)]
struct IvPoint {
    value: String,
    #[serde(rename = "dateTime")]
    date_time: Option<String>,
}

impl UsgsClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch current temperature and turbidity for active gauges within
    /// `radius_km` of a point.
    ///
    /// NWIS answers 404 when no gauge matches; that is returned as an empty
    /// series, not an error.
    pub async fn fetch_nearby(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}{}", self.base_url, IV_PATH);
        let (west, south, east, north) = bounding_box(lat, lon, radius_km);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                (
                    "bBox",
                    format!("{:.4},{:.4},{:.4},{:.4}", west, south, east, north),
                ),
                (
                    "parameterCd",
                    format!("{},{}", PARAM_WATER_TEMP, PARAM_TURBIDITY),
                ),
                ("siteStatus", "active".to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("usgs request failed: {}", e)))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(serde_json::json!({ "value": { "timeSeries": [] } }));
        }

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "usgs returned HTTP {}",
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("usgs JSON parse error: {}", e)))
    }
}

/// (west, south, east, north) box around a point.
pub fn bounding_box(lat: f64, lon: f64, radius_km: f64) -> (f64, f64, f64, f64) {
    let d_lat = radius_km / KM_PER_DEGREE;
    let d_lon = radius_km / (KM_PER_DEGREE * lat.to_radians().cos().max(0.01));
    (lon - d_lon, lat - d_lat, lon + d_lon, lat + d_lat)
}

/// Latest usable value from each time series.
///
/// Values equal to the series' `noDataValue` (−999999) or that don't parse
/// as numbers are skipped; a series with nothing usable contributes nothing.
pub fn parse_iv_response(raw_json: &serde_json::Value) -> Result<Vec<GaugeReading>, AppError> {
    let response: IvResponse = serde_json::from_value(raw_json.clone()).map_err(|e| {
        AppError::ExternalServiceError(format!("usgs response structure error: {}", e))
    })?;

    let mut readings = Vec::new();

    for series in response.value.time_series {
        let Some(site_code) = series.source_info.site_code.first() else {
            continue;
        };
        let Some(parameter) = series.variable.variable_code.first() else {
            continue;
        };
        let sentinel = series.variable.no_data_value;

        let latest = series
            .values
            .iter()
            .flat_map(|v| v.value.iter())
            .filter_map(|p| {
                let value: f64 = p.value.trim().parse().ok()?;
                if !value.is_finite() || sentinel.is_some_and(|s| value == s) {
                    return None;
                }
                Some((value, p.date_time.as_deref()))
            })
            .last();

        if let Some((value, date_time)) = latest {
            readings.push(GaugeReading {
                site_code: site_code.value.clone(),
                site_name: series.source_info.site_name.clone(),
                lat: series.source_info.geo_location.geog_location.latitude,
                lon: series.source_info.geo_location.geog_location.longitude,
                parameter_code: parameter.value.clone(),
                value,
                datetime: date_time
                    .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                    .map(|dt| dt.with_timezone(&Utc)),
            });
        }
    }

    Ok(readings)
}

fn nearest<'a>(
    readings: &'a [GaugeReading],
    parameter: &str,
    lat: f64,
    lon: f64,
    radius_km: f64,
) -> Option<(&'a GaugeReading, f64)> {
    readings
        .iter()
        .filter(|r| r.parameter_code == parameter)
        .map(|r| (r, haversine_km(lat, lon, r.lat, r.lon)))
        .filter(|(_, d)| *d <= radius_km)
        .min_by(|a, b| a.1.total_cmp(&b.1))
}

fn gauge_ref(reading: &GaugeReading, distance_km: f64) -> GaugeRef {
    GaugeRef {
        site_code: reading.site_code.clone(),
        site_name: reading.site_name.clone(),
        distance_km,
    }
}

/// Pick the nearest gauge for each parameter within `radius_km`.
pub fn nearest_hydro(readings: &[GaugeReading], lat: f64, lon: f64, radius_km: f64) -> HydroSnapshot {
    let temp = nearest(readings, PARAM_WATER_TEMP, lat, lon, radius_km);
    let turbidity = nearest(readings, PARAM_TURBIDITY, lat, lon, radius_km);

    HydroSnapshot {
        water_temp_f: temp.map(|(r, _)| celsius_to_fahrenheit(r.value)),
        turbidity_fnu: turbidity.map(|(r, _)| r.value),
        temperature_gauge: temp.map(|(r, d)| gauge_ref(r, d)),
        turbidity_gauge: turbidity.map(|(r, d)| gauge_ref(r, d)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(code: &str, name: &str, lat: f64, lon: f64, param: &str, values: &[&str]) -> serde_json::Value {
        let points: Vec<serde_json::Value> = values
            .iter()
            .enumerate()
            .map(|(i, v)| {
                serde_json::json!({
                    "value": v,
                    "qualifiers": ["P"],
                    "dateTime": format!("2026-06-01T0{}:00:00.000-07:00", i)
                })
            })
            .collect();
        serde_json::json!({
            "sourceInfo": {
                "siteName": name,
                "siteCode": [{ "value": code, "network": "NWIS", "agencyCode": "USGS" }],
                "geoLocation": { "geogLocation": { "srs": "EPSG:4326", "latitude": lat, "longitude": lon } }
            },
            "variable": {
                "variableCode": [{ "value": param }],
                "noDataValue": -999999.0
            },
            "values": [{ "value": points }]
        })
    }

    fn response(series: Vec<serde_json::Value>) -> serde_json::Value {
        serde_json::json!({ "value": { "timeSeries": series } })
    }

    #[test]
    fn test_parse_takes_latest_value() {
        let json = response(vec![series(
            "10346000",
            "TRUCKEE R A TAHOE CITY CA",
            39.166,
            -120.144,
            PARAM_WATER_TEMP,
            &["11.0", "11.5", "12.0"],
        )]);
        let readings = parse_iv_response(&json).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].site_code, "10346000");
        assert_eq!(readings[0].value, 12.0);
        assert_eq!(
            readings[0].datetime.unwrap().to_rfc3339(),
            "2026-06-01T09:00:00+00:00"
        );
    }

    #[test]
    fn test_parse_skips_sentinel_and_garbage() {
        let json = response(vec![
            series("1", "A", 40.0, -90.0, PARAM_WATER_TEMP, &["10.0", "-999999"]),
            series("2", "B", 40.0, -90.0, PARAM_TURBIDITY, &["-999999", "Ice"]),
        ]);
        let readings = parse_iv_response(&json).unwrap();
        assert_eq!(readings.len(), 1);
        assert_eq!(readings[0].site_code, "1");
        assert_eq!(readings[0].value, 10.0);
    }

    #[test]
    fn test_parse_empty_series() {
        let readings = parse_iv_response(&response(vec![])).unwrap();
        assert!(readings.is_empty());
    }

    #[test]
    fn test_parse_bad_shape_is_error() {
        let err = parse_iv_response(&serde_json::json!({ "nope": 1 })).unwrap_err();
        assert!(matches!(err, AppError::ExternalServiceError(_)));
    }

    #[test]
    fn test_nearest_hydro_per_parameter() {
        let json = response(vec![
            series("far", "Far gauge", 40.2, -90.0, PARAM_WATER_TEMP, &["20.0"]),
            series("near", "Near gauge", 40.01, -90.0, PARAM_WATER_TEMP, &["10.0"]),
            series("turb", "Turbidity gauge", 40.05, -90.0, PARAM_TURBIDITY, &["22.5"]),
        ]);
        let readings = parse_iv_response(&json).unwrap();
        let hydro = nearest_hydro(&readings, 40.0, -90.0, 25.0);

        assert_eq!(hydro.water_temp_f, Some(50.0));
        assert_eq!(hydro.temperature_gauge.as_ref().unwrap().site_code, "near");
        assert_eq!(hydro.turbidity_fnu, Some(22.5));
        assert_eq!(hydro.turbidity_gauge.as_ref().unwrap().site_code, "turb");
    }

    #[test]
    fn test_nearest_hydro_respects_radius() {
        let json = response(vec![series(
            "far", "Far gauge", 41.0, -90.0, PARAM_WATER_TEMP, &["15.0"],
        )]);
        let readings = parse_iv_response(&json).unwrap();
        assert_eq!(nearest_hydro(&readings, 40.0, -90.0, 25.0), HydroSnapshot::default());
    }

    #[test]
    fn test_bounding_box_contains_point() {
        let (w, s, e, n) = bounding_box(45.0, -93.0, 25.0);
        assert!(w < -93.0 && e > -93.0);
        assert!(s < 45.0 && n > 45.0);
        // Longitude degrees are shorter away from the equator.
        assert!((e - w) > (n - s));
    }
}
