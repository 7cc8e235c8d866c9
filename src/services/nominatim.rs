//! Nominatim geocoding client.
//!
//! Turns a free-text place into a center coordinate.
//! See: https://nominatim.org/release-docs/latest/api/Search/

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

const SEARCH_PATH: &str = "/search";

#[derive(Debug, Clone)]
pub struct NominatimClient {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
    pub display_name: String,
}

/// Nominatim returns coordinates as strings.
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

impl NominatimClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search(&self, query: &str) -> Result<serde_json::Value, AppError> {
        let url = format!("{}{}", self.base_url, SEARCH_PATH);

        let response = self
            .client
            .get(&url)
            .query(&[("q", query), ("format", "jsonv2"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("nominatim request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "nominatim returned HTTP {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("nominatim JSON parse error: {}", e))
        })
    }
}

/// First usable result of a search, or `None` when nothing matched.
pub fn parse_search_response(raw_json: &serde_json::Value) -> Result<Option<GeoPoint>, AppError> {
    let places: Vec<NominatimPlace> = serde_json::from_value(raw_json.clone()).map_err(|e| {
        AppError::ExternalServiceError(format!("nominatim response structure error: {}", e))
    })?;

    Ok(places.into_iter().find_map(|p| {
        let lat: f64 = p.lat.trim().parse().ok()?;
        let lon: f64 = p.lon.trim().parse().ok()?;
        Some(GeoPoint {
            lat,
            lon,
            display_name: p.display_name,
        })
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_result() {
        let json = serde_json::json!([{
            "place_id": 297061423,
            "lat": "39.0968493",
            "lon": "-120.0323507",
            "display_name": "Lake Tahoe, California, United States",
            "category": "natural",
            "type": "water"
        }]);
        let point = parse_search_response(&json).unwrap().unwrap();
        assert!((point.lat - 39.0968493).abs() < 1e-10);
        assert!((point.lon + 120.0323507).abs() < 1e-10);
        assert_eq!(point.display_name, "Lake Tahoe, California, United States");
    }

    #[test]
    fn test_parse_no_results() {
        assert_eq!(parse_search_response(&serde_json::json!([])).unwrap(), None);
    }

    #[test]
    fn test_parse_skips_unparsable_coordinates() {
        let json = serde_json::json!([
            { "lat": "n/a", "lon": "0", "display_name": "broken" },
            { "lat": "45.5", "lon": "-93.25", "display_name": "ok" }
        ]);
        let point = parse_search_response(&json).unwrap().unwrap();
        assert_eq!(point.display_name, "ok");
    }

    #[test]
    fn test_parse_error_object_is_error() {
        let json = serde_json::json!({ "error": "Unable to geocode" });
        assert!(parse_search_response(&json).is_err());
    }
}
