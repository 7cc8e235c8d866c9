//! Overpass API client for nearby fishable water.
//!
//! Queries OpenStreetMap for lakes, ponds, reservoirs, rivers and streams
//! around a center point and turns them into `WaterSite`s.
//! See: https://wiki.openstreetmap.org/wiki/Overpass_API

use serde::Deserialize;
use std::collections::HashMap;

use crate::advisor::{WaterKind, WaterSite};
use crate::errors::AppError;
use crate::helpers::haversine_km;

const INTERPRETER_PATH: &str = "/api/interpreter";

/// Server-side query timeout, seconds.
const QUERY_TIMEOUT_SECS: u32 = 25;

#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    base_url: String,
}

// --- Overpass JSON response types ---

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    #[serde(rename = "type")]
    element_type: String,
    id: u64,
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

/// Overpass QL for water bodies within `radius_m` of a point.
pub fn build_query(lat: f64, lon: f64, radius_m: u32) -> String {
    let around = format!("(around:{},{:.5},{:.5})", radius_m, lat, lon);
    format!(
        "[out:json][timeout:{timeout}];\
         (way[\"natural\"=\"water\"]{a};\
         relation[\"natural\"=\"water\"]{a};\
         way[\"waterway\"~\"^(river|stream)$\"]{a};);\
         out center tags;",
        timeout = QUERY_TIMEOUT_SECS,
        a = around
    )
}

impl OverpassClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn fetch_water(
        &self,
        lat: f64,
        lon: f64,
        radius_m: u32,
    ) -> Result<serde_json::Value, AppError> {
        let url = format!("{}{}", self.base_url, INTERPRETER_PATH);
        let query = build_query(lat, lon, radius_m);

        let response = self
            .client
            .post(&url)
            .form(&[("data", query.as_str())])
            .send()
            .await
            .map_err(|e| {
                AppError::ExternalServiceError(format!("overpass request failed: {}", e))
            })?;

        if !response.status().is_success() {
            return Err(AppError::ExternalServiceError(format!(
                "overpass returned HTTP {}",
                response.status()
            )));
        }

        response.json().await.map_err(|e| {
            AppError::ExternalServiceError(format!("overpass JSON parse error: {}", e))
        })
    }
}

/// Water classification from OSM tags.
pub fn classify_tags(tags: &HashMap<String, String>) -> WaterKind {
    match tags.get("waterway").map(String::as_str) {
        Some("river") => return WaterKind::River,
        Some("stream") => return WaterKind::Stream,
        _ => {}
    }
    match tags.get("water").map(String::as_str) {
        Some("reservoir") => WaterKind::Reservoir,
        Some("lake") | Some("pond") | Some("oxbow") => WaterKind::Lake,
        Some("river") | Some("canal") => WaterKind::River,
        Some("stream") => WaterKind::Stream,
        _ => WaterKind::Water,
    }
}

fn fallback_name(kind: WaterKind) -> String {
    format!("Unnamed {}", kind.as_str().to_lowercase())
}

/// Parse an Overpass response into sites, nearest to `center` first.
///
/// Long rivers come back as many way segments sharing a name; only the
/// segment nearest the center is kept for each (name, kind).
pub fn parse_water_sites(
    raw_json: &serde_json::Value,
    center_lat: f64,
    center_lon: f64,
) -> Result<Vec<WaterSite>, AppError> {
    let response: OverpassResponse = serde_json::from_value(raw_json.clone()).map_err(|e| {
        AppError::ExternalServiceError(format!("overpass response structure error: {}", e))
    })?;

    let mut best: HashMap<(String, WaterKind), (WaterSite, f64)> = HashMap::new();

    for element in response.elements {
        let (lat, lon) = match (&element.center, element.lat, element.lon) {
            (Some(c), _, _) => (c.lat, c.lon),
            (None, Some(lat), Some(lon)) => (lat, lon),
            _ => continue,
        };

        let kind = classify_tags(&element.tags);
        let name = element
            .tags
            .get("name")
            .filter(|n| !n.trim().is_empty())
            .cloned();
        let distance = haversine_km(center_lat, center_lon, lat, lon);

        let site = WaterSite {
            id: format!("{}/{}", element.element_type, element.id),
            name: name.clone().unwrap_or_else(|| fallback_name(kind)),
            lat,
            lon,
            kind,
        };

        // Unnamed features are distinct even when they share a kind.
        let key = (name.unwrap_or_else(|| site.id.clone()), kind);
        match best.get(&key) {
            Some((_, d)) if *d <= distance => {}
            _ => {
                best.insert(key, (site, distance));
            }
        }
    }

    let mut sites: Vec<(WaterSite, f64)> = best.into_values().collect();
    sites.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.id.cmp(&b.0.id)));
    Ok(sites.into_iter().map(|(site, _)| site).collect())
}
