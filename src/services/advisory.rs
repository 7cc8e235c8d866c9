//! Advisory resolution service.
//!
//! Resolves a (species, site, date) request into a full advisory:
//!   1. Fetch the day's weather and nearby gauge readings concurrently,
//!      each through the response cache
//!   2. Pick the snapshot hour and assemble a `ConditionSet`
//!   3. Run the scoring core for score, gear and feeding windows
//!
//! Weather is required. A failed gauge lookup only costs the measured water
//! temperature and turbidity; the advisory falls back to an estimate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use crate::advisor::{
    classify, rank_time_windows, recommend_gear, score_breakdown, success_score, ConditionSet,
    DaySunEvents, GearRecommendation, ScoreBreakdown, ThermalBand, TimeWindow, WaterSite,
};
use crate::cache::ResponseCache;
use crate::config::AppConfig;
use crate::errors::AppError;
use crate::helpers::location_key;
use crate::services::conditions::{build_conditions, snapshot_time};
use crate::services::nominatim::{parse_search_response, GeoPoint, NominatimClient};
use crate::services::open_meteo::{parse_day_forecast, DayForecast, OpenMeteoClient};
use crate::services::overpass::{parse_water_sites, OverpassClient};
use crate::services::usgs::{nearest_hydro, parse_iv_response, HydroSnapshot, UsgsClient};
use crate::services::build_http_client;

#[derive(Debug, Clone)]
pub struct AdvisoryRequest {
    pub species: String,
    pub site: WaterSite,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Serialize)]
pub struct Advisory {
    pub species: String,
    pub band: ThermalBand,
    pub site: WaterSite,
    pub date: NaiveDate,
    /// Instant the conditions describe.
    pub snapshot_time: DateTime<Utc>,
    pub utc_offset_seconds: i32,
    pub conditions: ConditionSet,
    /// `None` when the request had no species.
    pub score: Option<u8>,
    pub breakdown: ScoreBreakdown,
    pub gear: GearRecommendation,
    pub best_times: Vec<TimeWindow>,
    pub sun: DaySunEvents,
    pub hydro: HydroSnapshot,
}

/// Shared handle to every upstream client plus the response cache.
#[derive(Clone)]
pub struct AdvisoryService {
    open_meteo: OpenMeteoClient,
    usgs: UsgsClient,
    nominatim: NominatimClient,
    overpass: OverpassClient,
    cache: ResponseCache,
    gauge_radius_km: f64,
    water_search_radius_m: u32,
}

impl AdvisoryService {
    pub fn from_config(config: &AppConfig) -> Result<Self, AppError> {
        let client = build_http_client(config)?;
        Ok(Self {
            open_meteo: OpenMeteoClient::new(client.clone(), &config.open_meteo_url),
            usgs: UsgsClient::new(client.clone(), &config.usgs_url),
            nominatim: NominatimClient::new(client.clone(), &config.nominatim_url),
            overpass: OverpassClient::new(client, &config.overpass_url),
            cache: ResponseCache::new(config.cache_ttl),
            gauge_radius_km: config.gauge_radius_km,
            water_search_radius_m: config.water_search_radius_m,
        })
    }

    /// Resolve a free-text place to a coordinate.
    pub async fn geocode(&self, query: &str) -> Result<GeoPoint, AppError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(AppError::BadRequest("place must not be empty".to_string()));
        }

        let key = format!("nominatim:{}", query.to_lowercase());
        let raw = self
            .cache
            .get_or_fetch(&key, || self.nominatim.search(query))
            .await?;

        parse_search_response(&raw)?
            .ok_or_else(|| AppError::NotFound(format!("no place matches '{}'", query)))
    }

    /// Named lakes, rivers and reservoirs around a point, nearest first.
    pub async fn find_water_sites(&self, lat: f64, lon: f64) -> Result<Vec<WaterSite>, AppError> {
        let radius = self.water_search_radius_m;
        let key = location_key("overpass", lat, lon, &radius.to_string());
        let raw = self
            .cache
            .get_or_fetch(&key, || self.overpass.fetch_water(lat, lon, radius))
            .await?;

        let sites = parse_water_sites(&raw, lat, lon)?;
        tracing::info!("Found {} water sites within {} m", sites.len(), radius);
        Ok(sites)
    }

    pub async fn day_forecast(
        &self,
        lat: f64,
        lon: f64,
        date: NaiveDate,
    ) -> Result<DayForecast, AppError> {
        let key = location_key("open-meteo", lat, lon, &date.to_string());
        let raw = self
            .cache
            .get_or_fetch(&key, || self.open_meteo.fetch_day(lat, lon, date))
            .await?;
        parse_day_forecast(&raw)
    }

    pub async fn hydro(&self, lat: f64, lon: f64) -> Result<HydroSnapshot, AppError> {
        let radius = self.gauge_radius_km;
        let key = location_key("usgs", lat, lon, &format!("{}", radius));
        let raw = self
            .cache
            .get_or_fetch(&key, || self.usgs.fetch_nearby(lat, lon, radius))
            .await?;
        let readings = parse_iv_response(&raw)?;
        Ok(nearest_hydro(&readings, lat, lon, radius))
    }

    pub async fn advise(&self, request: &AdvisoryRequest) -> Result<Advisory, AppError> {
        self.advise_at(request, Utc::now()).await
    }

    /// Same as [`advise`](Self::advise) with an explicit "now", which decides
    /// the snapshot hour for same-day requests.
    pub async fn advise_at(
        &self,
        request: &AdvisoryRequest,
        now: DateTime<Utc>,
    ) -> Result<Advisory, AppError> {
        let site = &request.site;

        let (weather, hydro) = futures::future::join(
            self.day_forecast(site.lat, site.lon, request.date),
            self.hydro(site.lat, site.lon),
        )
        .await;

        let weather = weather?;
        let hydro = hydro.unwrap_or_else(|e| {
            tracing::warn!(
                "USGS unavailable for site '{}', estimating water temperature: {}",
                site.name,
                e
            );
            HydroSnapshot::default()
        });

        let at = snapshot_time(request.date, weather.local_offset(), now);
        let conditions = build_conditions(&weather.hourly, at, &hydro);

        if conditions.estimated {
            tracing::info!(
                "No gauge water temperature near '{}', using air-temperature estimate {:?}°F",
                site.name,
                conditions.water_temp_f
            );
        }

        let water_type = site.kind.as_str();
        let species = request.species.trim();

        let advisory = Advisory {
            species: species.to_string(),
            band: classify(species),
            site: site.clone(),
            date: request.date,
            snapshot_time: at,
            utc_offset_seconds: weather.utc_offset_seconds,
            score: success_score(Some(species), water_type, Some(&conditions)),
            breakdown: score_breakdown(species, water_type, &conditions),
            gear: recommend_gear(species, water_type, Some(&conditions)),
            best_times: rank_time_windows(&weather.sun, &weather.hourly),
            sun: weather.sun,
            hydro,
            conditions,
        };

        tracing::info!(
            "Advisory for {} at '{}' on {}: score {:?}, {} feeding windows",
            advisory.species,
            site.name,
            request.date,
            advisory.score,
            advisory.best_times.len()
        );

        Ok(advisory)
    }
}
