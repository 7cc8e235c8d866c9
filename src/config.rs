use std::str::FromStr;
use std::time::Duration;

/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Sent to every upstream API; Nominatim rejects requests without one.
    pub user_agent: String,
    pub open_meteo_url: String,
    pub usgs_url: String,
    pub nominatim_url: String,
    pub overpass_url: String,
    pub cache_ttl: Duration,
    pub http_timeout: Duration,
    /// How far from the site to look for a USGS gauge.
    pub gauge_radius_km: f64,
    /// How far from the center to look for lakes and rivers.
    pub water_search_radius_m: u32,
}

/// Read a numeric variable, falling back to `default` when unset or invalid.
fn env_parse<T: FromStr + Copy + std::fmt::Display>(name: &str, default: T) -> T {
    match std::env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("{}='{}' is not valid, using {}", name, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

/// `LOG_FORMAT=json` selects JSON log lines. Read on its own so logging can
/// be set up before the rest of the configuration is parsed.
pub fn log_json_from_env() -> bool {
    std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false)
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            user_agent: env_or(
                "ADVISOR_USER_AGENT",
                "FishingAdvisor/0.1 (+https://github.com/fishing-advisor)",
            ),
            open_meteo_url: env_or("OPEN_METEO_URL", "https://api.open-meteo.com"),
            usgs_url: env_or("USGS_URL", "https://waterservices.usgs.gov"),
            nominatim_url: env_or("NOMINATIM_URL", "https://nominatim.openstreetmap.org"),
            overpass_url: env_or("OVERPASS_URL", "https://overpass-api.de"),
            cache_ttl: Duration::from_secs(env_parse("CACHE_TTL_SECS", 900u64)),
            http_timeout: Duration::from_secs(env_parse("HTTP_TIMEOUT_SECS", 20u64)),
            gauge_radius_km: env_parse("GAUGE_RADIUS_KM", 25.0f64),
            water_search_radius_m: env_parse("WATER_SEARCH_RADIUS_M", 5000u32),
        }
    }

    /// Point every client at one base URL. Used against mock servers.
    pub fn with_base_url(base: &str) -> Self {
        Self {
            user_agent: "FishingAdvisor/test".to_string(),
            open_meteo_url: base.to_string(),
            usgs_url: base.to_string(),
            nominatim_url: base.to_string(),
            overpass_url: base.to_string(),
            cache_ttl: Duration::from_secs(60),
            http_timeout: Duration::from_secs(5),
            gauge_radius_km: 25.0,
            water_search_radius_m: 5000,
        }
    }
}
