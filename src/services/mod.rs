pub mod advisory;
pub mod conditions;
pub mod nominatim;
pub mod open_meteo;
pub mod overpass;
pub mod usgs;

use crate::config::AppConfig;
use crate::errors::AppError;

/// One HTTP client shared by every upstream API.
pub fn build_http_client(config: &AppConfig) -> Result<reqwest::Client, AppError> {
    reqwest::Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.http_timeout)
        .build()
        .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))
}
