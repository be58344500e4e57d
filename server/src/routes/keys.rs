//! Key relay routes.
//!
//! The weather and maps widgets call their providers straight from the
//! browser, so these two keys are handed out on request. Every other key
//! stays behind the proxy routes.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct WeatherKeyResponse {
    #[serde(rename = "WEATHER_API_KEY")]
    pub weather_api_key: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapsKeyResponse {
    pub api_key: String,
}

/// `GET /api/weather-key`: relay the weather provider key.
pub async fn weather_key(State(state): State<AppState>) -> Result<Json<WeatherKeyResponse>, ApiError> {
    let key = state
        .config
        .keys
        .weather
        .clone()
        .ok_or(ApiError::MissingConfig("Weather API key"))?;
    Ok(Json(WeatherKeyResponse { weather_api_key: key }))
}

/// `GET /api/maps-key`: relay the Google Maps key.
pub async fn maps_key(State(state): State<AppState>) -> Result<Json<MapsKeyResponse>, ApiError> {
    let key = state
        .config
        .keys
        .google_maps
        .clone()
        .ok_or(ApiError::MissingConfig("Google Maps API key"))?;
    Ok(Json(MapsKeyResponse { api_key: key }))
}

#[cfg(test)]
#[path = "keys_test.rs"]
mod tests;
