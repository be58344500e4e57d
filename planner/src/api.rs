//! Typed client seam for the Wayfarer server and the weather provider.
//!
//! Browser (hydrate): real HTTP calls via `gloo-net` in [`HttpApi`].
//! Tests: hand-written implementations of [`TravelApi`].
//!
//! ERROR HANDLING
//! ==============
//! Callers get `Result` outputs instead of panics; each widget turns an
//! `ApiError` into its own fixed user-visible message.

use async_trait::async_trait;
use serde::Deserialize;

use crate::weather::WeatherConfig;

/// Errors produced by client API calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request could not be sent.
    #[error("request failed: {0}")]
    Request(String),

    /// The server answered with a non-success status.
    #[error("request failed with status {0}")]
    Status(u16),

    /// The body did not match the expected shape.
    #[error("response decode failed: {0}")]
    Decode(String),
}

// =============================================================================
// WIRE TYPES
// =============================================================================

/// `/api/geocode` body. Only the coordinates are read.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GeocodeResult {
    pub lon: f64,
    pub lat: f64,
}

/// `/api/places` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlacesResponse {
    #[serde(default)]
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: FeatureProperties,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeatureProperties {
    pub name: Option<String>,
    pub formatted: Option<String>,
}

/// One `/api/destination-images` item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageResult {
    pub urls: ImageUrls,
    #[serde(default)]
    pub alt_description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageUrls {
    pub regular: String,
}

/// Current-conditions payload. `cod` is a number on success and a string
/// on provider errors, so it is kept as raw JSON.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WeatherReport {
    #[serde(default)]
    pub cod: serde_json::Value,
    #[serde(default)]
    pub name: String,
    pub main: Option<WeatherMain>,
    #[serde(default)]
    pub weather: Vec<WeatherCondition>,
    pub wind: Option<Wind>,
}

impl WeatherReport {
    /// True when the provider reported `cod == 200`.
    #[must_use]
    pub fn is_found(&self) -> bool {
        match &self.cod {
            serde_json::Value::Number(n) => n.as_u64() == Some(200),
            serde_json::Value::String(s) => s == "200",
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WeatherMain {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

// =============================================================================
// TRAIT
// =============================================================================

/// Every network call the widgets make.
#[async_trait(?Send)]
pub trait TravelApi {
    /// `GET /api/geocode?city=`
    async fn geocode(&self, city: &str) -> Result<GeocodeResponse, ApiError>;

    /// `GET /api/places?lon=&lat=`
    async fn places(&self, lon: f64, lat: f64) -> Result<PlacesResponse, ApiError>;

    /// `GET /api/destination-images?query=`
    async fn destination_images(&self, query: &str) -> Result<Vec<ImageResult>, ApiError>;

    /// `GET /api/weather-key`
    async fn weather_key(&self) -> Result<String, ApiError>;

    /// `GET /api/maps-key`
    async fn maps_key(&self) -> Result<String, ApiError>;

    /// Current conditions straight from the weather provider. A non-success
    /// status (including 404 for an unknown city) is `ApiError::Status`.
    async fn current_weather(&self, config: &WeatherConfig, city: &str) -> Result<WeatherReport, ApiError>;
}

#[derive(Deserialize)]
struct WeatherKeyBody {
    #[serde(rename = "WEATHER_API_KEY")]
    key: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapsKeyBody {
    api_key: String,
}

// =============================================================================
// BROWSER CLIENT
// =============================================================================

/// Same-origin client for the Wayfarer server.
#[cfg(feature = "hydrate")]
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpApi;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl TravelApi for HttpApi {
    async fn geocode(&self, city: &str) -> Result<GeocodeResponse, ApiError> {
        send_json(gloo_net::http::Request::get("/api/geocode").query([("city", city)])).await
    }

    async fn places(&self, lon: f64, lat: f64) -> Result<PlacesResponse, ApiError> {
        let (lon, lat) = (lon.to_string(), lat.to_string());
        send_json(gloo_net::http::Request::get("/api/places").query([("lon", lon.as_str()), ("lat", lat.as_str())]))
            .await
    }

    async fn destination_images(&self, query: &str) -> Result<Vec<ImageResult>, ApiError> {
        send_json(gloo_net::http::Request::get("/api/destination-images").query([("query", query)])).await
    }

    async fn weather_key(&self) -> Result<String, ApiError> {
        parse_weather_key(&send_text(gloo_net::http::Request::get("/api/weather-key")).await?)
    }

    async fn maps_key(&self) -> Result<String, ApiError> {
        parse_maps_key(&send_text(gloo_net::http::Request::get("/api/maps-key")).await?)
    }

    async fn current_weather(&self, config: &WeatherConfig, city: &str) -> Result<WeatherReport, ApiError> {
        send_json(gloo_net::http::Request::get(&config.base_url).query(config.query(city))).await
    }
}

#[cfg(feature = "hydrate")]
async fn send_text(request: gloo_net::http::RequestBuilder) -> Result<String, ApiError> {
    let resp = request
        .send()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))?;
    if !resp.ok() {
        return Err(ApiError::Status(resp.status()));
    }
    resp.text()
        .await
        .map_err(|e| ApiError::Request(e.to_string()))
}

#[cfg(feature = "hydrate")]
async fn send_json<T: serde::de::DeserializeOwned>(request: gloo_net::http::RequestBuilder) -> Result<T, ApiError> {
    let text = send_text(request).await?;
    serde_json::from_str(&text).map_err(|e| ApiError::Decode(e.to_string()))
}

/// Parse a `/api/weather-key` body.
///
/// # Errors
///
/// Returns `ApiError::Decode` if the key field is absent.
pub fn parse_weather_key(json: &str) -> Result<String, ApiError> {
    let body: WeatherKeyBody = serde_json::from_str(json).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(body.key)
}

/// Parse a `/api/maps-key` body.
///
/// # Errors
///
/// Returns `ApiError::Decode` if the key field is absent.
pub fn parse_maps_key(json: &str) -> Result<String, ApiError> {
    let body: MapsKeyBody = serde_json::from_str(json).map_err(|e| ApiError::Decode(e.to_string()))?;
    Ok(body.api_key)
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
