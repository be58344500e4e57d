//! Scriptable `TravelApi` for widget tests.

use std::cell::RefCell;

use async_trait::async_trait;

use crate::api::{ApiError, GeocodeResponse, ImageResult, PlacesResponse, TravelApi, WeatherReport};
use crate::weather::WeatherConfig;

/// Every call answers with a clone of its configured result and is logged
/// in `calls`. Unconfigured calls fail with a 500.
pub struct MockApi {
    pub geocode: Result<GeocodeResponse, ApiError>,
    pub places: Result<PlacesResponse, ApiError>,
    pub images: Result<Vec<ImageResult>, ApiError>,
    pub weather_key: Result<String, ApiError>,
    pub maps_key: Result<String, ApiError>,
    pub weather: Result<WeatherReport, ApiError>,
    pub calls: RefCell<Vec<String>>,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            geocode: Err(ApiError::Status(500)),
            places: Err(ApiError::Status(500)),
            images: Err(ApiError::Status(500)),
            weather_key: Err(ApiError::Status(500)),
            maps_key: Err(ApiError::Status(500)),
            weather: Err(ApiError::Status(500)),
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

#[async_trait(?Send)]
impl TravelApi for MockApi {
    async fn geocode(&self, city: &str) -> Result<GeocodeResponse, ApiError> {
        self.record(format!("geocode:{city}"));
        self.geocode.clone()
    }

    async fn places(&self, lon: f64, lat: f64) -> Result<PlacesResponse, ApiError> {
        self.record(format!("places:{lon},{lat}"));
        self.places.clone()
    }

    async fn destination_images(&self, query: &str) -> Result<Vec<ImageResult>, ApiError> {
        self.record(format!("images:{query}"));
        self.images.clone()
    }

    async fn weather_key(&self) -> Result<String, ApiError> {
        self.record("weather-key".into());
        self.weather_key.clone()
    }

    async fn maps_key(&self) -> Result<String, ApiError> {
        self.record("maps-key".into());
        self.maps_key.clone()
    }

    async fn current_weather(&self, config: &WeatherConfig, city: &str) -> Result<WeatherReport, ApiError> {
        self.record(format!("weather:{}:{city}", config.api_key));
        self.weather.clone()
    }
}
