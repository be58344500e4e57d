//! City map widget.
//!
//! The maps key comes from the server relay once and is carried in a
//! [`MapConfig`]. Geocoding goes through the [`Geocoder`] seam; the default
//! [`ProxyGeocoder`] reuses the server's geocode proxy.

#[cfg(test)]
#[path = "map_test.rs"]
mod map_test;

use async_trait::async_trait;

use crate::api::{ApiError, TravelApi};

pub const MAPS_SCRIPT_URL: &str = "https://maps.googleapis.com/maps/api/js";
/// Global the provider script calls once loaded.
pub const MAPS_CALLBACK: &str = "initMap";
pub const DEFAULT_CENTER: LatLng = LatLng { lat: 40.7128, lng: -74.0060 };
pub const DEFAULT_ZOOM: u8 = 12;

pub const EMPTY_QUERY: &str = "Please enter a city name";
pub const NOT_FOUND: &str = "City not found. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapConfig {
    pub api_key: String,
}

impl MapConfig {
    /// Fetch the key from the server relay.
    ///
    /// # Errors
    ///
    /// Propagates the relay failure (e.g. 500 when the key is unset).
    pub async fn from_relay(api: &dyn TravelApi) -> Result<Self, ApiError> {
        Ok(Self { api_key: api.maps_key().await? })
    }

    /// URL of the provider script to inject into the page.
    #[must_use]
    pub fn script_url(&self) -> String {
        format!("{MAPS_SCRIPT_URL}?key={}&callback={MAPS_CALLBACK}", self.api_key)
    }
}

/// Address → coordinates.
#[async_trait(?Send)]
pub trait Geocoder {
    /// `Ok(None)` when the address matched nothing.
    async fn locate(&self, address: &str) -> Result<Option<LatLng>, ApiError>;
}

/// Geocoder backed by `/api/geocode`, taking the first result.
pub struct ProxyGeocoder<'a>(pub &'a dyn TravelApi);

#[async_trait(?Send)]
impl Geocoder for ProxyGeocoder<'_> {
    async fn locate(&self, address: &str) -> Result<Option<LatLng>, ApiError> {
        let response = self.0.geocode(address).await?;
        Ok(response.results.first().map(|r| LatLng { lat: r.lat, lng: r.lon }))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
    /// At most one marker is ever shown.
    pub marker: Option<LatLng>,
    pub error: Option<&'static str>,
}

impl Default for MapView {
    fn default() -> Self {
        Self { center: DEFAULT_CENTER, zoom: DEFAULT_ZOOM, marker: None, error: None }
    }
}

#[derive(Debug)]
pub struct MapWidget {
    config: MapConfig,
    view: MapView,
}

impl MapWidget {
    #[must_use]
    pub fn new(config: MapConfig) -> Self {
        Self { config, view: MapView::default() }
    }

    #[must_use]
    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    #[must_use]
    pub fn view(&self) -> &MapView {
        &self.view
    }

    /// Validate the typed address. Empty input shows the prompt error and
    /// returns `None`.
    pub fn begin_search<'a>(&mut self, address: &'a str) -> Option<&'a str> {
        if address.is_empty() {
            self.view.error = Some(EMPTY_QUERY);
            return None;
        }
        Some(address)
    }

    /// Recenter on a hit, replacing the marker; show the error on a miss.
    pub fn finish_search(&mut self, result: Result<Option<LatLng>, ApiError>) {
        match result {
            Ok(Some(location)) => {
                self.view = MapView { center: location, zoom: DEFAULT_ZOOM, marker: Some(location), error: None };
            }
            Ok(None) => self.view.error = Some(NOT_FOUND),
            Err(e) => {
                log::error!("map geocoding failed: {e}");
                self.view.error = Some(NOT_FOUND);
            }
        }
    }

    /// Full search cycle.
    pub async fn search(&mut self, geocoder: &dyn Geocoder, address: &str) {
        let Some(address) = self.begin_search(address) else {
            return;
        };
        let result = geocoder.locate(address).await;
        self.finish_search(result);
    }
}
