use super::*;
use crate::api::{GeocodeResponse, GeocodeResult};
use crate::mock_api::MockApi;
use futures::executor::block_on;

struct FixedGeocoder(Option<LatLng>);

#[async_trait(?Send)]
impl Geocoder for FixedGeocoder {
    async fn locate(&self, _address: &str) -> Result<Option<LatLng>, ApiError> {
        Ok(self.0)
    }
}

fn widget() -> MapWidget {
    MapWidget::new(MapConfig { api_key: "mk".into() })
}

const TOKYO: LatLng = LatLng { lat: 35.6762, lng: 139.6503 };

#[test]
fn script_url_carries_key_and_callback() {
    let config = MapConfig { api_key: "abc123".into() };
    assert_eq!(config.script_url(), "https://maps.googleapis.com/maps/api/js?key=abc123&callback=initMap");
}

#[test]
fn from_relay_reads_maps_key() {
    let mut api = MockApi::new();
    api.maps_key = Ok("relayed".into());
    assert_eq!(block_on(MapConfig::from_relay(&api)).unwrap().api_key, "relayed");
}

#[test]
fn new_widget_centers_on_default() {
    let widget = widget();
    assert_eq!(widget.view().center, DEFAULT_CENTER);
    assert_eq!(widget.view().zoom, 12);
    assert!(widget.view().marker.is_none());
}

#[test]
fn empty_address_shows_prompt_without_geocoding() {
    let api = MockApi::new();
    let mut widget = widget();
    block_on(widget.search(&ProxyGeocoder(&api), ""));
    assert_eq!(widget.view().error, Some(EMPTY_QUERY));
    assert!(api.calls().is_empty());
}

#[test]
fn hit_recenters_and_places_single_marker() {
    let mut widget = widget();
    block_on(widget.search(&FixedGeocoder(Some(TOKYO)), "Tokyo"));
    let paris = LatLng { lat: 48.85, lng: 2.35 };
    block_on(widget.search(&FixedGeocoder(Some(paris)), "Paris"));

    let view = widget.view();
    assert_eq!(view.center, paris);
    assert_eq!(view.marker, Some(paris));
    assert_eq!(view.zoom, DEFAULT_ZOOM);
    assert!(view.error.is_none());
}

#[test]
fn miss_shows_not_found_and_keeps_marker() {
    let mut widget = widget();
    block_on(widget.search(&FixedGeocoder(Some(TOKYO)), "Tokyo"));
    block_on(widget.search(&FixedGeocoder(None), "Atlantis"));
    assert_eq!(widget.view().error, Some(NOT_FOUND));
    assert_eq!(widget.view().marker, Some(TOKYO));
}

#[test]
fn hit_after_miss_hides_error() {
    let mut widget = widget();
    block_on(widget.search(&FixedGeocoder(None), "Atlantis"));
    block_on(widget.search(&FixedGeocoder(Some(TOKYO)), "Tokyo"));
    assert!(widget.view().error.is_none());
}

#[test]
fn proxy_geocoder_uses_first_result() {
    let mut api = MockApi::new();
    api.geocode = Ok(GeocodeResponse { results: vec![GeocodeResult { lon: 139.6503, lat: 35.6762 }] });
    let location = block_on(ProxyGeocoder(&api).locate("Tokyo")).unwrap();
    assert_eq!(location, Some(TOKYO));
    assert_eq!(api.calls(), vec!["geocode:Tokyo"]);
}

#[test]
fn proxy_geocoder_failure_reads_as_not_found() {
    let api = MockApi::new();
    let mut widget = widget();
    block_on(widget.search(&ProxyGeocoder(&api), "Tokyo"));
    assert_eq!(widget.view().error, Some(NOT_FOUND));
}
