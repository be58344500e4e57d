//! Geoapify geocoding and places search.

use super::{UpstreamError, get_json};

/// Only sightseeing POIs are offered to the itinerary builder.
pub const PLACES_CATEGORIES: &str = "tourism.sights";
pub const PLACES_RADIUS_METERS: u32 = 50_000;
pub const PLACES_LIMIT: &str = "6";
pub const PLACES_SORT: &str = "importance";

/// `GET {base}/v1/geocode/search?text=..&format=json&apiKey=..`
pub async fn geocode(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    city: &str,
) -> Result<serde_json::Value, UpstreamError> {
    let url = format!("{base_url}/v1/geocode/search");
    get_json(http, &url, &[("text", city), ("format", "json"), ("apiKey", api_key)]).await
}

/// `GET {base}/v2/places?categories=..&filter=circle:lon,lat,radius&limit=6&sort=importance&apiKey=..`
pub async fn places(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    lon: &str,
    lat: &str,
) -> Result<serde_json::Value, UpstreamError> {
    let url = format!("{base_url}/v2/places");
    let filter = circle_filter(lon, lat);
    get_json(
        http,
        &url,
        &[
            ("categories", PLACES_CATEGORIES),
            ("filter", &filter),
            ("limit", PLACES_LIMIT),
            ("sort", PLACES_SORT),
            ("apiKey", api_key),
        ],
    )
    .await
}

fn circle_filter(lon: &str, lat: &str) -> String {
    format!("circle:{lon},{lat},{PLACES_RADIUS_METERS}")
}
