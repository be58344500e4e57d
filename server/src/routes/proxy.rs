//! Proxy routes.
//!
//! Each handler validates its query, attaches the server-held key, makes
//! exactly one upstream call and relays the JSON body. Query parsing
//! failures are folded into the same 400 as a missing parameter so callers
//! always get an `error` field back.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::response::Json;
use serde::Deserialize;

use crate::error::ApiError;
use crate::state::AppState;
use crate::upstream::{geoapify, unsplash};

const CITY_REQUIRED: &str = "City parameter is required";
const COORDS_REQUIRED: &str = "Longitude and latitude are required";
const QUERY_REQUIRED: &str = "Query parameter is required";

#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub city: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct PlacesQuery {
    pub lon: Option<String>,
    pub lat: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ImagesQuery {
    pub query: Option<String>,
}

/// `GET /api/geocode?city=`: relay Geoapify geocoding JSON.
pub async fn geocode(
    State(state): State<AppState>,
    query: Result<Query<GeocodeQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Ok(Query(params)) = query else {
        return Err(ApiError::BadRequest(CITY_REQUIRED));
    };
    let city = required(params.city.as_deref()).ok_or(ApiError::BadRequest(CITY_REQUIRED))?;
    let key = geoapify_key(&state)?;

    let body = geoapify::geocode(&state.http, &state.config.upstream.geoapify, key, city)
        .await
        .map_err(ApiError::upstream("Failed to fetch geocoding data"))?;

    Ok(Json(body))
}

/// `GET /api/places?lon=&lat=`: relay Geoapify sights around a point.
pub async fn places(
    State(state): State<AppState>,
    query: Result<Query<PlacesQuery>, QueryRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Ok(Query(params)) = query else {
        return Err(ApiError::BadRequest(COORDS_REQUIRED));
    };
    let (Some(lon), Some(lat)) = (required(params.lon.as_deref()), required(params.lat.as_deref())) else {
        return Err(ApiError::BadRequest(COORDS_REQUIRED));
    };
    let key = geoapify_key(&state)?;

    let body = geoapify::places(&state.http, &state.config.upstream.geoapify, key, lon, lat)
        .await
        .map_err(ApiError::upstream("Failed to fetch places data"))?;

    Ok(Json(body))
}

/// `GET /api/destination-images?query=`: relay Unsplash photo results.
pub async fn destination_images(
    State(state): State<AppState>,
    query: Result<Query<ImagesQuery>, QueryRejection>,
) -> Result<Json<Vec<serde_json::Value>>, ApiError> {
    let Ok(Query(params)) = query else {
        return Err(ApiError::BadRequest(QUERY_REQUIRED));
    };
    let search = required(params.query.as_deref()).ok_or(ApiError::BadRequest(QUERY_REQUIRED))?;
    let key = state
        .config
        .keys
        .unsplash
        .as_deref()
        .ok_or(ApiError::MissingConfig("Unsplash API key"))?;

    let results = unsplash::search_photos(&state.http, &state.config.upstream.unsplash, key, search)
        .await
        .map_err(ApiError::upstream("Failed to fetch images"))?;

    tracing::debug!(query = search, count = results.len(), "destination images relayed");
    Ok(Json(results))
}

fn geoapify_key(state: &AppState) -> Result<&str, ApiError> {
    state
        .config
        .keys
        .geoapify
        .as_deref()
        .ok_or(ApiError::MissingConfig("Geoapify API key"))
}

/// Empty strings count as missing.
fn required(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
#[path = "proxy_test.rs"]
mod tests;
