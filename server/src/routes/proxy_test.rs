use super::*;
use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::json;

use crate::routes::app;
use crate::routes::test_client::get_json;
use crate::state::test_helpers;

fn app_against(server: &MockServer) -> axum::Router {
    app(test_helpers::test_app_state(test_helpers::test_config(&server.base_url())))
}

// =============================================================================
// required
// =============================================================================

#[test]
fn required_treats_empty_as_missing() {
    assert_eq!(required(None), None);
    assert_eq!(required(Some("")), None);
    assert_eq!(required(Some("Paris")), Some("Paris"));
}

// =============================================================================
// /api/geocode
// =============================================================================

#[tokio::test]
async fn geocode_without_city_is_400() {
    let server = MockServer::start_async().await;
    let (status, body) = get_json(app_against(&server), "/api/geocode").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "City parameter is required"}));
}

#[tokio::test]
async fn geocode_with_empty_city_is_400() {
    let server = MockServer::start_async().await;
    let (status, body) = get_json(app_against(&server), "/api/geocode?city=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "City parameter is required");
}

#[tokio::test]
async fn geocode_relays_upstream_json() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v1/geocode/search")
                .query_param("text", "Paris")
                .query_param("format", "json")
                .query_param("apiKey", "geo-test-key");
            then.status(200)
                .json_body(json!({"results": [{"lon": 2.35, "lat": 48.85, "city": "Paris"}]}));
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/geocode?city=Paris").await;
    upstream.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"][0]["city"], "Paris");
    assert!(body["results"].is_array());
}

#[tokio::test]
async fn geocode_upstream_failure_is_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/geocode/search");
            then.status(401).json_body(json!({"statusCode": 401, "message": "Invalid apiKey"}));
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/geocode?city=Paris").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch geocoding data"}));
}

#[tokio::test]
async fn geocode_non_json_upstream_is_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v1/geocode/search");
            then.status(200).body("<html>maintenance</html>");
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/geocode?city=Paris").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch geocoding data");
}

#[tokio::test]
async fn geocode_without_key_is_500_missing_config() {
    let app = app(test_helpers::test_app_state(test_helpers::unconfigured()));
    let (status, body) = get_json(app, "/api/geocode?city=Paris").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Geoapify API key not configured"}));
}

#[tokio::test]
async fn geocode_unreachable_upstream_is_500() {
    let mut config = test_helpers::test_config("http://127.0.0.1:1");
    config.keys.geoapify = Some("geo-test-key".into());
    let app = app(test_helpers::test_app_state(config));
    let (status, body) = get_json(app, "/api/geocode?city=Paris").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to fetch geocoding data");
}

// =============================================================================
// /api/places
// =============================================================================

#[tokio::test]
async fn places_without_lat_is_400() {
    let server = MockServer::start_async().await;
    let (status, body) = get_json(app_against(&server), "/api/places?lon=2.35").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Longitude and latitude are required"}));
}

#[tokio::test]
async fn places_without_lon_is_400() {
    let server = MockServer::start_async().await;
    let (status, body) = get_json(app_against(&server), "/api/places?lat=48.85").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Longitude and latitude are required"}));
}

#[tokio::test]
async fn places_with_empty_lon_is_400() {
    let server = MockServer::start_async().await;
    let (status, body) = get_json(app_against(&server), "/api/places?lon=&lat=48.85").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Longitude and latitude are required");
}

#[tokio::test]
async fn places_missing_params_checked_before_key() {
    let app = app(test_helpers::test_app_state(test_helpers::unconfigured()));
    let (status, _) = get_json(app, "/api/places").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn places_relays_upstream_features() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/v2/places")
                .query_param("categories", "tourism.sights")
                .query_param("filter", "circle:2.35,48.85,50000")
                .query_param("limit", "6")
                .query_param("sort", "importance")
                .query_param("apiKey", "geo-test-key");
            then.status(200).json_body(json!({
                "type": "FeatureCollection",
                "features": [
                    {"properties": {"name": "Louvre", "formatted": "Rue de Rivoli, Paris"}},
                    {"properties": {"name": "Eiffel Tower", "formatted": "Champ de Mars, Paris"}}
                ]
            }));
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/places?lon=2.35&lat=48.85").await;
    upstream.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["features"].as_array().map(Vec::len), Some(2));
    assert_eq!(body["features"][1]["properties"]["name"], "Eiffel Tower");
}

#[tokio::test]
async fn places_upstream_failure_is_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/v2/places");
            then.status(503);
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/places?lon=2.35&lat=48.85").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch places data"}));
}

// =============================================================================
// /api/destination-images
// =============================================================================

#[tokio::test]
async fn images_without_query_is_400() {
    let server = MockServer::start_async().await;
    let (status, body) = get_json(app_against(&server), "/api/destination-images").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Query parameter is required"}));
}

#[tokio::test]
async fn images_relay_results_array() {
    let server = MockServer::start_async().await;
    let upstream = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/search/photos")
                .query_param("query", "paris")
                .query_param("per_page", "15")
                .query_param("client_id", "unsplash-test-key");
            then.status(200).json_body(json!({
                "total": 2,
                "total_pages": 1,
                "results": [
                    {"id": "a", "alt_description": "eiffel tower", "urls": {"regular": "https://img/a"}},
                    {"id": "b", "alt_description": null, "urls": {"regular": "https://img/b"}}
                ]
            }));
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/destination-images?query=paris").await;
    upstream.assert_async().await;
    assert_eq!(status, StatusCode::OK);

    let images = body.as_array().expect("body should be an array");
    assert_eq!(images.len(), 2);
    assert!(images.iter().all(|img| img["urls"]["regular"].is_string()));
}

#[tokio::test]
async fn images_empty_results_is_empty_array() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/photos");
            then.status(200).json_body(json!({"total": 0, "results": []}));
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/destination-images?query=nowhere").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn images_upstream_rejection_is_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/search/photos");
            then.status(401).json_body(json!({"errors": ["OAuth error: The access token is invalid"]}));
        })
        .await;

    let (status, body) = get_json(app_against(&server), "/api/destination-images?query=paris").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to fetch images"}));
}

#[tokio::test]
async fn images_without_key_is_500_missing_config() {
    let app = app(test_helpers::test_app_state(test_helpers::unconfigured()));
    let (status, body) = get_json(app, "/api/destination-images?query=paris").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Unsplash API key not configured"}));
}
