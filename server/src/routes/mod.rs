//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! This module binds the key relay and proxy endpoints under `/api` and
//! serves the browser bundle from the public directory as the fallback.
//! Every route is a single request/response relay; none of them hold state
//! beyond `AppState`.

pub mod keys;
pub mod proxy;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Full application router: API routes + static assets at `/`.
pub fn app(state: AppState) -> Router {
    let public = ServeDir::new(&state.config.public_dir).append_index_html_on_directories(true);

    api_routes(state)
        .fallback_service(public)
        .layer(TraceLayer::new_for_http())
}

/// Key relay and proxy routes.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/weather-key", get(keys::weather_key))
        .route("/api/maps-key", get(keys::maps_key))
        .route("/api/geocode", get(proxy::geocode))
        .route("/api/places", get(proxy::places))
        .route("/api/destination-images", get(proxy::destination_images))
        .route("/favicon.ico", get(favicon))
        .route("/healthz", get(healthz))
        .layer(cors)
        .with_state(state)
}

/// Browsers request a favicon on every load; answer without a body so the
/// static fallback does not log a 404.
async fn favicon() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}


#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
