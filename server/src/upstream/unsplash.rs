//! Unsplash photo search.

use super::{UpstreamError, get_json};

pub const IMAGES_PER_PAGE: &str = "15";

/// `GET {base}/search/photos?query=..&per_page=15&client_id=..`, returning
/// only the `results` array.
pub async fn search_photos(
    http: &reqwest::Client,
    base_url: &str,
    api_key: &str,
    query: &str,
) -> Result<Vec<serde_json::Value>, UpstreamError> {
    let url = format!("{base_url}/search/photos");
    let body = get_json(http, &url, &[("query", query), ("per_page", IMAGES_PER_PAGE), ("client_id", api_key)]).await?;
    extract_results(body)
}

fn extract_results(body: serde_json::Value) -> Result<Vec<serde_json::Value>, UpstreamError> {
    match body {
        serde_json::Value::Object(mut map) => match map.remove("results") {
            Some(serde_json::Value::Array(results)) => Ok(results),
            _ => Err(UpstreamError::Decode("missing results array".into())),
        },
        _ => Err(UpstreamError::Decode("expected a JSON object".into())),
    }
}
