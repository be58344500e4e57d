//! Upstream: thin clients for the third-party APIs the proxy routes relay.
//!
//! DESIGN
//! ======
//! Each provider module builds one GET request with the server-held key
//! attached and hands the raw JSON back. There are no retries and no
//! per-request timeout beyond the shared client's defaults. Pure parsing
//! lives in `parse_body` and the provider modules for testability.

pub mod geoapify;
pub mod unsplash;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced while talking to a third-party API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The request could not be sent or the body could not be read.
    #[error("upstream request failed: {0}")]
    Request(String),

    /// The provider returned a non-success HTTP status.
    #[error("upstream response error: status {status}")]
    Status { status: u16, body: String },

    /// The provider response was not the JSON shape we expected.
    #[error("upstream response parse failed: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Provider response body, when the failure carried one. Logged, never relayed.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Status { body, .. } => Some(body),
            Self::Request(_) | Self::Decode(_) => None,
        }
    }
}

// =============================================================================
// REQUEST
// =============================================================================

/// Issue a GET with query parameters and decode a JSON body.
pub(crate) async fn get_json(
    http: &reqwest::Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<serde_json::Value, UpstreamError> {
    let response = http
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| UpstreamError::Request(e.to_string()))?;

    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| UpstreamError::Request(e.to_string()))?;

    if !status.is_success() {
        return Err(UpstreamError::Status { status: status.as_u16(), body: text });
    }

    parse_body(&text)
}

fn parse_body(text: &str) -> Result<serde_json::Value, UpstreamError> {
    serde_json::from_str(text).map_err(|e| UpstreamError::Decode(e.to_string()))
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
