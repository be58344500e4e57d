//! HTTP-facing error type shared by every route.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is rendered as `{"error": message}` with a fixed, generic
//! message. Upstream detail (status codes, provider bodies) is logged here
//! and never sent to the browser.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};

use crate::upstream::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// A required secret is not configured.
    #[error("{0} not configured")]
    MissingConfig(&'static str),

    /// A required query parameter is missing or empty.
    #[error("{0}")]
    BadRequest(&'static str),

    /// The third-party call failed; `message` is what the client sees.
    #[error("{message}")]
    Upstream { message: &'static str, source: UpstreamError },
}

impl ApiError {
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingConfig(_) | Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Wrap an upstream failure with the client-facing message.
    pub fn upstream(message: &'static str) -> impl FnOnce(UpstreamError) -> Self {
        move |source| Self::Upstream { message, source }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream { message, source } => {
                tracing::error!(error = %source, body = source.body().unwrap_or_default(), "{message}");
            }
            Self::MissingConfig(what) => tracing::warn!(%what, "request needs unconfigured secret"),
            Self::BadRequest(_) => {}
        }

        let body = serde_json::json!({ "error": self.to_string() });
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
#[path = "error_test.rs"]
mod tests;
