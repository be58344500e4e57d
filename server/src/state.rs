//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the immutable server config and one pooled HTTP client reused
//! for every upstream call. Nothing here is mutated after startup.

use std::sync::Arc;

use crate::config::ServerConfig;

/// Shared application state, injected into Axum handlers via State extractor.
/// Cloned per request by Axum; the config is behind an `Arc` and the client is a handle.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub http: reqwest::Client,
}

impl AppState {
    #[must_use]
    pub fn new(config: ServerConfig, http: reqwest::Client) -> Self {
        Self { config: Arc::new(config), http }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
