//! Server configuration parsed from environment variables.
//!
//! Secrets are optional at startup: a missing key only disables the routes
//! that need it, which then answer with a 500 `MissingConfig` error.

use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GEOAPIFY_BASE_URL: &str = "https://api.geoapify.com";
pub const DEFAULT_UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT: {0}")]
    InvalidPort(String),
}

/// Third-party API keys held server-side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApiKeys {
    pub weather: Option<String>,
    pub google_maps: Option<String>,
    pub geoapify: Option<String>,
    pub unsplash: Option<String>,
}

/// Upstream base URLs, without trailing slash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamUrls {
    pub geoapify: String,
    pub unsplash: String,
}

impl Default for UpstreamUrls {
    fn default() -> Self {
        Self { geoapify: DEFAULT_GEOAPIFY_BASE_URL.into(), unsplash: DEFAULT_UNSPLASH_BASE_URL.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub public_dir: PathBuf,
    pub keys: ApiKeys,
    pub upstream: UpstreamUrls,
}

impl ServerConfig {
    /// Build typed server config from environment variables.
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `PUBLIC_DIR`: default `<crate>/public`
    /// - `WEATHER_API_KEY`, `GOOGLE_MAPS_API_KEY`, `GEOAPIFY_API_KEY`, `UNSPLASH_API_KEY`
    /// - `GEOAPIFY_BASE_URL`, `UNSPLASH_BASE_URL`: upstream overrides
    ///
    /// # Errors
    ///
    /// Returns an error if `PORT` is set but is not a valid port number.
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = parse_port(env_non_empty("PORT").as_deref())?;
        let public_dir = env_non_empty("PUBLIC_DIR").map_or_else(default_public_dir, PathBuf::from);

        let keys = ApiKeys {
            weather: env_non_empty("WEATHER_API_KEY"),
            google_maps: env_non_empty("GOOGLE_MAPS_API_KEY"),
            geoapify: env_non_empty("GEOAPIFY_API_KEY"),
            unsplash: env_non_empty("UNSPLASH_API_KEY"),
        };

        let upstream = UpstreamUrls {
            geoapify: base_url(env_non_empty("GEOAPIFY_BASE_URL"), DEFAULT_GEOAPIFY_BASE_URL),
            unsplash: base_url(env_non_empty("UNSPLASH_BASE_URL"), DEFAULT_UNSPLASH_BASE_URL),
        };

        Ok(Self { port, public_dir, keys, upstream })
    }
}

/// Read an env var, treating empty or whitespace-only values as unset.
fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn parse_port(raw: Option<&str>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidPort(raw.to_owned())),
    }
}

fn base_url(raw: Option<String>, default: &str) -> String {
    raw.unwrap_or_else(|| default.to_owned())
        .trim_end_matches('/')
        .to_owned()
}

fn default_public_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("public")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
