//! City search for the itinerary builder: geocode the typed city, then
//! fetch sights around its first match.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use crate::api::{ApiError, TravelApi};
use crate::place::Place;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("city not found")]
    CityNotFound,

    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Normalise the search box value; blank input starts no search.
#[must_use]
pub fn search_input(raw: &str) -> Option<&str> {
    let city = raw.trim();
    (!city.is_empty()).then_some(city)
}

/// Resolve `city` to places in upstream relevance order.
///
/// # Errors
///
/// Returns `SearchError::CityNotFound` when geocoding has no results, or
/// the underlying `ApiError` when either call fails.
pub async fn search_places(api: &dyn TravelApi, city: &str) -> Result<Vec<Place>, SearchError> {
    let geocode = api.geocode(city).await?;
    let first = geocode.results.first().ok_or(SearchError::CityNotFound)?;

    let places = api.places(first.lon, first.lat).await?;
    log::debug!("{} places found near {city}", places.features.len());
    Ok(places.features.iter().map(Place::from_feature).collect())
}
