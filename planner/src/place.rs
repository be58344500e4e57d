//! Place records offered by the places search.

use crate::api::Feature;

pub const UNKNOWN_PLACE: &str = "Unknown Place";
pub const NO_ADDRESS: &str = "No address available";

/// A point of interest. Identity is structural; see `itinerary::EntryId`
/// for instance identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    pub name: String,
    pub address: String,
}

impl Place {
    #[must_use]
    pub fn new(name: impl Into<String>, address: impl Into<String>) -> Self {
        Self { name: name.into(), address: address.into() }
    }

    /// Build a place from a places feature, substituting placeholders for a
    /// missing or empty name/address.
    #[must_use]
    pub fn from_feature(feature: &Feature) -> Self {
        let props = &feature.properties;
        Self {
            name: non_empty(props.name.as_deref()).unwrap_or(UNKNOWN_PLACE).to_owned(),
            address: non_empty(props.formatted.as_deref()).unwrap_or(NO_ADDRESS).to_owned(),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}
