//! Browser-side view models for the Wayfarer travel planner.
//!
//! DESIGN
//! ======
//! Every widget is a plain struct that maps state to a view value or to a
//! batch of render instructions. Nothing here touches the DOM; the `dom`
//! module (behind the `hydrate` feature) is the only code that mutates
//! elements, so the state machines are testable without a browser.

pub mod api;
pub mod gallery;
pub mod itinerary;
pub mod map;
pub mod place;
pub mod search;
pub mod weather;

#[cfg(feature = "hydrate")]
pub mod dom;

#[cfg(test)]
pub(crate) mod mock_api;
