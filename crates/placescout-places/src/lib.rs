//! Places search against the Google Maps web services, plus merging of the
//! per-type result lists into one distance-sorted set.

pub mod aggregate;
pub mod api;
pub mod client;
pub mod error;
pub mod search;
pub mod types;

pub use aggregate::aggregate;
pub use api::{PageQuery, PlacesApi};
pub use client::GooglePlacesClient;
pub use error::PlacesError;
pub use search::{search_places, SearchOptions, SearchOutcome, TypeCount};
pub use types::{OpeningHours, PlaceDetails, PlaceSummary, SearchPage};
