//! The places capability the search pipeline depends on.

use async_trait::async_trait;
use placescout_core::Coordinate;

use crate::error::PlacesError;
use crate::types::{PlaceDetails, SearchPage};

/// Parameters for one text search page. A `page_token` continues an earlier
/// query; the other fields are then ignored upstream.
#[derive(Debug, Clone, Copy)]
pub struct PageQuery<'a> {
    pub place_type: &'a str,
    pub origin: Coordinate,
    pub radius_meters: f64,
    pub page_token: Option<&'a str>,
}

/// The places service as the search pipeline sees it.
///
/// [`crate::GooglePlacesClient`] talks to the real service; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    /// Resolve a free-form location to a coordinate.
    ///
    /// # Errors
    ///
    /// [`PlacesError::LocationUnresolvable`] when nothing matches, or any
    /// transport/API error.
    async fn geocode(&self, location: &str) -> Result<Coordinate, PlacesError>;

    /// Fetch one page of summaries.
    ///
    /// # Errors
    ///
    /// Any transport/API error for this page.
    async fn search_page(&self, query: &PageQuery<'_>) -> Result<SearchPage, PlacesError>;

    /// Fetch phone, website and hours for one place.
    ///
    /// # Errors
    ///
    /// Any transport/API error for this lookup.
    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;
}
