//! Wire types for the Places Text Search, Place Details and Geocoding
//! responses. Only the fields placescout reads are modelled.

use serde::Deserialize;

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

impl OpeningHours {
    /// Weekday descriptions joined with `"; "`, or `None` when the API only
    /// sent `open_now`.
    #[must_use]
    pub fn summary(&self) -> Option<String> {
        if self.weekday_text.is_empty() {
            None
        } else {
            Some(self.weekday_text.join("; "))
        }
    }
}

/// One result of a text search page.
#[derive(Debug, Clone, Deserialize)]
pub struct PlaceSummary {
    pub place_id: String,
    #[serde(default)]
    pub name: String,
    pub formatted_address: Option<String>,
    pub vicinity: Option<String>,
    pub geometry: Geometry,
    #[serde(default)]
    pub types: Vec<String>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
}

/// The subset of Place Details placescout requests via `fields=`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaceDetails {
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub international_phone_number: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
}

impl PlaceDetails {
    /// Local number preferred, international as fallback.
    #[must_use]
    pub fn phone(&self) -> Option<&str> {
        self.formatted_phone_number
            .as_deref()
            .or(self.international_phone_number.as_deref())
            .filter(|p| !p.trim().is_empty())
    }
}

/// One page of text search results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub results: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TextSearchResponse {
    #[serde(default)]
    pub results: Vec<PlaceSummary>,
    pub next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailsResponse {
    pub result: Option<PlaceDetails>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResponse {
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GeocodeResult {
    pub geometry: Geometry,
}
