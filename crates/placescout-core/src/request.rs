use thiserror::Error;

use crate::place::Coordinate;

/// Reasons a search cannot be constructed. All of these are fatal and are
/// raised before any network call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RequestError {
    #[error("radius must be a positive number of miles, got {0}")]
    InvalidRadius(f64),

    #[error("radius {radius} miles exceeds the maximum of {max} miles")]
    RadiusTooLarge { radius: f64, max: f64 },

    #[error("at least one place type is required")]
    NoPlaceTypes,

    #[error("origin coordinate {0} is out of range")]
    InvalidOrigin(Coordinate),
}

/// A validated, immutable search: where, how far, and for what.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    location: String,
    origin: Coordinate,
    radius_miles: f64,
    place_types: Vec<String>,
}

impl SearchRequest {
    /// Builds a request after normalising `place_types` (trimmed, lowercased,
    /// de-duplicated in first-seen order).
    ///
    /// # Errors
    ///
    /// Returns [`RequestError`] when the radius is not positive, exceeds
    /// `max_radius_miles`, no usable place type remains, or the origin is out
    /// of range.
    pub fn new(
        location: impl Into<String>,
        origin: Coordinate,
        radius_miles: f64,
        place_types: &[String],
        max_radius_miles: f64,
    ) -> Result<Self, RequestError> {
        let place_types = normalize_place_types(place_types.iter().map(String::as_str));
        validate_search_inputs(radius_miles, &place_types, max_radius_miles)?;
        if !origin.is_valid() {
            return Err(RequestError::InvalidOrigin(origin));
        }

        Ok(Self {
            location: location.into(),
            origin,
            radius_miles,
            place_types,
        })
    }

    /// The location as the user typed it.
    #[must_use]
    pub fn location(&self) -> &str {
        &self.location
    }

    #[must_use]
    pub fn origin(&self) -> Coordinate {
        self.origin
    }

    #[must_use]
    pub fn radius_miles(&self) -> f64 {
        self.radius_miles
    }

    #[must_use]
    pub fn place_types(&self) -> &[String] {
        &self.place_types
    }
}

/// Checks the parts of a search that do not depend on geocoding, so bad
/// input fails before the first request is sent.
///
/// # Errors
///
/// Returns [`RequestError`] for a non-positive or oversized radius, or an
/// empty type list.
pub fn validate_search_inputs(
    radius_miles: f64,
    place_types: &[String],
    max_radius_miles: f64,
) -> Result<(), RequestError> {
    if !radius_miles.is_finite() || radius_miles <= 0.0 {
        return Err(RequestError::InvalidRadius(radius_miles));
    }
    if radius_miles > max_radius_miles {
        return Err(RequestError::RadiusTooLarge {
            radius: radius_miles,
            max: max_radius_miles,
        });
    }
    if place_types.iter().all(|t| t.trim().is_empty()) {
        return Err(RequestError::NoPlaceTypes);
    }
    Ok(())
}

/// Splits a comma-separated list such as `"Cafe, bakery,,cafe"` into
/// `["cafe", "bakery"]`.
#[must_use]
pub fn parse_place_types(raw: &str) -> Vec<String> {
    normalize_place_types(raw.split(','))
}

fn normalize_place_types<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for t in raw {
        let t = t.trim().to_lowercase();
        if !t.is_empty() && !out.contains(&t) {
            out.push(t);
        }
    }
    out
}
