//! Per-type paginated search with local distance filtering and details
//! lookups.
//!
//! One place type failing does not stop the others: its error is recorded as
//! a [`Failure`] and the search moves on. Only credential problems abort.

use std::collections::BTreeSet;
use std::time::Duration;

use futures::stream::{self, StreamExt};
use placescout_core::{
    haversine_miles, miles_to_meters, AppConfig, Coordinate, Failure, FailureStage, Place,
    SearchRequest,
};

use crate::api::{PageQuery, PlacesApi};
use crate::error::PlacesError;
use crate::types::{PlaceDetails, PlaceSummary};

/// Tuning for [`search_places`].
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Look up phone, website and hours for places whose summary lacks them.
    pub fetch_details: bool,
    /// Pages fetched per place type before giving up on the remainder.
    pub max_pages_per_type: usize,
    /// Wait before requesting a continuation page; fresh page tokens are
    /// rejected upstream for a short while.
    pub page_token_delay_ms: u64,
    /// Place types searched at the same time.
    pub concurrency: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fetch_details: true,
            max_pages_per_type: 3,
            page_token_delay_ms: 2000,
            concurrency: 1,
        }
    }
}

impl SearchOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig, fetch_details: bool) -> Self {
        Self {
            fetch_details,
            max_pages_per_type: config.max_pages_per_type,
            page_token_delay_ms: config.page_token_delay_ms,
            concurrency: config.search_concurrency,
        }
    }
}

/// In-radius places found for one type, for progress output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeCount {
    pub place_type: String,
    pub found: usize,
}

/// Everything a search produced: places in type order then upstream order
/// (duplicates across types included), and the recovered failures.
#[derive(Debug, Default)]
pub struct SearchOutcome {
    pub places: Vec<Place>,
    pub failures: Vec<Failure>,
    pub type_counts: Vec<TypeCount>,
}

struct TypeOutcome {
    place_type: String,
    places: Vec<Place>,
    failures: Vec<Failure>,
}

/// Searches every place type in `request` and returns the concatenated
/// in-radius results.
///
/// Up to `options.concurrency` types run at once; results are still
/// concatenated in request order.
///
/// # Errors
///
/// Returns [`PlacesError::InvalidCredential`] if the API rejects the key.
/// Every other error is recorded in [`SearchOutcome::failures`].
pub async fn search_places<A>(
    api: &A,
    request: &SearchRequest,
    options: &SearchOptions,
) -> Result<SearchOutcome, PlacesError>
where
    A: PlacesApi + ?Sized,
{
    let per_type: Vec<Result<TypeOutcome, PlacesError>> = stream::iter(request.place_types())
        .map(|place_type| search_place_type(api, request, place_type, options))
        .buffered(options.concurrency.max(1))
        .collect()
        .await;

    let mut outcome = SearchOutcome::default();
    for result in per_type {
        let type_outcome = result?;
        outcome.type_counts.push(TypeCount {
            place_type: type_outcome.place_type,
            found: type_outcome.places.len(),
        });
        outcome.places.extend(type_outcome.places);
        outcome.failures.extend(type_outcome.failures);
    }

    Ok(outcome)
}

async fn search_place_type<A>(
    api: &A,
    request: &SearchRequest,
    place_type: &str,
    options: &SearchOptions,
) -> Result<TypeOutcome, PlacesError>
where
    A: PlacesApi + ?Sized,
{
    let mut outcome = TypeOutcome {
        place_type: place_type.to_string(),
        places: Vec::new(),
        failures: Vec::new(),
    };
    let radius_meters = miles_to_meters(request.radius_miles());
    let mut page_token: Option<String> = None;
    let mut pages: usize = 0;

    loop {
        if page_token.is_some() && options.page_token_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(options.page_token_delay_ms)).await;
        }

        let query = PageQuery {
            place_type,
            origin: request.origin(),
            radius_meters,
            page_token: page_token.as_deref(),
        };

        let page = match api.search_page(&query).await {
            Ok(page) => page,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                tracing::error!(
                    place_type,
                    page = pages + 1,
                    error = %e,
                    "place search failed; continuing with remaining types"
                );
                outcome
                    .failures
                    .push(Failure::new(FailureStage::Search, place_type, e.to_string()));
                break;
            }
        };
        pages += 1;

        let received = page.results.len();
        let before = outcome.places.len();
        outcome.places.extend(page.results.into_iter().filter_map(|summary| {
            place_from_summary(summary, request.origin(), request.radius_miles(), place_type)
        }));
        tracing::debug!(
            place_type,
            page = pages,
            received,
            kept = outcome.places.len() - before,
            "fetched search page"
        );

        match page.next_page_token {
            Some(token) if pages >= options.max_pages_per_type => {
                tracing::warn!(
                    place_type,
                    pages,
                    next_page_token = %token,
                    "page cap reached; remaining results not fetched"
                );
                break;
            }
            Some(token) => page_token = Some(token),
            None => break,
        }
    }

    if options.fetch_details {
        for place in &mut outcome.places {
            if place.has_contact_details() {
                continue;
            }
            match api.place_details(&place.place_id).await {
                Ok(details) => apply_details(place, details),
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        place_id = %place.place_id,
                        error = %e,
                        "details lookup failed; keeping place without contact fields"
                    );
                    outcome.failures.push(Failure::new(
                        FailureStage::Details,
                        place.place_id.clone(),
                        e.to_string(),
                    ));
                }
            }
        }
    }

    Ok(outcome)
}

/// Converts a summary into a [`Place`] tagged with `place_type`, or `None`
/// when it lies outside the radius. Upstream radius filtering is only a
/// bias, so this check is authoritative.
fn place_from_summary(
    summary: PlaceSummary,
    origin: Coordinate,
    radius_miles: f64,
    place_type: &str,
) -> Option<Place> {
    let location = Coordinate::new(summary.geometry.location.lat, summary.geometry.location.lng);
    if !location.is_valid() {
        tracing::debug!(place_id = %summary.place_id, "skipping result with invalid coordinate");
        return None;
    }

    let distance_miles = haversine_miles(origin, location);
    if distance_miles > radius_miles {
        tracing::debug!(
            place_id = %summary.place_id,
            distance_miles,
            radius_miles,
            "dropping result outside radius"
        );
        return None;
    }

    let phone = summary
        .formatted_phone_number
        .or(summary.international_phone_number)
        .filter(|p| !p.trim().is_empty());

    Some(Place {
        place_id: summary.place_id,
        name: summary.name,
        address: summary
            .formatted_address
            .or(summary.vicinity)
            .unwrap_or_default(),
        types: BTreeSet::from([place_type.to_string()]),
        primary_type: summary.types.into_iter().next(),
        location,
        distance_miles,
        phone,
        website: summary.website.filter(|w| !w.trim().is_empty()),
        opening_hours: summary.opening_hours.and_then(|h| h.summary()),
        rating: summary.rating,
        review_count: summary.user_ratings_total,
        email: None,
        email_source: None,
    })
}

/// Merges a details response into `place`. The details address and rating
/// are fresher than the summary's; contact fields only fill gaps.
fn apply_details(place: &mut Place, details: PlaceDetails) {
    if place.phone.is_none() {
        place.phone = details.phone().map(str::to_string);
    }
    if let Some(address) = details.formatted_address.filter(|a| !a.trim().is_empty()) {
        place.address = address;
    }
    if place.website.is_none() {
        place.website = details.website.filter(|w| !w.trim().is_empty());
    }
    if place.opening_hours.is_none() {
        place.opening_hours = details.opening_hours.and_then(|h| h.summary());
    }
    if details.rating.is_some() {
        place.rating = details.rating;
    }
    if details.user_ratings_total.is_some() {
        place.review_count = details.user_ratings_total;
    }
}
