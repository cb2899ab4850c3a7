use std::collections::BTreeSet;

use placescout_core::Place;

/// Totals printed after a run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryStats {
    pub total_places: usize,
    /// Distinct search terms across all places.
    pub unique_types: usize,
    pub with_phone: usize,
    pub with_website: usize,
    pub with_email: usize,
    pub avg_distance: Option<f64>,
    pub min_distance: Option<f64>,
    pub max_distance: Option<f64>,
    /// Mean over rated places only.
    pub avg_rating: Option<f64>,
}

#[must_use]
pub fn summarize(places: &[Place]) -> SummaryStats {
    let types: BTreeSet<&str> = places
        .iter()
        .flat_map(|p| p.types.iter().map(String::as_str))
        .collect();

    let distances: Vec<f64> = places.iter().map(|p| p.distance_miles).collect();
    let ratings: Vec<f64> = places.iter().filter_map(|p| p.rating).collect();

    SummaryStats {
        total_places: places.len(),
        unique_types: types.len(),
        with_phone: places.iter().filter(|p| p.phone.is_some()).count(),
        with_website: places.iter().filter(|p| p.website.is_some()).count(),
        with_email: places.iter().filter(|p| p.email.is_some()).count(),
        avg_distance: mean(&distances),
        min_distance: distances.iter().copied().reduce(f64::min),
        max_distance: distances.iter().copied().reduce(f64::max),
        avg_rating: mean(&ratings),
    }
}

#[allow(clippy::cast_precision_loss)] // counts far below 2^52
fn mean(values: &[f64]) -> Option<f64> {
    (!values.is_empty()).then(|| values.iter().sum::<f64>() / values.len() as f64)
}
