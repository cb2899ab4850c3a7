//! De-duplication of search results across place types.

use std::collections::HashMap;

use placescout_core::Place;

/// Collapses places sharing a `place_id` and sorts the survivors by distance.
///
/// The first record seen for an id is kept. Later duplicates add their tags
/// and fill optional fields the first one lacks. The sort is stable, so equal
/// distances keep first-seen order, and running this on its own output
/// changes nothing.
#[must_use]
pub fn aggregate(places: Vec<Place>) -> Vec<Place> {
    let mut index_by_id: HashMap<String, usize> = HashMap::with_capacity(places.len());
    let mut merged: Vec<Place> = Vec::with_capacity(places.len());

    for place in places {
        if let Some(&idx) = index_by_id.get(&place.place_id) {
            let kept = &mut merged[idx];
            kept.types.extend(place.types.iter().cloned());
            kept.fill_missing_from(&place);
        } else {
            index_by_id.insert(place.place_id.clone(), merged.len());
            merged.push(place);
        }
    }

    merged.sort_by(|a, b| a.distance_miles.total_cmp(&b.distance_miles));
    merged
}
