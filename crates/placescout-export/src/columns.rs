//! Tabular projection of a [`Place`], shared by both writers.

use placescout_core::Place;

pub const COLUMNS: [&str; 15] = [
    "Place_ID",
    "Name",
    "Address",
    "Types",
    "Primary_Type",
    "Distance",
    "Latitude",
    "Longitude",
    "Phone",
    "Website",
    "Email",
    "Email_Source",
    "Opening_Hours",
    "Rating",
    "Review_Count",
];

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    fn optional_text(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(s) if !s.is_empty() => Cell::Text(s.to_string()),
            _ => Cell::Empty,
        }
    }

    /// Text written to a CSV field; empty for [`Cell::Empty`].
    #[must_use]
    pub fn to_field(&self) -> String {
        match self {
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Empty => String::new(),
        }
    }
}

#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// One cell per entry of [`COLUMNS`], in the same order.
#[must_use]
pub fn place_row(place: &Place) -> Vec<Cell> {
    vec![
        Cell::Text(place.place_id.clone()),
        Cell::Text(place.name.clone()),
        Cell::optional_text(Some(place.address.as_str())),
        Cell::optional_text(Some(place.types_label().as_str())),
        Cell::optional_text(place.primary_type.as_deref()),
        Cell::Number(round2(place.distance_miles)),
        Cell::Number(place.location.lat),
        Cell::Number(place.location.lng),
        Cell::optional_text(place.phone.as_deref()),
        Cell::optional_text(place.website.as_deref()),
        Cell::optional_text(place.email.as_deref()),
        Cell::optional_text(place.email_source.map(|s| s.to_string()).as_deref()),
        Cell::optional_text(place.opening_hours.as_deref()),
        place.rating.map_or(Cell::Empty, Cell::Number),
        place
            .review_count
            .map_or(Cell::Empty, |n| Cell::Number(f64::from(n))),
    ]
}
