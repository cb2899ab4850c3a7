use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A WGS-84 latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    #[must_use]
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns `true` when both components are finite and within the
    /// latitude/longitude ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

/// How an email address was expressed on the page it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailOrigin {
    Mailto,
    JsonLd,
    Page,
    Obfuscated,
}

impl std::fmt::Display for EmailOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EmailOrigin::Mailto => write!(f, "mailto"),
            EmailOrigin::JsonLd => write!(f, "json-ld"),
            EmailOrigin::Page => write!(f, "page text"),
            EmailOrigin::Obfuscated => write!(f, "obfuscated"),
        }
    }
}

/// Which kind of page on a website produced an email.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Homepage,
    ContactPath,
    DiscoveredLink,
}

impl std::fmt::Display for PageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PageKind::Homepage => write!(f, "homepage"),
            PageKind::ContactPath => write!(f, "contact page"),
            PageKind::DiscoveredLink => write!(f, "linked page"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailSource {
    pub origin: EmailOrigin,
    pub page: PageKind,
}

impl std::fmt::Display for EmailSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.origin, self.page)
    }
}

/// A business location returned by the places search, enriched in place by
/// later pipeline stages.
///
/// `types` holds the search terms the place matched, not the upstream
/// category list; `primary_type` is the first upstream category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub address: String,
    pub types: BTreeSet<String>,
    pub primary_type: Option<String>,
    pub location: Coordinate,
    /// Great-circle distance from the search origin. Unrounded.
    pub distance_miles: f64,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
    pub rating: Option<f64>,
    pub review_count: Option<u32>,
    pub email: Option<String>,
    pub email_source: Option<EmailSource>,
}

impl Place {
    /// Whether the details lookup would add nothing to this record.
    #[must_use]
    pub fn has_contact_details(&self) -> bool {
        self.phone.is_some() && self.website.is_some() && self.opening_hours.is_some()
    }

    /// Copies every optional field that is missing here but present on
    /// `other`. Identity, distance and tags are left alone.
    pub fn fill_missing_from(&mut self, other: &Place) {
        fn fill<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if slot.is_none() {
                slot.clone_from(value);
            }
        }

        if self.address.is_empty() && !other.address.is_empty() {
            self.address.clone_from(&other.address);
        }
        fill(&mut self.primary_type, &other.primary_type);
        fill(&mut self.phone, &other.phone);
        fill(&mut self.website, &other.website);
        fill(&mut self.opening_hours, &other.opening_hours);
        fill(&mut self.rating, &other.rating);
        fill(&mut self.review_count, &other.review_count);
        if self.email.is_none() && other.email.is_some() {
            self.email.clone_from(&other.email);
            self.email_source = other.email_source;
        }
    }

    /// Matched tags joined for display, in sorted order.
    #[must_use]
    pub fn types_label(&self) -> String {
        self.types.iter().map(String::as_str).collect::<Vec<_>>().join("; ")
    }
}
