//! Contact-email discovery on business websites.
//!
//! [`EmailExtractor`] visits a bounded number of pages per site through a
//! [`PageFetcher`], honouring robots.txt, and reports the best address it
//! finds. [`enrich_places`] runs it over a batch of places.

pub mod email;
pub mod enrich;
pub mod error;
pub mod extractor;
pub mod fetch;
pub mod robots;
pub mod scan;
pub mod urls;

pub use email::{is_plausible_contact, looks_like_email};
pub use enrich::{enrich_places, EnrichmentReport};
pub use error::FetchError;
pub use extractor::{
    EmailExtractor, ExtractionResult, ExtractionStatus, ExtractorOptions, CONTACT_PATHS,
    DEFAULT_MAX_PAGES_PER_SITE,
};
pub use fetch::{HttpFetcher, PageFetcher};
pub use robots::RobotsRules;
pub use scan::{choose_best, discover_contact_links, scan_page, Candidate};
pub use urls::{normalize_website, same_site, site_domain};
