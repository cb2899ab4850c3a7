use std::path::PathBuf;

use crate::ConfigError;

#[derive(Clone)]
pub struct AppConfig {
    pub google_maps_api_key: Option<String>,
    pub places_base_url: String,
    pub log_level: String,
    pub profiles_path: PathBuf,
    pub default_location: String,
    pub default_place_type: String,
    pub default_distance_miles: f64,
    pub max_distance_miles: f64,
    pub places_request_timeout_secs: u64,
    pub page_token_delay_ms: u64,
    pub max_pages_per_type: usize,
    pub search_concurrency: usize,
    pub email_request_timeout_secs: u64,
    pub max_emails_per_website: usize,
    pub max_pages_per_site: usize,
    pub email_concurrency: usize,
    pub user_agent: String,
}

impl AppConfig {
    /// The Places API key, or `MissingEnvVar` when it was never set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `GOOGLE_MAPS_API_KEY` is unset or blank.
    pub fn require_api_key(&self) -> Result<&str, ConfigError> {
        self.google_maps_api_key
            .as_deref()
            .ok_or_else(|| ConfigError::MissingEnvVar("GOOGLE_MAPS_API_KEY".to_string()))
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field(
                "google_maps_api_key",
                &self.google_maps_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("places_base_url", &self.places_base_url)
            .field("log_level", &self.log_level)
            .field("profiles_path", &self.profiles_path)
            .field("default_location", &self.default_location)
            .field("default_place_type", &self.default_place_type)
            .field("default_distance_miles", &self.default_distance_miles)
            .field("max_distance_miles", &self.max_distance_miles)
            .field(
                "places_request_timeout_secs",
                &self.places_request_timeout_secs,
            )
            .field("page_token_delay_ms", &self.page_token_delay_ms)
            .field("max_pages_per_type", &self.max_pages_per_type)
            .field("search_concurrency", &self.search_concurrency)
            .field(
                "email_request_timeout_secs",
                &self.email_request_timeout_secs,
            )
            .field("max_emails_per_website", &self.max_emails_per_website)
            .field("max_pages_per_site", &self.max_pages_per_site)
            .field("email_concurrency", &self.email_concurrency)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}
