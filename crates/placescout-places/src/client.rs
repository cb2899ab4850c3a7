//! HTTP client for the Google Maps Places and Geocoding web services.
//!
//! Wraps `reqwest` with key management, endpoint URL building and typed
//! response deserialization. Every response is checked for its `"status"`
//! envelope field before being decoded; see [`GooglePlacesClient::check_status`].

use std::time::Duration;

use async_trait::async_trait;
use placescout_core::Coordinate;
use reqwest::{Client, Url};

use crate::api::{PageQuery, PlacesApi};
use crate::error::PlacesError;
use crate::types::{DetailsResponse, GeocodeResponse, PlaceDetails, SearchPage, TextSearchResponse};

const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/";
const DEFAULT_USER_AGENT: &str = "placescout/0.1 (contact-discovery)";

const TEXT_SEARCH_ENDPOINT: &str = "place/textsearch/json";
const DETAILS_ENDPOINT: &str = "place/details/json";
const GEOCODE_ENDPOINT: &str = "geocode/json";

const DETAILS_FIELDS: &str = "formatted_address,formatted_phone_number,\
international_phone_number,opening_hours,website,rating,user_ratings_total";

/// Text search rejects a larger location bias radius. The local distance
/// filter still applies the real radius.
const MAX_BIAS_RADIUS_METERS: f64 = 50_000.0;

/// Client for the Places Text Search, Place Details and Geocoding endpoints.
///
/// Use [`GooglePlacesClient::new`] for production or
/// [`GooglePlacesClient::with_base_url`] to point at a mock server in tests.
pub struct GooglePlacesClient {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl std::fmt::Debug for GooglePlacesClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GooglePlacesClient")
            .field("api_key", &"[redacted]")
            .field("base_url", &self.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl GooglePlacesClient {
    /// Creates a new client pointed at the production API.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, timeout_secs: u64) -> Result<Self, PlacesError> {
        Self::with_base_url(api_key, timeout_secs, DEFAULT_USER_AGENT, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`PlacesError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`PlacesError::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        user_agent: &str,
        base_url: &str,
    ) -> Result<Self, PlacesError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Normalise to exactly one trailing slash so endpoint paths are
        // joined below the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| PlacesError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
        })
    }

    /// Builds the full request URL for `endpoint` with percent-encoded query
    /// parameters, `key` first.
    fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url, PlacesError> {
        let mut url = self
            .base_url
            .join(endpoint)
            .map_err(|e| PlacesError::InvalidBaseUrl {
                url: format!("{}{endpoint}", self.base_url),
                reason: e.to_string(),
            })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            for (k, v) in params {
                pairs.append_pair(k, v);
            }
        }
        Ok(url)
    }

    /// Sends a GET request, asserts a 2xx HTTP status, and parses the
    /// response body as JSON.
    ///
    /// `context` names the call in errors; the URL is kept out of them
    /// because it carries the key.
    async fn request_json(&self, url: Url, context: &str) -> Result<serde_json::Value, PlacesError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(reqwest::Error::without_url)?;
        let response = response
            .error_for_status()
            .map_err(reqwest::Error::without_url)?;
        let body = response.text().await.map_err(reqwest::Error::without_url)?;
        serde_json::from_str(&body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }

    /// Checks the top-level `"status"` field. `OK` and `ZERO_RESULTS` pass;
    /// `REQUEST_DENIED` is a credential problem; anything else is an API
    /// error carrying the upstream `error_message`.
    fn check_status(body: &serde_json::Value, context: &str) -> Result<(), PlacesError> {
        let status = body
            .get("status")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("UNKNOWN_ERROR");
        let message = body
            .get("error_message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default();

        match status {
            "OK" | "ZERO_RESULTS" => Ok(()),
            "REQUEST_DENIED" => Err(PlacesError::InvalidCredential(if message.is_empty() {
                "request denied".to_string()
            } else {
                message.to_string()
            })),
            other => Err(PlacesError::Api {
                status: other.to_string(),
                message: message.to_string(),
                context: context.to_string(),
            }),
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(
        body: serde_json::Value,
        context: &str,
    ) -> Result<T, PlacesError> {
        serde_json::from_value(body).map_err(|e| PlacesError::Deserialize {
            context: context.to_string(),
            source: e,
        })
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesClient {
    async fn geocode(&self, location: &str) -> Result<Coordinate, PlacesError> {
        let context = format!("geocode(address={location})");
        let url = self.build_url(GEOCODE_ENDPOINT, &[("address", location)])?;
        let body = self.request_json(url, &context).await?;
        Self::check_status(&body, &context)?;

        let envelope: GeocodeResponse = Self::decode(body, &context)?;
        let first = envelope
            .results
            .first()
            .ok_or_else(|| PlacesError::LocationUnresolvable(location.to_string()))?;

        Ok(Coordinate::new(
            first.geometry.location.lat,
            first.geometry.location.lng,
        ))
    }

    async fn search_page(&self, query: &PageQuery<'_>) -> Result<SearchPage, PlacesError> {
        let context = format!("textsearch(query={})", query.place_type);
        let url = if let Some(token) = query.page_token {
            self.build_url(TEXT_SEARCH_ENDPOINT, &[("pagetoken", token)])?
        } else {
            let location = query.origin.to_string();
            let radius = format!("{:.0}", query.radius_meters.min(MAX_BIAS_RADIUS_METERS));
            self.build_url(
                TEXT_SEARCH_ENDPOINT,
                &[
                    ("query", query.place_type),
                    ("location", &location),
                    ("radius", &radius),
                ],
            )?
        };

        let body = self.request_json(url, &context).await?;
        Self::check_status(&body, &context)?;

        let envelope: TextSearchResponse = Self::decode(body, &context)?;
        Ok(SearchPage {
            results: envelope.results,
            next_page_token: envelope.next_page_token.filter(|t| !t.is_empty()),
        })
    }

    async fn place_details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let context = format!("details(place_id={place_id})");
        let url = self.build_url(
            DETAILS_ENDPOINT,
            &[("place_id", place_id), ("fields", DETAILS_FIELDS)],
        )?;
        let body = self.request_json(url, &context).await?;
        Self::check_status(&body, &context)?;

        let envelope: DetailsResponse = Self::decode(body, &context)?;
        Ok(envelope.result.unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn test_client(base_url: &str) -> GooglePlacesClient {
        GooglePlacesClient::with_base_url("test-key", 30, "placescout-test/0.1", base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_appends_endpoint_below_base_path() {
        let client = test_client("https://maps.googleapis.com/maps/api");
        let url = client
            .build_url(DETAILS_ENDPOINT, &[("place_id", "abc")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/place/details/json?key=test-key&place_id=abc"
        );
    }

    #[test]
    fn build_url_strips_extra_trailing_slashes() {
        let client = test_client("https://maps.googleapis.com/maps/api//");
        let url = client.build_url(GEOCODE_ENDPOINT, &[]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://maps.googleapis.com/maps/api/geocode/json?key=test-key"
        );
    }

    #[test]
    fn build_url_encodes_special_characters() {
        let client = test_client("https://maps.googleapis.com/maps/api/");
        let url = client
            .build_url(GEOCODE_ENDPOINT, &[("address", "Denver, CO & more")])
            .unwrap();
        assert!(
            url.as_str().contains("Denver%2C+CO+%26+more"),
            "address should be percent-encoded: {url}"
        );
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let result = GooglePlacesClient::with_base_url("k", 5, "ua", "not a url");
        assert!(matches!(result, Err(PlacesError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn debug_redacts_key() {
        let client = test_client("https://maps.googleapis.com/maps/api/");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("test-key"), "key leaked: {rendered}");
    }

    #[test]
    fn check_status_accepts_ok_and_zero_results() {
        assert!(GooglePlacesClient::check_status(&json!({"status": "OK"}), "t").is_ok());
        assert!(GooglePlacesClient::check_status(&json!({"status": "ZERO_RESULTS"}), "t").is_ok());
    }

    #[test]
    fn check_status_maps_request_denied_to_invalid_credential() {
        let body = json!({"status": "REQUEST_DENIED", "error_message": "The provided API key is invalid."});
        let err = GooglePlacesClient::check_status(&body, "t").unwrap_err();
        assert!(
            matches!(err, PlacesError::InvalidCredential(ref m) if m.contains("invalid")),
            "unexpected error: {err:?}"
        );
        assert!(err.is_fatal());
    }

    #[test]
    fn check_status_maps_other_statuses_to_api_error() {
        let body = json!({"status": "OVER_QUERY_LIMIT"});
        let err = GooglePlacesClient::check_status(&body, "textsearch(query=cafe)").unwrap_err();
        assert!(
            matches!(err, PlacesError::Api { ref status, ref context, .. }
                if status == "OVER_QUERY_LIMIT" && context == "textsearch(query=cafe)"),
            "unexpected error: {err:?}"
        );
        assert!(!err.is_fatal());
    }

    #[test]
    fn check_status_missing_status_is_api_error() {
        let err = GooglePlacesClient::check_status(&json!({}), "t").unwrap_err();
        assert!(matches!(err, PlacesError::Api { ref status, .. } if status == "UNKNOWN_ERROR"));
    }
}
