use thiserror::Error;

/// Errors returned by the places API client.
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The API answered `REQUEST_DENIED`; every further call would too.
    #[error("places API rejected the credential: {0}")]
    InvalidCredential(String),

    /// Geocoding produced no coordinate for the requested location.
    #[error("location could not be resolved: {0}")]
    LocationUnresolvable(String),

    /// Any other non-OK status in the response envelope.
    #[error("places API returned {status} for {context}: {message}")]
    Api {
        status: String,
        message: String,
        context: String,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

impl PlacesError {
    /// Errors that make every later request pointless, so the whole search
    /// stops instead of recording a per-item failure.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            PlacesError::InvalidCredential(_) | PlacesError::LocationUnresolvable(_)
        )
    }
}
