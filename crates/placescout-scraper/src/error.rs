use thiserror::Error;

/// Errors from fetching a single page of a business website.
///
/// These never escape [`crate::EmailExtractor::extract`]; they are folded
/// into the extraction status and logged.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, TLS, timeout or redirect failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Empty body, oversized body, or a bot-challenge interstitial.
    #[error("unusable response from {url}: {reason}")]
    Unusable { url: String, reason: String },
}

impl FetchError {
    /// Whether the host itself could not be reached, so other paths on the
    /// same site are not worth trying.
    #[must_use]
    pub fn is_unreachable(&self) -> bool {
        match self {
            FetchError::Http(e) => e.is_connect() || e.is_timeout(),
            _ => false,
        }
    }
}
