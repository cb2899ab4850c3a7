//! Page fetching for email extraction.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::FetchError;

/// Bodies larger than this are skipped rather than scanned.
const MAX_BODY_BYTES: usize = 5 * 1024 * 1024;
const MAX_REDIRECTS: usize = 5;

/// Fetches the text of one URL. [`HttpFetcher`] is the real implementation;
/// tests substitute in-memory sites.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// # Errors
    ///
    /// Returns [`FetchError`] on transport failure, a non-2xx status, or an
    /// unusable body.
    async fn fetch(&self, url: &Url) -> Result<String, FetchError>;
}

/// Plain GET fetcher with a bounded per-request timeout. No cookies, no
/// JavaScript, no form submission.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// # Errors
    ///
    /// Returns [`FetchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.clamp(1, 10)))
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml,text/plain;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        if response
            .content_length()
            .is_some_and(|len| len > MAX_BODY_BYTES as u64)
        {
            return Err(FetchError::Unusable {
                url: url.to_string(),
                reason: "body too large".to_string(),
            });
        }

        let body = response.text().await?;
        check_usable(&body, url)?;
        Ok(body)
    }
}

fn check_usable(body: &str, url: &Url) -> Result<(), FetchError> {
    let reason = if body.trim().is_empty() {
        "empty body"
    } else if body.len() > MAX_BODY_BYTES {
        "body too large"
    } else if looks_like_bot_challenge(body) {
        "bot challenge page"
    } else {
        return Ok(());
    };
    Err(FetchError::Unusable {
        url: url.to_string(),
        reason: reason.to_string(),
    })
}

fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("<title>just a moment...</title>");
    let has_cf_chl = lowered.contains("cf-chl-");

    has_cloudflare_banner || has_challenge_platform || has_just_a_moment || has_cf_chl
}
