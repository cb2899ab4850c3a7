//! Per-website email discovery: root page, then well-known contact paths,
//! then contact-looking links found on the root page.

use std::collections::{HashSet, VecDeque};

use placescout_core::{AppConfig, EmailSource, PageKind};
use reqwest::Url;

use crate::fetch::PageFetcher;
use crate::robots::RobotsRules;
use crate::scan::{choose_best, discover_contact_links, scan_page};
use crate::urls::{normalize_website, site_domain, visit_key};

/// Paths tried after the root page, in order.
pub const CONTACT_PATHS: [&str; 6] = [
    "/contact",
    "/contact-us",
    "/contactus",
    "/about",
    "/about-us",
    "/team",
];

/// Contact-looking links taken from the root page.
const DISCOVERED_LINK_LIMIT: usize = 10;

/// Root, every contact path, and three discovered links.
pub const DEFAULT_MAX_PAGES_PER_SITE: usize = 1 + CONTACT_PATHS.len() + 3;

const DEFAULT_USER_AGENT: &str = "placescout/0.1 (contact-discovery)";

#[derive(Debug, Clone)]
pub struct ExtractorOptions {
    /// Pages requested per website, root included. robots.txt is not
    /// counted.
    pub max_pages_per_site: usize,
    /// Candidates kept on the result for logging.
    pub max_emails: usize,
    /// Agent matched against robots.txt groups.
    pub user_agent: String,
}

impl Default for ExtractorOptions {
    fn default() -> Self {
        Self {
            max_pages_per_site: DEFAULT_MAX_PAGES_PER_SITE,
            max_emails: 5,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ExtractorOptions {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_pages_per_site: config.max_pages_per_site,
            max_emails: config.max_emails_per_website,
            user_agent: config.user_agent.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExtractionStatus {
    Found,
    NotFound,
    /// Every page requested failed, or the website could not be parsed.
    FetchFailed,
}

impl std::fmt::Display for ExtractionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionStatus::Found => write!(f, "found"),
            ExtractionStatus::NotFound => write!(f, "not found"),
            ExtractionStatus::FetchFailed => write!(f, "fetch failed"),
        }
    }
}

/// Outcome of scanning one website.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub website: String,
    pub email: Option<String>,
    /// Plausible addresses on the page that produced `email`, document
    /// order, at most `max_emails`.
    pub candidates: Vec<String>,
    pub source: Option<EmailSource>,
    pub page_url: Option<String>,
    pub status: ExtractionStatus,
    /// Pages requested, successful or not.
    pub pages_fetched: usize,
    pub last_error: Option<String>,
}

impl ExtractionResult {
    fn empty(website: &str) -> Self {
        Self {
            website: website.to_string(),
            email: None,
            candidates: Vec::new(),
            source: None,
            page_url: None,
            status: ExtractionStatus::NotFound,
            pages_fetched: 0,
            last_error: None,
        }
    }
}

/// Finds a contact email on a business website.
#[derive(Debug, Clone)]
pub struct EmailExtractor<F> {
    fetcher: F,
    options: ExtractorOptions,
}

impl<F: PageFetcher> EmailExtractor<F> {
    #[must_use]
    pub fn new(fetcher: F, options: ExtractorOptions) -> Self {
        Self { fetcher, options }
    }

    #[must_use]
    pub fn options(&self) -> &ExtractorOptions {
        &self.options
    }

    /// Scans `website` until a page yields a plausible address or the page
    /// budget is spent. Never fails; problems are reported through
    /// [`ExtractionResult::status`] and `last_error`.
    pub async fn extract(&self, website: &str) -> ExtractionResult {
        let mut result = ExtractionResult::empty(website);

        let root = match normalize_website(website) {
            Ok(url) => url,
            Err(e) => {
                tracing::debug!(website, error = %e, "skipping unusable website");
                result.status = ExtractionStatus::FetchFailed;
                result.last_error = Some(e.to_string());
                return result;
            }
        };
        let site = site_domain(&root);
        let robots = self.load_robots(&root).await;

        let mut queue: VecDeque<(Url, PageKind)> = VecDeque::new();
        queue.push_back((root.clone(), PageKind::Homepage));
        for path in CONTACT_PATHS {
            if let Ok(url) = root.join(path) {
                queue.push_back((url, PageKind::ContactPath));
            }
        }

        let mut visited: HashSet<String> = HashSet::new();
        let mut succeeded = 0usize;

        while let Some((url, kind)) = queue.pop_front() {
            if result.pages_fetched >= self.options.max_pages_per_site {
                tracing::debug!(website, budget = self.options.max_pages_per_site, "page budget spent");
                break;
            }
            if !visited.insert(visit_key(&url)) {
                continue;
            }
            if !robots.is_allowed(&self.options.user_agent, url.path()) {
                tracing::debug!(url = %url, "disallowed by robots.txt");
                continue;
            }

            result.pages_fetched += 1;
            let html = match self.fetcher.fetch(&url).await {
                Ok(html) => html,
                Err(e) => {
                    tracing::debug!(url = %url, error = %e, "page fetch failed");
                    let unreachable = e.is_unreachable();
                    result.last_error = Some(e.to_string());
                    if kind == PageKind::Homepage && unreachable {
                        break;
                    }
                    continue;
                }
            };
            succeeded += 1;

            let candidates = scan_page(&html, site.as_deref());
            if let Some(best) = choose_best(&candidates, site.as_deref()) {
                tracing::debug!(
                    website,
                    url = %url,
                    email = %best.email,
                    origin = %best.origin,
                    "email found"
                );
                result.email = Some(best.email.clone());
                result.source = Some(EmailSource {
                    origin: best.origin,
                    page: kind,
                });
                result.page_url = Some(url.to_string());
                result.candidates = candidates
                    .iter()
                    .take(self.options.max_emails)
                    .map(|c| c.email.clone())
                    .collect();
                result.status = ExtractionStatus::Found;
                return result;
            }

            if kind == PageKind::Homepage {
                for link in discover_contact_links(&html, &url, &root, DISCOVERED_LINK_LIMIT) {
                    queue.push_back((link, PageKind::DiscoveredLink));
                }
            }
        }

        result.status = if result.pages_fetched > 0 && succeeded == 0 {
            ExtractionStatus::FetchFailed
        } else {
            ExtractionStatus::NotFound
        };
        result
    }

    async fn load_robots(&self, root: &Url) -> RobotsRules {
        let Ok(robots_url) = root.join("/robots.txt") else {
            return RobotsRules::allow_all();
        };
        match self.fetcher.fetch(&robots_url).await {
            Ok(body) => RobotsRules::parse(&body),
            Err(e) => {
                tracing::trace!(url = %robots_url, error = %e, "no usable robots.txt");
                RobotsRules::allow_all()
            }
        }
    }
}
