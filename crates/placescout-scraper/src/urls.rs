//! Website URL normalization and same-site checks.

use reqwest::Url;

use crate::error::FetchError;

/// Parses a business website as listed upstream into an absolute root URL.
///
/// Listings often omit the scheme (`cornercafe.com`); `https://` is assumed.
/// Query and fragment are dropped. The path is kept so that a site hosted
/// under a sub-path still scans that page first.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] for blank input, a non-HTTP scheme, or
/// a URL without a host.
pub fn normalize_website(raw: &str) -> Result<Url, FetchError> {
    let trimmed = raw.trim();
    let invalid = |reason: &str| FetchError::InvalidUrl {
        url: raw.to_string(),
        reason: reason.to_string(),
    };

    if trimmed.is_empty() {
        return Err(invalid("empty website"));
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    };

    let mut url = Url::parse(&with_scheme).map_err(|e| invalid(&e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid("only http and https websites are scanned"));
    }
    if url.host_str().is_none_or(str::is_empty) {
        return Err(invalid("missing host"));
    }

    url.set_fragment(None);
    url.set_query(None);
    Ok(url)
}

/// Lowercased host with a leading `www.` removed.
///
/// Given `"https://WWW.CornerCafe.com/menu"`, returns `"cornercafe.com"`.
#[must_use]
pub fn site_domain(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host).to_string();
    (!host.is_empty()).then_some(host)
}

/// Whether `candidate` is served from the same site as `root`, ignoring
/// `www.` and scheme.
#[must_use]
pub fn same_site(root: &Url, candidate: &Url) -> bool {
    matches!(candidate.scheme(), "http" | "https") && site_domain(root) == site_domain(candidate)
}

/// Resolves `raw` against `base` and strips the fragment.
pub(crate) fn resolve(raw: &str, base: &Url) -> Option<Url> {
    let mut joined = base.join(raw.trim()).ok()?;
    joined.set_fragment(None);
    Some(joined)
}

/// Key used to avoid fetching the same page twice: scheme-insensitive,
/// no query, no trailing slash.
pub(crate) fn visit_key(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    format!("{host}{}", url.path().trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_adds_https_scheme() {
        let url = normalize_website("cornercafe.com").unwrap();
        assert_eq!(url.as_str(), "https://cornercafe.com/");
    }

    #[test]
    fn normalize_keeps_http_and_drops_query() {
        let url = normalize_website(" http://example.com/?utm_source=maps#top ").unwrap();
        assert_eq!(url.as_str(), "http://example.com/");
    }

    #[test]
    fn normalize_rejects_blank_and_foreign_schemes() {
        assert!(normalize_website("   ").is_err());
        assert!(normalize_website("ftp://files.example.com").is_err());
    }

    #[test]
    fn site_domain_strips_www_and_lowercases() {
        let url = Url::parse("https://WWW.CornerCafe.com/menu").unwrap();
        assert_eq!(site_domain(&url).as_deref(), Some("cornercafe.com"));
    }

    #[test]
    fn same_site_ignores_www_and_scheme() {
        let root = Url::parse("https://www.cornercafe.com/").unwrap();
        assert!(same_site(&root, &Url::parse("http://cornercafe.com/contact").unwrap()));
        assert!(!same_site(&root, &Url::parse("https://facebook.com/cornercafe").unwrap()));
        assert!(!same_site(&root, &Url::parse("mailto:hi@cornercafe.com").unwrap()));
    }

    #[test]
    fn resolve_joins_relative_paths() {
        let base = Url::parse("https://cornercafe.com/menu/").unwrap();
        assert_eq!(
            resolve("../contact#form", &base).unwrap().as_str(),
            "https://cornercafe.com/contact"
        );
        assert_eq!(
            resolve("/about-us", &base).unwrap().as_str(),
            "https://cornercafe.com/about-us"
        );
    }

    #[test]
    fn visit_key_ignores_trailing_slash_and_www() {
        let a = Url::parse("https://www.cornercafe.com/contact/").unwrap();
        let b = Url::parse("http://cornercafe.com/contact").unwrap();
        assert_eq!(visit_key(&a), visit_key(&b));
    }
}
