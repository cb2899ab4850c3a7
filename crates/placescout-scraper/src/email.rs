//! Email address grammar, cleanup and plausibility rules.

use std::sync::LazyLock;

use regex::Regex;

/// `local@domain.tld` anywhere in a document.
pub(crate) static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}\b").expect("valid email regex")
});

static EMAIL_EXACT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").expect("valid exact email regex")
});

/// Domains used in templates and documentation. Rejected unless the site
/// being scanned actually lives on one of them.
const PLACEHOLDER_DOMAINS: [&str; 10] = [
    "example.com",
    "example.org",
    "domain.com",
    "email.com",
    "yourdomain.com",
    "yoursite.com",
    "yourcompany.com",
    "company.com",
    "test.com",
    "localhost",
];

/// Tracking, hosting and markup vendors whose addresses leak into page
/// source without being a business contact.
const INFRASTRUCTURE_DOMAINS: [&str; 15] = [
    "sentry.io",
    "wixpress.com",
    "cloudflare.com",
    "googleapis.com",
    "schema.org",
    "w3.org",
    "wordpress.com",
    "mailchimp.com",
    "constantcontact.com",
    "hubspot.com",
    "weebly.com",
    "squarespace.com",
    "godaddy.com",
    "anonymised.email",
    "domaindiscreet.com",
];

/// Bounce and server-administration mailboxes.
const ROLE_MAILBOXES: [&str; 13] = [
    "noreply",
    "no-reply",
    "donotreply",
    "do-not-reply",
    "mailer-daemon",
    "postmaster",
    "hostmaster",
    "webmaster",
    "abuse",
    "admin",
    "administrator",
    "root",
    "noc",
];

/// "TLDs" that are really file extensions (`logo@2x.png`).
const ASSET_EXTENSIONS: [&str; 16] = [
    "png", "jpg", "jpeg", "gif", "svg", "webp", "bmp", "ico", "tif", "tiff", "css", "js", "pdf",
    "mp4", "woff", "woff2",
];

/// Mailbox names that mark where a real address starts when markup glued
/// junk in front of it (`955-1033info@cafe.com`).
const COMMON_MAILBOXES: [&str; 20] = [
    "info@",
    "contact@",
    "hello@",
    "hi@",
    "mail@",
    "email@",
    "enquiries@",
    "inquiries@",
    "sales@",
    "support@",
    "service@",
    "office@",
    "team@",
    "booking@",
    "bookings@",
    "reservations@",
    "events@",
    "orders@",
    "press@",
    "catering@",
];

/// Whether `s` is a single address with a local part, an `@`, and a dotted
/// domain ending in an alphabetic top-level segment.
#[must_use]
pub fn looks_like_email(s: &str) -> bool {
    if !EMAIL_EXACT_RE.is_match(s) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.starts_with('.')
        && !local.ends_with('.')
        && !domain.starts_with(['.', '-'])
        && !domain.ends_with(['.', '-'])
        && !s.contains("..")
}

/// Lowercases, trims surrounding punctuation, drops a `mailto:` prefix, and
/// cuts digit/punctuation junk glued before a common mailbox name.
#[must_use]
pub fn clean_candidate(raw: &str) -> String {
    let mut email = raw
        .trim()
        .trim_start_matches("mailto:")
        .trim_start_matches("MAILTO:")
        .trim_matches(|c: char| !c.is_ascii_alphanumeric())
        .to_lowercase();

    for mailbox in COMMON_MAILBOXES {
        if let Some(pos) = email.find(mailbox) {
            let junk = &email[..pos];
            if pos > 0 && !junk.chars().any(|c| c.is_ascii_alphabetic()) {
                email = email[pos..].to_string();
            }
            break;
        }
    }

    email
}

/// Domain part of an address, lowercased.
#[must_use]
pub fn email_domain(email: &str) -> Option<String> {
    email
        .rsplit_once('@')
        .map(|(_, d)| d.to_ascii_lowercase())
        .filter(|d| !d.is_empty())
}

/// Whether an email domain belongs to the site: equal after dropping
/// `www.`, or one is a subdomain of the other.
#[must_use]
pub fn domain_matches(email_domain: &str, site_domain: &str) -> bool {
    let e = email_domain.strip_prefix("www.").unwrap_or(email_domain);
    let s = site_domain.strip_prefix("www.").unwrap_or(site_domain);
    e == s || e.ends_with(&format!(".{s}")) || s.ends_with(&format!(".{e}"))
}

fn on_domain(domain: &str, listed: &str) -> bool {
    domain == listed || domain.ends_with(&format!(".{listed}"))
}

/// Full plausibility check for a cleaned candidate found on the site with
/// domain `site_domain`.
#[must_use]
pub fn is_plausible_contact(email: &str, site_domain: Option<&str>) -> bool {
    if email.len() > 254 || !looks_like_email(email) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.len() > 64 {
        return false;
    }

    let tld = domain.rsplit('.').next().unwrap_or_default();
    if ASSET_EXTENSIONS.contains(&tld) {
        return false;
    }

    // Error-tracker DSNs use 32-char hex keys as the local part.
    if local.len() >= 16 && local.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }

    if ROLE_MAILBOXES.contains(&local) {
        return false;
    }

    if INFRASTRUCTURE_DOMAINS.iter().any(|d| on_domain(domain, d)) {
        return false;
    }

    let own_domain = site_domain.is_some_and(|s| domain_matches(domain, s));
    if !own_domain && PLACEHOLDER_DOMAINS.iter().any(|d| on_domain(domain, d)) {
        return false;
    }

    true
}
