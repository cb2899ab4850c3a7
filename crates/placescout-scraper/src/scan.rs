//! Email discovery within one HTML page, plus contact-link discovery.

use std::collections::HashSet;
use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use placescout_core::EmailOrigin;
use regex::Regex;
use reqwest::Url;
use serde_json::Value;

use crate::email::{clean_candidate, domain_matches, email_domain, is_plausible_contact, EMAIL_RE};
use crate::urls::{resolve, same_site};

static ENCODED_AT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)&#0*64;|&#x0*40;|&commat;|\\x40|\\u0040|%40").expect("valid encoded-at regex")
});

static MAILTO_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)mailto:([^"'?\s<>]+)"#).expect("valid mailto regex")
});

static JSON_LD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<script[^>]*type\s*=\s*["']application/ld\+json["'][^>]*>(.*?)</script>"#)
        .expect("valid json-ld script regex")
});

static NON_VISIBLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(script|style|noscript)[^>]*>.*?</(script|style|noscript)>")
        .expect("valid non-visible block regex")
});

static TAGS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<[^>]+>").expect("valid tags regex"));

static OBFUSCATED_AT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[\[\(\{]\s*at\s*[\]\)\}]\s*").expect("valid obfuscated-at regex")
});

static OBFUSCATED_DOT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*[\[\(\{]\s*dot\s*[\]\)\}]\s*").expect("valid obfuscated-dot regex")
});

static ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a>"#)
        .expect("valid anchor regex")
});

/// Words in a link's href or text that suggest it leads to contact details.
const CONTACT_LINK_KEYWORDS: [&str; 14] = [
    "contact", "about", "team", "staff", "support", "help", "reach", "connect", "company", "info",
    "location", "impressum", "kontakt", "get-in-touch",
];

/// One plausible address found on a page, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub email: String,
    pub origin: EmailOrigin,
}

/// Finds every plausible address on a page.
///
/// Common `@` encodings are decoded first. The raw markup is then scanned
/// in document order; each address is tagged `Mailto` or `JsonLd` when it
/// also appears as a mail-link target or a structured-data `email` value.
/// Only when that finds nothing is the visible text searched for
/// `name [at] domain [dot] com` forms.
#[must_use]
pub fn scan_page(html: &str, site_domain: Option<&str>) -> Vec<Candidate> {
    let decoded = ENCODED_AT_RE.replace_all(html, "@");

    let mailto = mailto_targets(&decoded);
    let json_ld = json_ld_emails(&decoded);

    let mut seen: HashSet<String> = HashSet::new();
    let mut out: Vec<Candidate> = Vec::new();
    let mut push = |email: String, origin: EmailOrigin, out: &mut Vec<Candidate>| {
        if is_plausible_contact(&email, site_domain) && seen.insert(email.clone()) {
            out.push(Candidate { email, origin });
        }
    };

    for m in EMAIL_RE.find_iter(&decoded) {
        let email = clean_candidate(m.as_str());
        let origin = if mailto.contains(&email) {
            EmailOrigin::Mailto
        } else if json_ld.contains(&email) {
            EmailOrigin::JsonLd
        } else {
            EmailOrigin::Page
        };
        push(email, origin, &mut out);
    }

    // Targets the document-order scan could not see, e.g. with odd
    // characters around them. Both lists are already in document order.
    for email in mailto {
        push(email, EmailOrigin::Mailto, &mut out);
    }
    for email in json_ld {
        push(email, EmailOrigin::JsonLd, &mut out);
    }

    if out.is_empty() {
        let text = visible_text(&decoded);
        let with_at = OBFUSCATED_AT_RE.replace_all(&text, "@");
        let deobfuscated = OBFUSCATED_DOT_RE.replace_all(&with_at, ".");
        for m in EMAIL_RE.find_iter(&deobfuscated) {
            push(clean_candidate(m.as_str()), EmailOrigin::Obfuscated, &mut out);
        }
    }

    out
}

/// Picks the address to report: the first whose domain belongs to the
/// site, otherwise the first in document order.
#[must_use]
pub fn choose_best<'a>(candidates: &'a [Candidate], site_domain: Option<&str>) -> Option<&'a Candidate> {
    site_domain
        .and_then(|site| {
            candidates.iter().find(|c| {
                email_domain(&c.email).is_some_and(|d| domain_matches(&d, site))
            })
        })
        .or_else(|| candidates.first())
}

/// Same-site links whose href or anchor text looks like a contact page, in
/// document order without duplicates, at most `limit`.
#[must_use]
pub fn discover_contact_links(html: &str, page: &Url, root: &Url, limit: usize) -> Vec<Url> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut links = Vec::new();

    for cap in ANCHOR_RE.captures_iter(html) {
        if links.len() >= limit {
            break;
        }
        let href = cap.get(1).map_or("", |m| m.as_str()).trim();
        if href.is_empty()
            || href.starts_with('#')
            || href.starts_with("mailto:")
            || href.starts_with("tel:")
            || href.starts_with("javascript:")
        {
            continue;
        }

        let text = clean_text(cap.get(2).map_or("", |m| m.as_str())).to_lowercase();
        let href_lower = href.to_lowercase();
        if !CONTACT_LINK_KEYWORDS
            .iter()
            .any(|k| href_lower.contains(k) || text.contains(k))
        {
            continue;
        }

        let Some(url) = resolve(href, page) else {
            continue;
        };
        if same_site(root, &url) && seen.insert(url.to_string()) {
            links.push(url);
        }
    }

    links
}

fn mailto_targets(html: &str) -> Vec<String> {
    let mut out = Vec::new();
    for m in MAILTO_RE.captures_iter(html).filter_map(|cap| cap.get(1)) {
        push_unique(
            &mut out,
            clean_candidate(&percent_decode_str(m.as_str()).decode_utf8_lossy()),
        );
    }
    out
}

fn json_ld_emails(html: &str) -> Vec<String> {
    let mut out = Vec::new();
    for cap in JSON_LD_RE.captures_iter(html) {
        let raw = cap.get(1).map_or("", |m| m.as_str()).trim();
        if raw.is_empty() {
            continue;
        }
        let Ok(value) = serde_json::from_str::<Value>(raw) else {
            continue;
        };
        collect_json_ld_emails(&value, &mut out);
    }
    out
}

/// Walks objects and arrays collecting every string under an `email` key,
/// which covers `contactPoint`, `author` and `@graph` nesting.
fn collect_json_ld_emails(value: &Value, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                if key.eq_ignore_ascii_case("email") {
                    if let Some(s) = child.as_str() {
                        push_unique(out, clean_candidate(s));
                        continue;
                    }
                }
                collect_json_ld_emails(child, out);
            }
        }
        Value::Array(items) => {
            for item in items {
                collect_json_ld_emails(item, out);
            }
        }
        _ => {}
    }
}

fn push_unique(out: &mut Vec<String>, email: String) {
    if !out.contains(&email) {
        out.push(email);
    }
}

fn visible_text(html: &str) -> String {
    let without_blocks = NON_VISIBLE_RE.replace_all(html, " ");
    clean_text(&without_blocks)
}

pub(crate) fn clean_text(input: &str) -> String {
    let no_tags = TAGS_RE.replace_all(input, " ");
    no_tags
        .replace("&nbsp;", " ")
        .replace("&amp;", "&")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
