use super::*;

fn emails(candidates: &[Candidate]) -> Vec<&str> {
    candidates.iter().map(|c| c.email.as_str()).collect()
}

#[test]
fn finds_plain_addresses_in_document_order() {
    let html = r#"<p>Catering: events@cornercafe.com</p><footer>info@cornercafe.com</footer>"#;
    let found = scan_page(html, Some("cornercafe.com"));
    assert_eq!(emails(&found), vec!["events@cornercafe.com", "info@cornercafe.com"]);
    assert!(found.iter().all(|c| c.origin == EmailOrigin::Page));
}

#[test]
fn tags_mailto_targets() {
    let html = r#"<a href="mailto:Hello@CornerCafe.com?subject=Hi">Email us</a>"#;
    let found = scan_page(html, Some("cornercafe.com"));
    assert_eq!(emails(&found), vec!["hello@cornercafe.com"]);
    assert_eq!(found[0].origin, EmailOrigin::Mailto);
}

#[test]
fn percent_encoded_mailto_is_decoded() {
    let html = r#"<a href="mailto:orders%40cornercafe.com">Order</a>"#;
    let found = scan_page(html, None);
    assert_eq!(emails(&found), vec!["orders@cornercafe.com"]);
    assert_eq!(found[0].origin, EmailOrigin::Mailto);
}

#[test]
fn leftover_mailto_targets_keep_document_order() {
    let html = r#"
        <a href="mailto:zoe%2Ekitchen@cornercafe.com">Kitchen</a>
        <a href="mailto:adam%2Efront@cornercafe.com">Front</a>
        <a href="mailto:mia%2Ebar@cornercafe.com">Bar</a>
        <a href="mailto:zoe%2Ekitchen@cornercafe.com">Kitchen again</a>"#;
    let found = scan_page(html, Some("cornercafe.com"));
    let mailto: Vec<&str> = found
        .iter()
        .filter(|c| c.origin == EmailOrigin::Mailto)
        .map(|c| c.email.as_str())
        .collect();
    assert_eq!(
        mailto,
        vec![
            "zoe.kitchen@cornercafe.com",
            "adam.front@cornercafe.com",
            "mia.bar@cornercafe.com",
        ]
    );
}

#[test]
fn tags_json_ld_email() {
    let html = r#"
        <script type="application/ld+json">
        {"@context": "https://schema.org", "@type": "CafeOrCoffeeShop",
         "contactPoint": {"@type": "ContactPoint", "email": "owner@cornercafe.com"}}
        </script>"#;
    let found = scan_page(html, Some("cornercafe.com"));
    assert_eq!(emails(&found), vec!["owner@cornercafe.com"]);
    assert_eq!(found[0].origin, EmailOrigin::JsonLd);
}

#[test]
fn decodes_html_entity_and_js_escaped_at_signs() {
    let html = r#"<span>hi&#64;cornercafe.com</span><script>var e = "jobs\x40cornercafe.com";</script>"#;
    let found = scan_page(html, None);
    assert_eq!(emails(&found), vec!["hi@cornercafe.com", "jobs@cornercafe.com"]);
}

#[test]
fn falls_back_to_obfuscated_text() {
    let html = "<p>Reach us: bookings [at] cornercafe [dot] com</p>";
    let found = scan_page(html, None);
    assert_eq!(emails(&found), vec!["bookings@cornercafe.com"]);
    assert_eq!(found[0].origin, EmailOrigin::Obfuscated);
}

#[test]
fn skips_false_positives() {
    let html = r#"<img src="/img/logo@2x.png"><p>you@example.com</p>
        <script src="https://605a7baede844d278b89dc95ae0a9123@sentry.io/1"></script>"#;
    assert!(scan_page(html, Some("cornercafe.com")).is_empty());
}

#[test]
fn duplicates_are_reported_once() {
    let html = r#"<a href="mailto:info@cornercafe.com">info@cornercafe.com</a> INFO@cornercafe.com"#;
    let found = scan_page(html, None);
    assert_eq!(emails(&found), vec!["info@cornercafe.com"]);
}

#[test]
fn choose_best_prefers_site_domain() {
    let candidates = vec![
        Candidate {
            email: "owner@gmail.com".to_string(),
            origin: EmailOrigin::Page,
        },
        Candidate {
            email: "info@cornercafe.com".to_string(),
            origin: EmailOrigin::Page,
        },
    ];
    let best = choose_best(&candidates, Some("cornercafe.com")).unwrap();
    assert_eq!(best.email, "info@cornercafe.com");
}

#[test]
fn choose_best_falls_back_to_first() {
    let candidates = vec![
        Candidate {
            email: "owner@gmail.com".to_string(),
            origin: EmailOrigin::Page,
        },
        Candidate {
            email: "cafe@yahoo.com".to_string(),
            origin: EmailOrigin::Page,
        },
    ];
    let best = choose_best(&candidates, Some("cornercafe.com")).unwrap();
    assert_eq!(best.email, "owner@gmail.com");
    assert!(choose_best(&[], Some("cornercafe.com")).is_none());
}

#[test]
fn discovers_same_site_contact_links() {
    let root = Url::parse("https://cornercafe.com/").unwrap();
    let html = r##"
        <nav>
          <a href="/menu">Menu</a>
          <a class="nav" href="/pages/reach-us">Find Us</a>
          <a href="/visit">Contact</a>
          <a href="https://facebook.com/cornercafe/about">Facebook</a>
          <a href="#contact">Jump</a>
          <a href="mailto:info@cornercafe.com">Email</a>
          <a href="https://www.cornercafe.com/about-us/">About</a>
          <a href="/visit">Contact again</a>
        </nav>"##;

    let links = discover_contact_links(html, &root, &root, 10);
    let as_str: Vec<&str> = links.iter().map(Url::as_str).collect();

    assert_eq!(
        as_str,
        vec![
            "https://cornercafe.com/pages/reach-us",
            "https://cornercafe.com/visit",
            "https://www.cornercafe.com/about-us/",
        ]
    );
}

#[test]
fn discovered_links_respect_limit() {
    let root = Url::parse("https://cornercafe.com/").unwrap();
    let html = r#"<a href="/contact">a</a><a href="/about">b</a><a href="/team">c</a>"#;
    assert_eq!(discover_contact_links(html, &root, &root, 2).len(), 2);
}

#[test]
fn clean_text_strips_tags_and_collapses_whitespace() {
    assert_eq!(clean_text("<p>Hello&nbsp;<b>there</b>\n  friend</p>"), "Hello there friend");
}
