//! Markup scanning for page-loader
//!
//! Walks the parsed document and collects every reference to a
//! same-origin resource from the recognized element/attribute pairs.

use log::debug;
use scraper::{Html, Selector};
use url::Url;

/// One discovered reference to a same-origin resource.
///
/// `raw` is the attribute value exactly as written in the markup, which
/// is what the pipeline replaces during the rewrite step.
#[derive(Debug, Clone, PartialEq)]
pub struct Reference {
    /// Attribute value as it appears in the document
    pub raw: String,
    /// Resolved absolute URL, fragment stripped
    pub url: Url,
}

/// Extracts same-origin resource references in document order.
///
/// Recognized pairs are `img[src]`, `link[href]` and `script[src]`.
/// Cross-origin references, unsupported schemes and values that fail to
/// resolve are skipped and left untouched in the markup. html5ever's
/// error recovery inside `scraper` means malformed markup degrades
/// gracefully instead of failing the scan.
pub fn scan(html: &str, page_url: &Url) -> Vec<Reference> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("img[src], link[href], script[src]").expect("Failed to parse selector");

    let mut references = Vec::new();

    for element in document.select(&selector) {
        let attribute = match element.value().name() {
            "link" => "href",
            _ => "src",
        };

        let raw = match element.value().attr(attribute) {
            Some(value) if !value.is_empty() => value,
            _ => continue,
        };

        let mut resolved = match page_url.join(raw) {
            Ok(resolved) => resolved,
            Err(err) => {
                debug!("skipping unresolvable reference '{}': {}", raw, err);
                continue;
            }
        };
        resolved.set_fragment(None);

        if !is_same_origin(&resolved, page_url) {
            debug!("skipping cross-origin reference '{}'", raw);
            continue;
        }

        references.push(Reference {
            raw: raw.to_string(),
            url: resolved,
        });
    }

    references
}

/// Same-origin means sharing scheme and host with the page URL.
fn is_same_origin(candidate: &Url, page_url: &Url) -> bool {
    candidate.scheme() == page_url.scheme() && candidate.host_str() == page_url.host_str()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page_url() -> Url {
        Url::parse("http://localhost/blog/about").unwrap()
    }

    #[test]
    fn test_scan_collects_recognized_elements_in_document_order() {
        let html = r#"
            <html>
              <head>
                <link rel="stylesheet" href="/blog/about/assets/styles.css">
                <link rel="canonical" href="/blog/about">
              </head>
              <body>
                <img src="/photos/me.jpg" alt="me">
                <script src="/assets/scripts.js"></script>
              </body>
            </html>
        "#;

        let references = scan(html, &page_url());
        let raws: Vec<&str> = references.iter().map(|r| r.raw.as_str()).collect();
        assert_eq!(
            raws,
            vec![
                "/blog/about/assets/styles.css",
                "/blog/about",
                "/photos/me.jpg",
                "/assets/scripts.js",
            ]
        );
    }

    #[test]
    fn test_scan_resolves_relative_references_against_the_page() {
        let html = r#"<img src="assets/photo.jpg">"#;

        let references = scan(html, &page_url());
        assert_eq!(references.len(), 1);
        assert_eq!(
            references[0].url.as_str(),
            "http://localhost/blog/assets/photo.jpg"
        );
    }

    #[test]
    fn test_scan_skips_cross_origin_references() {
        let html = r#"
            <link rel="stylesheet" href="https://cdn.example.net/style.css">
            <script src="//other.example.com/app.js"></script>
            <img src="/photos/me.jpg">
        "#;

        let references = scan(html, &page_url());
        assert_eq!(references.len(), 1);
        assert_eq!(references[0].raw, "/photos/me.jpg");
    }

    #[test]
    fn test_scan_skips_unsupported_schemes() {
        let html = r#"
            <link href="mailto:someone@example.com">
            <img src="data:image/png;base64,iVBORw0KGgo=">
            <script src="javascript:void(0)"></script>
        "#;

        assert!(scan(html, &page_url()).is_empty());
    }

    #[test]
    fn test_scan_keeps_one_entry_per_occurrence() {
        let html = r#"
            <img src="/photos/me.jpg">
            <img src="/photos/me.jpg">
        "#;

        let references = scan(html, &page_url());
        assert_eq!(references.len(), 2);
        assert_eq!(references[0].url, references[1].url);
    }

    #[test]
    fn test_scan_strips_fragments_from_resolved_urls() {
        let html = r#"<script src="/assets/scripts.js#main"></script>"#;

        let references = scan(html, &page_url());
        assert_eq!(references[0].url.as_str(), "http://localhost/assets/scripts.js");
        assert_eq!(references[0].raw, "/assets/scripts.js#main");
    }

    #[test]
    fn test_scan_tolerates_malformed_markup() {
        let html = r#"<img src="/photos/me.jpg"<p><script src="/assets/scripts.js">"#;

        let references = scan(html, &page_url());
        assert!(
            references.iter().any(|r| r.raw == "/assets/scripts.js"),
            "expected the well-formed element to survive: {:?}",
            references
        );
    }

    #[test]
    fn test_scan_ignores_elements_without_the_attribute() {
        let html = r#"<script>console.log(1)</script><img alt="no source">"#;

        assert!(scan(html, &page_url()).is_empty());
    }
}
