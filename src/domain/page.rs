//! HTML page inspection for the link graph

use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Resolve `href` against `base` and normalise it for the graph.
///
/// Drops the fragment and a trailing slash (except on the site root).
/// Returns `None` for links leaving `site`'s host and port.
pub fn normalize_link(href: &str, base: &Url, site: &Url) -> Option<Url> {
    let mut url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }
    if url.host_str() != site.host_str() || url.port_or_known_default() != site.port_or_known_default()
    {
        return None;
    }

    url.set_fragment(None);
    let path = url.path().to_string();
    if path.len() > 1 && path.ends_with('/') {
        url.set_path(path.trim_end_matches('/'));
    }
    Some(url)
}

/// `<title>` text with whitespace collapsed
pub fn extract_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    let selector = Selector::parse("title").ok()?;
    let raw: String = doc.select(&selector).next()?.text().collect();
    let title = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}

/// Same-site links of a page, normalised and de-duplicated in document order
pub fn extract_links(html: &str, page: &Url, site: &Url) -> Vec<Url> {
    let doc = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut links = Vec::new();
    for element in doc.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if let Some(link) = normalize_link(href.trim(), page, site) {
            if seen.insert(link.as_str().to_string()) {
                links.push(link);
            }
        }
    }
    links
}
