//! URL helpers for brand and page addressing
//!
//! This module derives brand identifiers from their URLs, builds paginated
//! listing URLs, and resolves relative hrefs against the site base.

use url::Url;

/// Derives a brand's short name from its canonical URL
///
/// The short name is the last non-empty path segment and is used as the
/// dataset file key. Trailing slashes are ignored.
///
/// # Examples
///
/// ```
/// use fleetscrape::urls::brand_short_name;
///
/// let url = url::Url::parse("https://example.com/trucks/renault/").unwrap();
/// assert_eq!(brand_short_name(&url), "renault");
/// ```
pub fn brand_short_name(url: &Url) -> String {
    url.path_segments()
        .and_then(|segments| segments.rev().find(|segment| !segment.is_empty()))
        .unwrap_or_else(|| url.host_str().unwrap_or("unknown"))
        .to_string()
}

/// Builds the URL for one page of a brand's listing
///
/// Appends a `page=N` query pair to the brand URL.
pub fn page_url(brand_url: &Url, page_number: u32) -> Url {
    let mut url = brand_url.clone();
    url.query_pairs_mut()
        .append_pair("page", &page_number.to_string());
    url
}

/// Resolves an href to an absolute http(s) URL against a base
///
/// Returns None for empty hrefs, non-http(s) schemes, and unresolvable
/// values.
pub fn absolutize(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('#') {
        return None;
    }

    match base.join(href) {
        Ok(absolute) if absolute.scheme() == "http" || absolute.scheme() == "https" => {
            Some(absolute)
        }
        _ => None,
    }
}
