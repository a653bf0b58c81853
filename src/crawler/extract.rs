//! HTML extraction
//!
//! Four pure functions over raw page content:
//! - total page count of a brand's listing
//! - brand discovery links from the entry page
//! - listing entries from one result page
//! - price/mileage from one detail page
//!
//! All of them tolerate missing elements by returning defaults; none fails.

use crate::urls::absolutize;
use scraper::{Html, Selector};
use url::Url;

/// A listing entry as it appears on a result page, before detail enrichment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub title: String,
    pub categorie: String,
    pub link: Url,
}

/// Price and mileage scraped from a listing's detail page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDetail {
    pub price: String,
    pub mileage: String,
}

/// Extracts the total page count from a brand's first listing page
///
/// The pagination footer carries a "last page" element; when it is absent or
/// its text is not a number the listing has a single page.
pub fn extract_total_pages(html: &str) -> u32 {
    let document = Html::parse_document(html);
    let Ok(last_selector) = Selector::parse("li.last a") else {
        return 1;
    };

    document
        .select(&last_selector)
        .next()
        .and_then(|element| {
            element
                .text()
                .collect::<String>()
                .trim()
                .parse::<u32>()
                .ok()
        })
        .unwrap_or(1)
}

/// Extracts brand listing URLs from the entry page
///
/// Relative hrefs are resolved against `base`. The result is deduplicated by
/// URL; order is not significant.
pub fn extract_brand_urls(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let Ok(brand_selector) = Selector::parse(".vehicle-categories-filter a") else {
        return Vec::new();
    };

    let mut seen = std::collections::HashSet::new();
    let mut brands = Vec::new();

    for element in document.select(&brand_selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(url) = absolutize(href, base) else {
            continue;
        };
        if seen.insert(url.clone()) {
            brands.push(url);
        }
    }

    brands
}

/// Extracts listing entries from one result page
///
/// Entries without a title or without a resolvable link are dropped; they
/// are not listings. Category is optional and defaults to empty.
pub fn extract_listings(html: &str, base: &Url) -> Vec<ListingEntry> {
    let document = Html::parse_document(html);

    let (Ok(item_selector), Ok(title_selector), Ok(categorie_selector)) = (
        Selector::parse("#plp-results #wrap-plp-list a"),
        Selector::parse("h2"),
        Selector::parse(".text-subtle"),
    ) else {
        return Vec::new();
    };

    let mut entries = Vec::new();
    for item in document.select(&item_selector) {
        let Some(href) = item.value().attr("href") else {
            continue;
        };
        let Some(link) = absolutize(href, base) else {
            continue;
        };

        let title = item
            .select(&title_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();
        if title.is_empty() {
            continue;
        }

        let categorie = item
            .select(&categorie_selector)
            .next()
            .map(|e| e.text().collect::<String>().trim().to_string())
            .unwrap_or_default();

        entries.push(ListingEntry {
            title,
            categorie,
            link,
        });
    }

    entries
}

/// Extracts price and mileage from a listing's detail page
///
/// The mileage heading also carries a trailing variant suffix separated by a
/// dash; only the part before the first dash is the mileage.
pub fn extract_detail(html: &str) -> ListingDetail {
    let document = Html::parse_document(html);

    let price = Selector::parse("div.typography-heading-2")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let mileage = Selector::parse("h1.typography-heading-2 div.typography-heading-4")
        .ok()
        .and_then(|sel| document.select(&sel).next())
        .map(|e| {
            e.text()
                .collect::<String>()
                .split('-')
                .next()
                .unwrap_or("")
                .trim()
                .to_string()
        })
        .unwrap_or_default();

    ListingDetail { price, mileage }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://example.com/").unwrap()
    }

    #[test]
    fn test_total_pages_from_last_indicator() {
        let html = r#"<ul class="pagination"><li class="last"><a href="?page=12">12</a></li></ul>"#;
        assert_eq!(extract_total_pages(html), 12);
    }

    #[test]
    fn test_total_pages_defaults_to_one_without_indicator() {
        let html = r#"<html><body><div id="plp-results"></div></body></html>"#;
        assert_eq!(extract_total_pages(html), 1);
    }

    #[test]
    fn test_total_pages_defaults_on_non_numeric_text() {
        let html = r#"<li class="last"><a href="?page=9">last</a></li>"#;
        assert_eq!(extract_total_pages(html), 1);
    }

    #[test]
    fn test_brand_urls_resolved_and_deduplicated() {
        let html = r#"
            <div class="vehicle-categories-filter">
                <a href="/trucks/renault">Renault</a>
                <a href="https://example.com/trucks/volvo">Volvo</a>
                <a href="/trucks/renault">Renault again</a>
                <a>no href</a>
            </div>
        "#;
        let brands = extract_brand_urls(html, &base());
        assert_eq!(brands.len(), 2);
        assert!(brands
            .iter()
            .any(|u| u.as_str() == "https://example.com/trucks/renault"));
        assert!(brands
            .iter()
            .any(|u| u.as_str() == "https://example.com/trucks/volvo"));
    }

    #[test]
    fn test_listings_extracted_with_optional_category() {
        let html = r#"
            <div id="plp-results"><div id="wrap-plp-list">
                <a href="/ad/1"><h2>Truck One</h2><span class="text-subtle">Tractor</span></a>
                <a href="/ad/2"><h2>Truck Two</h2></a>
            </div></div>
        "#;
        let entries = extract_listings(html, &base());
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, "Truck One");
        assert_eq!(entries[0].categorie, "Tractor");
        assert_eq!(entries[0].link.as_str(), "https://example.com/ad/1");
        assert_eq!(entries[1].categorie, "");
    }

    #[test]
    fn test_listing_without_title_dropped() {
        let html = r#"
            <div id="plp-results"><div id="wrap-plp-list">
                <a href="/ad/1"><span class="text-subtle">No title</span></a>
                <a href="/ad/2"><h2>Kept</h2></a>
            </div></div>
        "#;
        let entries = extract_listings(html, &base());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Kept");
    }

    #[test]
    fn test_listing_without_link_dropped() {
        let html = r#"
            <div id="plp-results"><div id="wrap-plp-list">
                <a><h2>No link</h2></a>
            </div></div>
        "#;
        assert!(extract_listings(html, &base()).is_empty());
    }

    #[test]
    fn test_detail_price_and_mileage() {
        let html = r#"
            <h1 class="typography-heading-2">
                <div class="typography-heading-4">250 000 km - Euro 6</div>
            </h1>
            <div class="typography-heading-2">35 000 €</div>
        "#;
        let detail = extract_detail(html);
        assert_eq!(detail.price, "35 000 €");
        assert_eq!(detail.mileage, "250 000 km");
    }

    #[test]
    fn test_detail_missing_elements_default_to_empty() {
        let detail = extract_detail("<html><body><p>nothing here</p></body></html>");
        assert_eq!(detail, ListingDetail::default());
    }
}
