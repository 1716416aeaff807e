//! HTML parser for extracting courses, links and metadata
//!
//! A page is parsed once; the course extractor and the link extractor both
//! run over the same document tree.

use crate::catalog::{CourseExtractor, CoursePage};
use crate::url::{convert_if_relative_url, is_absolute_url, is_url_ok_to_follow, remove_fragment};
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use std::collections::HashSet;

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref ANCHOR: Selector = Selector::parse("a[href]").expect("valid selector");
}

/// Extracted information from a catalog page
#[derive(Debug, Clone, Default)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Course text blobs found on the page
    pub courses: CoursePage,

    /// Followable links, absolute, deduplicated, in first-seen order
    pub links: Vec<String>,
}

/// Parses HTML content and runs both extractors on it
///
/// # Arguments
///
/// * `html` - The HTML content to parse
/// * `base_url` - The URL the page was served from, for resolving relative links
/// * `limiting_domain` - Links outside this domain are dropped
/// * `extractor` - Course extractor
///
/// # Example
///
/// ```
/// use catalog_crawler::catalog::CourseExtractor;
/// use catalog_crawler::crawler::parse_page;
///
/// let html = r#"<html><head><title>Catalog</title></head>
///     <body><a href="math.html">Math</a></body></html>"#;
/// let parsed = parse_page(html, "http://example.edu/index.html", "example.edu", &CourseExtractor::default());
/// assert_eq!(parsed.title.as_deref(), Some("Catalog"));
/// assert_eq!(parsed.links, vec!["http://example.edu/math.html".to_string()]);
/// ```
pub fn parse_page(
    html: &str,
    base_url: &str,
    limiting_domain: &str,
    extractor: &CourseExtractor,
) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        courses: extractor.extract(&document),
        links: extract_links(&document, base_url, limiting_domain),
    }
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    document
        .select(&TITLE)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Collects the followable outbound links of a page
///
/// Absolute hrefs are kept as written; relative hrefs lose their fragment and
/// are resolved against `base_url`. A link is kept once, at its first
/// occurrence, and only if it passes [`is_url_ok_to_follow`].
pub fn extract_links(document: &Html, base_url: &str, limiting_domain: &str) -> Vec<String> {
    let mut links = Vec::new();
    let mut seen = HashSet::new();

    for element in document.select(&ANCHOR) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();

        let candidate = if is_absolute_url(href) {
            Some(href.to_string())
        } else {
            convert_if_relative_url(base_url, &remove_fragment(href))
        };

        let Some(url) = candidate else {
            continue;
        };

        if seen.contains(&url) || !is_url_ok_to_follow(&url, limiting_domain) {
            continue;
        }

        seen.insert(url.clone());
        links.push(url);
    }

    links
}
