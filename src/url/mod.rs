//! URL handling module for Catalog Crawler
//!
//! This module provides the URL collaborator used by the link extractor and the
//! crawl controller: absolute/relative detection, fragment stripping,
//! resolution against a base URL, and limiting-domain filtering.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::extract_domain;
pub use matcher::in_domain;
pub use normalize::{convert_if_relative_url, is_absolute_url, remove_fragment};

use url::Url;

/// Extensions a followable URL path may end with (empty means no extension)
const FOLLOWABLE_EXTENSIONS: &[&str] = &["", "html"];

/// Decides whether a URL may enter the frontier
///
/// A URL is followable when it:
/// 1. contains neither `mailto:` nor `@`
/// 2. parses as an absolute `http`/`https` URL with a host
/// 3. carries no fragment and no query string
/// 4. has a host inside `limiting_domain`
/// 5. has a path ending in no extension or `.html`
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::is_url_ok_to_follow;
///
/// let domain = "classes.cs.uchicago.edu";
/// assert!(is_url_ok_to_follow("http://www.classes.cs.uchicago.edu/a/index.html", domain));
/// assert!(!is_url_ok_to_follow("http://www.classes.cs.uchicago.edu/a/syllabus.pdf", domain));
/// assert!(!is_url_ok_to_follow("http://www.uchicago.edu/", domain));
/// ```
pub fn is_url_ok_to_follow(url: &str, limiting_domain: &str) -> bool {
    if url.contains("mailto:") || url.contains('@') {
        return false;
    }

    let parsed = match Url::parse(url) {
        Ok(u) => u,
        Err(_) => return false,
    };

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return false;
    }

    if parsed.fragment().is_some() || parsed.query().is_some() {
        return false;
    }

    let domain = match extract_domain(&parsed) {
        Some(d) if !d.is_empty() => d,
        _ => return false,
    };

    if !in_domain(&domain, limiting_domain) {
        return false;
    }

    FOLLOWABLE_EXTENSIONS.contains(&path_extension(parsed.path()))
}

/// Returns the extension of the last path segment, without the dot
fn path_extension(path: &str) -> &str {
    let file_name = path.rsplit('/').next().unwrap_or_default();
    match file_name.rfind('.') {
        // A leading dot names a hidden file, not an extension
        Some(0) | None => "",
        Some(idx) => &file_name[idx + 1..],
    }
}
