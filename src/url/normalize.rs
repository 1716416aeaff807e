use url::Url;

/// Returns true when the string is an absolute URL (it carries a scheme)
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::is_absolute_url;
///
/// assert!(is_absolute_url("http://example.com/page.html"));
/// assert!(!is_absolute_url("../page.html"));
/// ```
pub fn is_absolute_url(url: &str) -> bool {
    Url::parse(url).is_ok()
}

/// Removes the fragment (everything from the first `#`) from a URL string
pub fn remove_fragment(url: &str) -> String {
    match url.split_once('#') {
        Some((head, _)) => head.to_string(),
        None => url.to_string(),
    }
}

/// Resolves `href` against `base` unless it is already absolute
///
/// Relative references are resolved with [`Url::join`]; an empty reference
/// or one that cannot be resolved yields `None`.
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::convert_if_relative_url;
///
/// let resolved = convert_if_relative_url("http://example.com/a/b.html", "c.html");
/// assert_eq!(resolved.as_deref(), Some("http://example.com/a/c.html"));
/// ```
pub fn convert_if_relative_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }

    if is_absolute_url(href) {
        return Some(href.to_string());
    }

    let base = Url::parse(base).ok()?;
    base.join(href).ok().map(|u| u.to_string())
}
