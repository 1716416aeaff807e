use url::Url;

/// Extracts the domain from a URL
///
/// Returns the lowercase host portion of the URL, or `None` when the URL has
/// no host. The port is not part of the domain.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use catalog_crawler::url::extract_domain;
///
/// let url = Url::parse("https://EXAMPLE.COM/path").unwrap();
/// assert_eq!(extract_domain(&url), Some("example.com".to_string()));
/// ```
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
