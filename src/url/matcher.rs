/// Checks whether a host belongs to the limiting domain
///
/// A host is in the domain when it equals the domain or is one of its
/// subdomains. Hostnames compare case-insensitively.
///
/// # Examples
///
/// ```
/// use catalog_crawler::url::in_domain;
///
/// assert!(in_domain("classes.cs.uchicago.edu", "classes.cs.uchicago.edu"));
/// assert!(in_domain("www.classes.cs.uchicago.edu", "classes.cs.uchicago.edu"));
/// assert!(!in_domain("cs.uchicago.edu", "classes.cs.uchicago.edu"));
/// ```
pub fn in_domain(host: &str, limiting_domain: &str) -> bool {
    if limiting_domain.is_empty() {
        return false;
    }
    let host = host.to_ascii_lowercase();
    let limiting_domain = limiting_domain.to_ascii_lowercase();

    host == limiting_domain
        || host
            .strip_suffix(limiting_domain.as_str())
            .is_some_and(|prefix| prefix.ends_with('.'))
}
