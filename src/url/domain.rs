use url::Url;

/// Removes a leading `www.` from a host name
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Checks whether two URLs belong to the same site
///
/// Host comparison ignores a leading `www.` on either side, so
/// `https://www.example.com` and `https://example.com` count as the same
/// site. URLs without a host never match anything.
///
/// # Examples
///
/// ```
/// use sitemill::url::same_site;
/// use url::Url;
///
/// let a = Url::parse("https://www.example.com/a").unwrap();
/// let b = Url::parse("https://example.com/b").unwrap();
/// assert!(same_site(&a, &b));
/// ```
pub fn same_site(a: &Url, b: &Url) -> bool {
    match (a.host_str(), b.host_str()) {
        (Some(ha), Some(hb)) => strip_www(ha) == strip_www(hb),
        _ => false,
    }
}
