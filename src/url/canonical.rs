use url::Url;

/// Directory-index documents stripped during canonicalization
const INDEX_DOCUMENTS: &[&str] = &["/index.html", "/index.php"];

/// Canonicalizes a URL into the form used as the dedup key
///
/// # Canonicalization Steps
///
/// 1. Parse the URL; unparseable input yields the empty string
/// 2. Lowercase the scheme and host (done by the parser)
/// 3. Strip any fragment
/// 4. Strip a trailing `/index.html` or `/index.php` segment
/// 5. Strip trailing slashes
///
/// Two raw URLs that canonicalize identically are the same page. The empty
/// string is never a valid dedup key; callers must skip it.
///
/// The operation is idempotent: canonicalizing a canonical URL returns it
/// unchanged.
///
/// # Examples
///
/// ```
/// use sitemill::url::canonicalize;
///
/// assert_eq!(
///     canonicalize("HTTPS://Example.COM/blog/index.html"),
///     "https://example.com/blog"
/// );
/// assert_eq!(canonicalize("not a url"), "");
/// ```
pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    let mut url = match Url::parse(trimmed) {
        Ok(u) => u,
        Err(_) => return String::new(),
    };

    if url.host_str().is_none() {
        return String::new();
    }

    url.set_fragment(None);

    let mut canonical = url.to_string();

    // Strip trailing slashes and index documents to a fixed point, so a
    // stacked path like `/index.html/index.html` fully collapses. An index
    // document only counts when it ends the URL outright; a query string
    // after it keeps the path as-is.
    loop {
        let before = canonical.len();

        while canonical.ends_with('/') {
            canonical.pop();
        }
        for index_doc in INDEX_DOCUMENTS {
            while let Some(stripped) = canonical.strip_suffix(index_doc) {
                canonical = stripped.trim_end_matches('/').to_string();
            }
        }

        if canonical.len() == before {
            break;
        }
    }

    canonical
}
