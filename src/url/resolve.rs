use url::Url;

/// Resolves a raw hyperlink against its base context into an absolute URL
///
/// The base context is the page's `<base href>` when present, otherwise the
/// fetched page's own URL. Returns `None` for anything that must not be
/// enqueued:
/// - empty hrefs (including fragment-only links)
/// - `mailto:`, `javascript:`, and `tel:` targets
/// - anything that does not resolve to a syntactically valid http(s) URL
///
/// Fragments are stripped before resolution, a trailing slash is stripped
/// from scheme-carrying hrefs, and duplicate slashes in the resolved path
/// are collapsed.
///
/// # Examples
///
/// ```
/// use sitemill::url::resolve;
/// use url::Url;
///
/// let base = Url::parse("https://example.com/docs/page.html").unwrap();
/// let abs = resolve("../about", &base).unwrap();
/// assert_eq!(abs.as_str(), "https://example.com/about");
/// assert!(resolve("mailto:team@example.com", &base).is_none());
/// ```
pub fn resolve(href: &str, base: &Url) -> Option<Url> {
    let href = href.trim();

    // Strip any fragment before looking at the rest
    let href = match href.find('#') {
        Some(idx) => &href[..idx],
        None => href,
    };

    if href.is_empty() {
        return None;
    }

    let lowered = href.to_ascii_lowercase();
    if lowered.starts_with("mailto:")
        || lowered.starts_with("javascript:")
        || lowered.starts_with("tel:")
    {
        return None;
    }

    let mut resolved = if has_explicit_scheme(href) {
        // Already absolute: validate as-is, minus any trailing slash
        Url::parse(href.trim_end_matches('/')).ok()?
    } else {
        base.join(href).ok()?
    };

    if resolved.scheme() != "http" && resolved.scheme() != "https" {
        return None;
    }
    resolved.host_str()?;

    let path = resolved.path().to_string();
    let collapsed = collapse_slashes(&path);
    if collapsed != path {
        resolved.set_path(&collapsed);
    }

    Some(resolved)
}

/// Whether a href starts with an explicit URL scheme
///
/// A scheme is `[a-zA-Z][a-zA-Z0-9+.-]*` followed by `:` before any `/`
/// or `?`. A colon buried in a path or query (`/redirect?to=https://...`)
/// is not a scheme; such hrefs resolve against the base.
fn has_explicit_scheme(href: &str) -> bool {
    let Some(idx) = href.find(':') else {
        return false;
    };
    let head = &href[..idx];

    let mut chars = head.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'))
}

/// Collapses runs of `/` in a path into a single slash
fn collapse_slashes(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;
    for c in path.chars() {
        if c == '/' {
            if !prev_slash {
                out.push(c);
            }
            prev_slash = true;
        } else {
            out.push(c);
            prev_slash = false;
        }
    }
    out
}
