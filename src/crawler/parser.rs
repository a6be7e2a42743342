//! HTML page scanning
//!
//! Extracts the three things the crawl loop needs from a fetched page:
//! the optional `<base href>`, the raw anchor hrefs, and any meta robots
//! directive that blocks the page.

use scraper::{Html, Selector};

/// Extracted information from a fetched HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The raw `<base href>` value, when the page declares one
    pub base_href: Option<String>,

    /// Raw anchor href values in document order, unresolved
    pub hrefs: Vec<String>,

    /// True when a `<meta name="robots">` tag carries `noindex` or
    /// `nofollow`
    pub meta_blocked: bool,
}

/// Scans an HTML document
///
/// Anchor hrefs are returned raw; resolution and canonicalization happen
/// at the call site against the proper base context. The meta robots check
/// is case-insensitive and tolerates attributes in any order.
pub fn parse_page(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        base_href: extract_base_href(&document),
        hrefs: extract_hrefs(&document),
        meta_blocked: meta_robots_blocked(&document),
    }
}

/// The first `<base href>` value, if any
fn extract_base_href(document: &Html) -> Option<String> {
    let selector = Selector::parse("base[href]").ok()?;
    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| href.trim().to_string())
        .filter(|href| !href.is_empty())
}

/// All anchor href values, in document order
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.to_string())
        .collect()
}

/// Whether any `<meta name="robots">` tag blocks the page
///
/// The `content` attribute is split on commas; a trimmed `noindex` or
/// `nofollow` token blocks the page.
fn meta_robots_blocked(document: &Html) -> bool {
    let Ok(selector) = Selector::parse("meta") else {
        return false;
    };

    for element in document.select(&selector) {
        let is_robots = element
            .value()
            .attr("name")
            .map(|n| n.trim().eq_ignore_ascii_case("robots"))
            .unwrap_or(false);
        if !is_robots {
            continue;
        }

        let Some(content) = element.value().attr("content") else {
            continue;
        };
        let blocked = content.split(',').any(|token| {
            let token = token.trim();
            token.eq_ignore_ascii_case("noindex") || token.eq_ignore_ascii_case("nofollow")
        });
        if blocked {
            return true;
        }
    }

    false
}
