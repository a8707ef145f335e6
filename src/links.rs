//! In-page fragment links.

/// Selector an in-page link resolves through: the href itself, so `#a.b`
/// matches an element with id `a` and class `b`. `None` for external links,
/// a bare `#`, or anything with whitespace in the fragment.
pub fn fragment_selector(href: &str) -> Option<&str> {
    let fragment = href.strip_prefix('#')?;
    if fragment.is_empty() || fragment.contains(char::is_whitespace) {
        None
    } else {
        Some(href)
    }
}
