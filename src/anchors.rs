//! In-page fragment links (`href="#id"`).

/// The element id an in-page `href` points at.
///
/// `"#about"` yields `Some("about")`; a bare `"#"`, an empty string or an
/// external URL yields `None`.
pub fn fragment_id(href: &str) -> Option<&str> {
    let id = href.trim().strip_prefix('#')?;
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// Whether `href` is an in-page link to the element with `id`.
pub fn links_to(href: &str, id: &str) -> bool {
    !id.is_empty() && fragment_id(href) == Some(id)
}
