//! Utility functions and helpers.

pub mod date;
pub mod http;

use url::{Origin, Url};

/// Resolve a potentially relative URL against a base URL.
///
/// Absolute hrefs are returned untouched so identities stay byte-identical
/// to what the page published.
pub fn resolve_url(base: &Url, href: &str) -> String {
    if Url::parse(href).is_ok() {
        return href.to_string();
    }
    base.join(href)
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// `scheme://host[:port]` of a URL, or the whole URL when it has no tuple origin.
pub fn origin(url: &Url) -> String {
    match url.origin() {
        origin @ Origin::Tuple(..) => origin.ascii_serialization(),
        Origin::Opaque(_) => url.to_string(),
    }
}
