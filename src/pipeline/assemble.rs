// src/pipeline/assemble.rs

//! Feed assembly.

use url::Url;

use crate::models::{CanonicalLink, FeedRecord};
use crate::pipeline::Extraction;
use crate::utils::origin;

/// Link advertised by the feed for a page at `url`.
pub fn canonical_link(url: &Url, policy: CanonicalLink) -> String {
    match policy {
        CanonicalLink::Origin => origin(url),
        CanonicalLink::Full => url.to_string(),
    }
}

/// Fold an extraction into a feed record, keeping item order.
pub fn assemble(extraction: Extraction, link: String) -> FeedRecord {
    FeedRecord {
        title: extraction.document_title,
        link,
        updated: extraction.updated,
        items: extraction.items,
    }
}
