// src/pipeline/extract.rs

//! Extraction pipeline.
//!
//! Resolves item candidates in a parsed document, drops excluded ones, and
//! runs the item extractor over the rest in match order.

use chrono::{DateTime, Utc};
use scraper::Html;

use crate::error::Result;
use crate::models::{first_text, FeedItem, FeedRequest, SelectorSpec};
use crate::services::ItemExtractor;

/// Selector for the page's own `<title>`.
const DOCUMENT_TITLE_SELECTOR: &str = "title";

/// Items pulled out of one document.
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Page `<title>`, or the requested URL when the page has none
    pub document_title: String,

    /// Items in match order
    pub items: Vec<FeedItem>,

    /// Latest item date
    pub updated: Option<DateTime<Utc>>,

    /// Candidates dropped by the exclusion selector
    pub excluded: usize,
}

/// Run the extraction pipeline over `document`.
///
/// Any item failure aborts the whole extraction.
pub fn run_extraction(document: &Html, request: &FeedRequest, resolve_links: bool) -> Result<Extraction> {
    let root = document.root_element();

    let title_selector = SelectorSpec::compile(DOCUMENT_TITLE_SELECTOR, DOCUMENT_TITLE_SELECTOR)?;
    let document_title = title_selector
        .first(root)
        .and_then(first_text)
        .unwrap_or_else(|| request.url.to_string());

    let candidates = request.select.query_all(root);
    log::debug!(
        "Selector '{}' matched {} candidates",
        request.select,
        candidates.len()
    );

    let base_url = resolve_links.then_some(&request.url);
    let extractor = ItemExtractor::new(&request.item, base_url);

    let mut items = Vec::with_capacity(candidates.len());
    let mut updated = None;
    let mut excluded = 0;

    for (index, candidate) in candidates.into_iter().enumerate() {
        if let Some(exclude) = &request.exclude {
            if exclude.matches_within(candidate) {
                excluded += 1;
                continue;
            }
        }

        let item = extractor.extract(candidate, index)?;
        updated = updated.max(item.updated);
        items.push(item);
    }

    if excluded > 0 {
        log::debug!("Excluded {} candidates", excluded);
    }

    Ok(Extraction {
        document_title,
        items,
        updated,
        excluded,
    })
}
