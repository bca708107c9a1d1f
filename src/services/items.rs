// src/services/items.rs

//! Item extraction.
//!
//! Builds one [`FeedItem`] from one candidate node using the title, link and
//! date directives of an [`ItemSpec`].

use chrono::{DateTime, Utc};
use scraper::ElementRef;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::{first_text, DateSpec, FeedItem, ItemSpec};
use crate::utils::date::parse_with_format;
use crate::utils::resolve_url;

/// Extracts feed items from candidate nodes.
pub struct ItemExtractor<'a> {
    spec: &'a ItemSpec,
    /// Base for resolving relative links; `None` keeps links verbatim
    base_url: Option<&'a Url>,
}

impl<'a> ItemExtractor<'a> {
    pub fn new(spec: &'a ItemSpec, base_url: Option<&'a Url>) -> Self {
        Self { spec, base_url }
    }

    /// Extract the item rooted at `candidate`; `index` identifies it in errors.
    pub fn extract(&self, candidate: ElementRef<'_>, index: usize) -> Result<FeedItem> {
        let title_elem = self
            .spec
            .title
            .first(candidate)
            .ok_or_else(|| AppError::MissingTitle {
                selector: self.spec.title.as_str().to_string(),
                index,
            })?;
        let title = first_text(title_elem).unwrap_or_default();

        let link = self
            .spec
            .link
            .as_ref()
            .and_then(|link| link.extract(candidate))
            .map(|raw| match self.base_url {
                Some(base) => resolve_url(base, &raw),
                None => raw,
            });

        let updated = match &self.spec.date {
            Some(date) => Self::extract_date(date, candidate)?,
            None => None,
        };

        let id = link
            .clone()
            .or_else(|| updated.map(|dt| dt.to_rfc3339()));

        Ok(FeedItem {
            title,
            link,
            id,
            updated,
        })
    }

    /// Parse the date under `candidate`. A selector that matches nothing, or a
    /// node without text, leaves the date unknown; text that does not fit the
    /// format is an error.
    fn extract_date(date: &DateSpec, candidate: ElementRef<'_>) -> Result<Option<DateTime<Utc>>> {
        let Some(text) = date.selector.first(candidate).and_then(first_text) else {
            return Ok(None);
        };
        parse_with_format(&text, &date.format)
            .map(Some)
            .map_err(|e| AppError::date_parse(date.selector.as_str(), text, &date.format, e))
    }
}

#[cfg(test)]
mod tests {
    use scraper::Html;

    use super::*;
    use crate::models::{AttrSpec, SelectorSpec};

    fn spec(link: Option<&str>, date: Option<(&str, &str)>) -> ItemSpec {
        ItemSpec::new(
            SelectorSpec::compile("title", "h2").unwrap(),
            link.map(|l| AttrSpec::parse("link", l).unwrap()),
            date.map(|(sel, format)| DateSpec {
                selector: SelectorSpec::compile("date", sel).unwrap(),
                format: format.to_string(),
            }),
        )
        .unwrap()
    }

    fn candidate(html: &Html) -> ElementRef<'_> {
        let sel = SelectorSpec::compile("select", "div.post").unwrap();
        sel.first(html.root_element()).unwrap()
    }

    #[test]
    fn test_link_becomes_identity() {
        let html = Html::parse_document(
            r#"<div class="post"><h2>First</h2><a href="https://example.com/1">more</a></div>"#,
        );
        let spec = spec(Some("a/href"), None);
        let item = ItemExtractor::new(&spec, None).extract(candidate(&html), 0).unwrap();
        assert_eq!(item.title, "First");
        assert_eq!(item.link.as_deref(), Some("https://example.com/1"));
        assert_eq!(item.id.as_deref(), Some("https://example.com/1"));
        assert_eq!(item.updated, None);
    }

    #[test]
    fn test_relative_link_is_resolved() {
        let html = Html::parse_document(
            r#"<div class="post"><h2>First</h2><a href="/posts/1">more</a></div>"#,
        );
        let spec = spec(Some("a/href"), None);
        let base = Url::parse("https://example.com/blog/").unwrap();
        let item = ItemExtractor::new(&spec, Some(&base))
            .extract(candidate(&html), 0)
            .unwrap();
        assert_eq!(item.link.as_deref(), Some("https://example.com/posts/1"));
    }

    #[test]
    fn test_date_identity_without_link() {
        let html = Html::parse_document(
            r#"<div class="post"><h2>Dated</h2><span class="date">2024-02-29</span></div>"#,
        );
        let spec = spec(None, Some(("span.date", "%Y-%m-%d")));
        let item = ItemExtractor::new(&spec, None).extract(candidate(&html), 0).unwrap();
        let updated = item.updated.unwrap();
        assert_eq!(updated.format("%Y-%m-%d").to_string(), "2024-02-29");
        assert_eq!(item.id, Some(updated.to_rfc3339()));
        assert_eq!(item.link, None);
    }

    #[test]
    fn test_link_wins_over_date_for_identity() {
        let html = Html::parse_document(
            r#"<div class="post"><h2>Both</h2><a href="https://example.com/b">x</a><time>2024-01-01</time></div>"#,
        );
        let spec = spec(Some("a/href"), Some(("time", "%Y-%m-%d")));
        let item = ItemExtractor::new(&spec, None).extract(candidate(&html), 0).unwrap();
        assert_eq!(item.id.as_deref(), Some("https://example.com/b"));
        assert!(item.updated.is_some());
    }

    #[test]
    fn test_missing_title_names_selector() {
        let html = Html::parse_document(r#"<div class="post"><h3>Wrong</h3></div>"#);
        let spec = spec(Some("a/href"), None);
        let err = ItemExtractor::new(&spec, None)
            .extract(candidate(&html), 3)
            .unwrap_err();
        assert!(matches!(err, AppError::MissingTitle { ref selector, index: 3 } if selector == "h2"));
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let html = Html::parse_document(
            r#"<div class="post"><h2>Dated</h2><time>last week</time></div>"#,
        );
        let spec = spec(None, Some(("time", "%Y-%m-%d")));
        let err = ItemExtractor::new(&spec, None)
            .extract(candidate(&html), 0)
            .unwrap_err();
        assert!(matches!(err, AppError::DateParse { ref text, .. } if text == "last week"));
    }

    #[test]
    fn test_unmatched_optionals_leave_identity_empty() {
        let html = Html::parse_document(r#"<div class="post"><h2>Bare</h2></div>"#);
        let spec = spec(Some("a/href"), Some(("time", "%Y-%m-%d")));
        let item = ItemExtractor::new(&spec, None).extract(candidate(&html), 0).unwrap();
        assert_eq!(item.title, "Bare");
        assert_eq!(item.link, None);
        assert_eq!(item.id, None);
        assert_eq!(item.updated, None);
    }

    #[test]
    fn test_title_without_text_child_is_empty() {
        let html = Html::parse_document(
            r#"<div class="post"><h2><a href="https://example.com/1">Nested</a></h2></div>"#,
        );
        let spec = spec(Some("a/href"), None);
        let item = ItemExtractor::new(&spec, None).extract(candidate(&html), 0).unwrap();
        assert_eq!(item.title, "");
        assert_eq!(item.link.as_deref(), Some("https://example.com/1"));
    }
}
