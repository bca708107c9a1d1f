// src/services/spec.rs

//! Request parameter parsing.
//!
//! Turns the raw `url`, `select`, `exclude`, `title`, `link`, `date`,
//! `dateFormat` and `format` parameters into a validated [`FeedRequest`].
//! Nothing here touches the network; a request that fails here is never
//! fetched.

use url::Url;

use crate::error::{AppError, Result};
use crate::models::{
    AttrSpec, DateSpec, FeedFormat, FeedRequest, ItemSpec, QueryParams, SelectorSpec,
    UnionSelector,
};
use crate::utils::date::is_valid_format;

pub const PARAM_URL: &str = "url";
pub const PARAM_SELECT: &str = "select";
pub const PARAM_EXCLUDE: &str = "exclude";
pub const PARAM_TITLE: &str = "title";
pub const PARAM_LINK: &str = "link";
pub const PARAM_DATE: &str = "date";
pub const PARAM_DATE_FORMAT: &str = "dateFormat";
pub const PARAM_FORMAT: &str = "format";

/// Parse and validate a complete feed request.
pub fn parse_request(params: &QueryParams) -> Result<FeedRequest> {
    let raw_url = params
        .get(PARAM_URL)
        .ok_or_else(|| AppError::specification(PARAM_URL, "missing url"))?;
    let url = Url::parse(raw_url).map_err(|e| {
        AppError::specification(PARAM_URL, format!("failed to parse url '{raw_url}' ({e})"))
    })?;

    let select = params
        .get(PARAM_SELECT)
        .ok_or_else(|| AppError::specification(PARAM_SELECT, "missing selector"))?;
    let select = UnionSelector::compile(PARAM_SELECT, select)?;

    let item = parse_item_spec(params)?;

    let exclude = params
        .get(PARAM_EXCLUDE)
        .map(|raw| UnionSelector::compile(PARAM_EXCLUDE, raw))
        .transpose()?;

    let format = params
        .get(PARAM_FORMAT)
        .map(str::parse::<FeedFormat>)
        .transpose()?;

    Ok(FeedRequest {
        url,
        select,
        exclude,
        item,
        format,
    })
}

/// Parse the per-item directives: `title`, `link`, `date` and `dateFormat`.
pub fn parse_item_spec(params: &QueryParams) -> Result<ItemSpec> {
    let title = params
        .get(PARAM_TITLE)
        .ok_or_else(|| AppError::specification(PARAM_TITLE, "missing title selector"))?;
    let title = SelectorSpec::compile(PARAM_TITLE, title)?;

    let link = params
        .get(PARAM_LINK)
        .map(|raw| AttrSpec::parse(PARAM_LINK, raw))
        .transpose()?;

    let date = params
        .get(PARAM_DATE)
        .map(|raw| parse_date_spec(raw, params.get(PARAM_DATE_FORMAT)))
        .transpose()?;

    ItemSpec::new(title, link, date)
}

fn parse_date_spec(raw: &str, format: Option<&str>) -> Result<DateSpec> {
    let selector = SelectorSpec::compile(PARAM_DATE, raw)?;
    let format = format.ok_or_else(|| {
        AppError::specification(PARAM_DATE_FORMAT, "missing date format for date selector")
    })?;
    if !is_valid_format(format) {
        return Err(AppError::specification(
            PARAM_DATE_FORMAT,
            format!("'{format}' is not a valid date format"),
        ));
    }
    Ok(DateSpec {
        selector,
        format: format.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> QueryParams {
        QueryParams::from_query(query)
    }

    fn param_of(err: AppError) -> String {
        match err {
            AppError::Specification { param, .. } | AppError::Selector { param, .. } => param,
            other => panic!("expected a specification error, got {other:?}"),
        }
    }

    #[test]
    fn test_minimal_request() {
        let request = parse_request(&params(
            "url=https://example.com/blog&select=div.post&title=h2&link=a/href",
        ))
        .unwrap();
        assert_eq!(request.url.as_str(), "https://example.com/blog");
        assert_eq!(request.select.members().len(), 1);
        assert!(request.exclude.is_none());
        assert!(request.item.date.is_none());
        assert_eq!(request.item.link.as_ref().unwrap().attr(), Some("href"));
        assert_eq!(request.format, None);
    }

    #[test]
    fn test_missing_url() {
        let err = parse_request(&params("select=div&title=h2&link=a")).unwrap_err();
        assert_eq!(param_of(err), PARAM_URL);
    }

    #[test]
    fn test_invalid_url() {
        let err = parse_request(&params("url=not%20a%20url&select=div&title=h2&link=a")).unwrap_err();
        assert_eq!(param_of(err), PARAM_URL);
    }

    #[test]
    fn test_missing_select() {
        let err = parse_request(&params("url=https://example.com&select=&title=h2&link=a")).unwrap_err();
        assert!(err.to_string().contains("missing selector"));
        assert_eq!(param_of(err), PARAM_SELECT);
    }

    #[test]
    fn test_unparsable_select_names_selector() {
        let err = parse_request(&params("url=https://example.com&select=div,[[&title=h2&link=a"))
            .unwrap_err();
        assert!(err.to_string().contains("[["));
        assert_eq!(param_of(err), PARAM_SELECT);
    }

    #[test]
    fn test_missing_title() {
        let err = parse_item_spec(&params("link=a/href")).unwrap_err();
        assert!(err.to_string().contains("missing title selector"));
        assert_eq!(param_of(err), PARAM_TITLE);
    }

    #[test]
    fn test_unparsable_link_selector() {
        let err = parse_item_spec(&params("title=h2&link=a[%2Fhref")).unwrap_err();
        assert_eq!(param_of(err), PARAM_LINK);
    }

    #[test]
    fn test_neither_link_nor_date() {
        let err = parse_request(&params("url=https://example.com&select=div&title=h2")).unwrap_err();
        assert!(matches!(err, AppError::Specification { .. }));
        assert!(err.to_string().contains("neither link nor date"));
    }

    #[test]
    fn test_date_requires_format() {
        let err = parse_item_spec(&params("title=h2&date=time")).unwrap_err();
        assert_eq!(param_of(err), PARAM_DATE_FORMAT);
    }

    #[test]
    fn test_date_rejects_invalid_format() {
        let err = parse_item_spec(&params("title=h2&date=time&dateFormat=%25Y-%25")).unwrap_err();
        assert_eq!(param_of(err), PARAM_DATE_FORMAT);
    }

    #[test]
    fn test_date_only_spec() {
        let spec = parse_item_spec(&params("title=h2&date=time&dateFormat=%25Y-%25m-%25d")).unwrap();
        let date = spec.date.unwrap();
        assert_eq!(date.selector.as_str(), "time");
        assert_eq!(date.format, "%Y-%m-%d");
        assert!(spec.link.is_none());
    }

    #[test]
    fn test_date_format_ignored_without_date() {
        let spec = parse_item_spec(&params("title=h2&link=a&dateFormat=%25")).unwrap();
        assert!(spec.date.is_none());
    }

    #[test]
    fn test_unparsable_exclude() {
        let err = parse_request(&params(
            "url=https://example.com&select=article&exclude=.ad,[[&title=h2&link=a",
        ))
        .unwrap_err();
        assert_eq!(param_of(err), PARAM_EXCLUDE);
    }

    #[test]
    fn test_exclude_and_format() {
        let request = parse_request(&params(
            "url=https://example.com&select=article&exclude=.ad,.promo&title=h2&link=a&format=rss",
        ))
        .unwrap();
        assert_eq!(request.exclude.unwrap().members().len(), 2);
        assert_eq!(request.format, Some(FeedFormat::Rss));
    }

    #[test]
    fn test_unknown_format() {
        let err = parse_request(&params(
            "url=https://example.com&select=article&title=h2&link=a&format=json",
        ))
        .unwrap_err();
        assert_eq!(param_of(err), PARAM_FORMAT);
    }
}
