// src/models/selectors.rs

//! Compiled CSS selectors describing where feed items live in a page.

use scraper::{ElementRef, Selector};

use crate::error::{AppError, Result};

/// A compiled selector together with the text it was compiled from.
#[derive(Debug, Clone)]
pub struct SelectorSpec {
    source: String,
    selector: Selector,
}

impl SelectorSpec {
    /// Compile `source`, reporting failures against the request parameter `param`.
    pub fn compile(param: &str, source: &str) -> Result<Self> {
        let selector =
            Selector::parse(source).map_err(|e| AppError::selector(param, source, format!("{e:?}")))?;
        Ok(Self {
            source: source.to_string(),
            selector,
        })
    }

    /// The selector text as supplied.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// All matches among `root` and its descendants, in document order.
    pub fn all<'a>(&self, root: ElementRef<'a>) -> impl Iterator<Item = ElementRef<'a>> {
        self.selector
            .matches(&root)
            .then_some(root)
            .into_iter()
            .chain(root.select(&self.selector))
    }

    /// First match among `root` and its descendants.
    pub fn first<'a>(&self, root: ElementRef<'a>) -> Option<ElementRef<'a>> {
        self.all(root).next()
    }
}

/// A selector whose first match yields either an attribute value or its text.
#[derive(Debug, Clone)]
pub struct AttrSpec {
    selector: SelectorSpec,
    /// `None` means text extraction; `Some("")` is a (useless but valid) attribute name.
    attr: Option<String>,
}

impl AttrSpec {
    /// Parse `<selector>` or `<selector>/<attributeName>`.
    pub fn parse(param: &str, raw: &str) -> Result<Self> {
        let (selector, attr) = match raw.split_once('/') {
            Some((selector, attr)) => (selector, Some(attr.to_string())),
            None => (raw, None),
        };
        Ok(Self {
            selector: SelectorSpec::compile(param, selector)?,
            attr,
        })
    }

    pub fn selector(&self) -> &SelectorSpec {
        &self.selector
    }

    pub fn attr(&self) -> Option<&str> {
        self.attr.as_deref()
    }

    /// Resolve a single value under `root`.
    ///
    /// Absent when the selector matches nothing, when the matched node lacks
    /// the attribute, or when text extraction finds no text child.
    pub fn extract(&self, root: ElementRef<'_>) -> Option<String> {
        let matched = self.selector.first(root)?;
        match &self.attr {
            Some(name) => matched
                .value()
                .attrs()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.to_string()),
            None => first_text(matched),
        }
    }
}

/// The matched element's first direct text child with visible content.
pub fn first_text(element: ElementRef<'_>) -> Option<String> {
    element.children().find_map(|child| {
        child
            .value()
            .as_text()
            .map(|text| text.trim())
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    })
}

/// Union of independently compiled selectors.
///
/// Matches are concatenated member by member; a node matched by two members
/// shows up twice.
#[derive(Debug, Clone)]
pub struct UnionSelector {
    members: Vec<SelectorSpec>,
}

impl UnionSelector {
    /// Compile every top-level comma-separated token of `source`.
    pub fn compile(param: &str, source: &str) -> Result<Self> {
        let members = split_selector_list(source)
            .into_iter()
            .map(|token| SelectorSpec::compile(param, token.trim()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { members })
    }

    pub fn members(&self) -> &[SelectorSpec] {
        &self.members
    }

    pub fn query_all<'a>(&self, root: ElementRef<'a>) -> Vec<ElementRef<'a>> {
        self.members
            .iter()
            .flat_map(|member| member.all(root))
            .collect()
    }

    /// Whether any member matches inside `root` (root included).
    pub fn matches_within(&self, root: ElementRef<'_>) -> bool {
        self.members
            .iter()
            .any(|member| member.first(root).is_some())
    }
}

impl std::fmt::Display for UnionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let sources: Vec<_> = self.members.iter().map(SelectorSpec::as_str).collect();
        write!(f, "{}", sources.join(", "))
    }
}

/// Split a selector list on commas that are not nested in `()`, `[]` or
/// quotes, and not escaped with a backslash.
fn split_selector_list(source: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut chars = source.char_indices();

    while let Some((idx, c)) = chars.next() {
        match (quote, c) {
            (_, '\\') => {
                chars.next();
            }
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[') => depth += 1,
            (None, ')' | ']') => depth = depth.saturating_sub(1),
            (None, ',') if depth == 0 => {
                tokens.push(&source[start..idx]);
                start = idx + 1;
            }
            _ => {}
        }
    }
    tokens.push(&source[start..]);
    tokens
}

/// Date selector plus the format its text is parsed with.
#[derive(Debug, Clone)]
pub struct DateSpec {
    pub selector: SelectorSpec,
    pub format: String,
}

/// Everything needed to turn one candidate node into a feed item.
#[derive(Debug, Clone)]
pub struct ItemSpec {
    pub title: SelectorSpec,
    pub link: Option<AttrSpec>,
    pub date: Option<DateSpec>,
}

impl ItemSpec {
    /// Build an item spec; items need a link or a date to derive their identity.
    pub fn new(title: SelectorSpec, link: Option<AttrSpec>, date: Option<DateSpec>) -> Result<Self> {
        if link.is_none() && date.is_none() {
            return Err(AppError::specification(
                "link",
                "neither link nor date given; one of them is required to identify items",
            ));
        }
        Ok(Self { title, link, date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    fn doc(body: &str) -> Html {
        Html::parse_document(&format!("<html><body>{body}</body></html>"))
    }

    #[test]
    fn test_compile_invalid_selector() {
        let err = SelectorSpec::compile("select", "[[invalid").unwrap_err();
        assert!(matches!(err, AppError::Selector { ref selector, .. } if selector == "[[invalid"));
    }

    #[test]
    fn test_first_includes_root() {
        let html = doc(r#"<div class="post"><div class="post inner"></div></div>"#);
        let outer = SelectorSpec::compile("select", "div.post").unwrap();
        let root = outer.first(html.root_element()).unwrap();
        let again = outer.first(root).unwrap();
        assert_eq!(root.id(), again.id());
    }

    #[test]
    fn test_split_respects_nesting() {
        assert_eq!(split_selector_list("a, span"), vec!["a", " span"]);
        assert_eq!(
            split_selector_list(r#"li:is(.a, .b),a[title="x,y"]"#),
            vec!["li:is(.a, .b)", r#"a[title="x,y"]"#]
        );
    }

    #[test]
    fn test_split_skips_escaped_commas() {
        assert_eq!(split_selector_list(r".a\,b, p"), vec![r".a\,b", " p"]);
        assert_eq!(split_selector_list(r#"a[title="x\"y,z"],p"#), vec![r#"a[title="x\"y,z"]"#, "p"]);
    }

    #[test]
    fn test_union_with_escaped_comma_is_one_member() {
        let html = doc(r#"<p class="a,b">hit</p><p class="a">miss</p>"#);
        let union = UnionSelector::compile("select", r".a\,b").unwrap();
        assert_eq!(union.members().len(), 1);
        let matched = union.query_all(html.root_element());
        assert_eq!(matched.len(), 1);
        assert_eq!(first_text(matched[0]).as_deref(), Some("hit"));
    }

    #[test]
    fn test_union_concatenates_in_declaration_order() {
        let html = doc(r#"<span id="s"><a id="x" href="/1">one</a></span><a id="y" href="/2">two</a>"#);
        let union = UnionSelector::compile("select", "a,span").unwrap();
        let ids: Vec<_> = union
            .query_all(html.root_element())
            .iter()
            .map(|e| e.value().id().unwrap_or_default().to_string())
            .collect();
        assert_eq!(ids, vec!["x", "y", "s"]);
    }

    #[test]
    fn test_union_keeps_duplicates() {
        let html = doc(r#"<p class="a b">text</p>"#);
        let union = UnionSelector::compile("select", ".a, .b").unwrap();
        assert_eq!(union.query_all(html.root_element()).len(), 2);
    }

    #[test]
    fn test_union_rejects_empty_token() {
        assert!(UnionSelector::compile("select", "a,,b").is_err());
    }

    #[test]
    fn test_attr_spec_parse_variants() {
        let text = AttrSpec::parse("link", "a").unwrap();
        assert_eq!(text.attr(), None);

        let href = AttrSpec::parse("link", "a/href").unwrap();
        assert_eq!(href.selector().as_str(), "a");
        assert_eq!(href.attr(), Some("href"));

        let empty = AttrSpec::parse("link", "a/").unwrap();
        assert_eq!(empty.attr(), Some(""));
    }

    #[test]
    fn test_empty_attribute_name_never_falls_back_to_text() {
        let html = doc(r#"<a>text</a>"#);
        let empty = AttrSpec::parse("link", "a/").unwrap();
        assert_eq!(empty.extract(html.root_element()), None);

        let text = AttrSpec::parse("link", "a").unwrap();
        assert_eq!(text.extract(html.root_element()).as_deref(), Some("text"));
    }

    #[test]
    fn test_attr_extract_missing_attribute_is_absent() {
        let html = doc(r#"<a>no href</a>"#);
        let spec = AttrSpec::parse("link", "a/href").unwrap();
        assert_eq!(spec.extract(html.root_element()), None);
    }

    #[test]
    fn test_attr_extract_no_match_is_absent() {
        let html = doc(r#"<p>nothing</p>"#);
        let spec = AttrSpec::parse("link", "a/href").unwrap();
        assert_eq!(spec.extract(html.root_element()), None);
    }

    #[test]
    fn test_attr_extract_value_and_text() {
        let html = doc(r#"<a href="https://example.com/1"> Read </a>"#);
        let href = AttrSpec::parse("link", "a/href").unwrap();
        assert_eq!(
            href.extract(html.root_element()).as_deref(),
            Some("https://example.com/1")
        );
        let text = AttrSpec::parse("link", "a").unwrap();
        assert_eq!(text.extract(html.root_element()).as_deref(), Some("Read"));
    }

    #[test]
    fn test_text_of_empty_element_is_absent() {
        let html = doc(r#"<span class="date"></span><img src="x.png">"#);
        let spec = AttrSpec::parse("link", "span.date").unwrap();
        assert_eq!(spec.extract(html.root_element()), None);
        let img = AttrSpec::parse("link", "img").unwrap();
        assert_eq!(img.extract(html.root_element()), None);
    }

    #[test]
    fn test_item_spec_requires_link_or_date() {
        let title = SelectorSpec::compile("title", "h2").unwrap();
        let err = ItemSpec::new(title, None, None).unwrap_err();
        assert!(matches!(err, AppError::Specification { .. }));
    }
}
