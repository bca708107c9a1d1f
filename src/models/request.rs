//! Request parameters and the validated extraction plan built from them.

use std::collections::HashMap;

use url::Url;

use crate::models::{FeedFormat, ItemSpec, UnionSelector};

/// Named request parameters. The first occurrence of a name wins and an empty
/// value counts as absent.
#[derive(Debug, Clone, Default)]
pub struct QueryParams {
    values: HashMap<String, String>,
}

impl QueryParams {
    /// Parse an `application/x-www-form-urlencoded` query string.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut values = HashMap::new();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            values
                .entry(key.into_owned())
                .or_insert_with(|| value.into_owned());
        }
        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<HashMap<String, String>> for QueryParams {
    fn from(values: HashMap<String, String>) -> Self {
        Self { values }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = HashMap::new();
        for (key, value) in iter {
            values.entry(key.into()).or_insert_with(|| value.into());
        }
        Self { values }
    }
}

/// A fully validated feed request.
#[derive(Debug, Clone)]
pub struct FeedRequest {
    /// Page to fetch
    pub url: Url,

    /// Item root candidates
    pub select: UnionSelector,

    /// Candidates containing any of these are dropped
    pub exclude: Option<UnionSelector>,

    pub item: ItemSpec,

    /// Explicitly requested output format
    pub format: Option<FeedFormat>,
}
