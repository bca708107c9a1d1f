//! Feed records produced by extraction.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// One entry extracted from a candidate node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedItem {
    /// Text of the title node
    pub title: String,

    /// Link taken from the link selector, resolved against the page URL when
    /// `feed.resolve_links` is on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Stable identity: the link, or the RFC 3339 date when there is no link
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Parsed date, if a date selector matched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// A complete feed ready for serialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedRecord {
    pub title: String,

    /// Canonical link of the feed
    pub link: String,

    /// Most recent item date
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,

    pub items: Vec<FeedItem>,
}

/// Wire format of the generated feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    #[default]
    Atom,
    Rss,
}

impl FeedFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            FeedFormat::Atom => "application/atom+xml; charset=utf-8",
            FeedFormat::Rss => "application/rss+xml; charset=utf-8",
        }
    }
}

impl FromStr for FeedFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "atom" => Ok(FeedFormat::Atom),
            "rss" => Ok(FeedFormat::Rss),
            other => Err(AppError::specification(
                "format",
                format!("unknown feed format '{other}', expected 'atom' or 'rss'"),
            )),
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedFormat::Atom => write!(f, "atom"),
            FeedFormat::Rss => write!(f, "rss"),
        }
    }
}
