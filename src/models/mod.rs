// src/models/mod.rs

//! Domain models for html2feed.
//!
//! Configuration, compiled extraction specs, and the feed records they
//! produce.

mod config;
mod feed;
mod request;
mod selectors;

// Re-export all public types
pub use config::{CanonicalLink, Config, FeedConfig, FetchConfig, LoggingConfig};
pub use feed::{FeedFormat, FeedItem, FeedRecord};
pub use request::{FeedRequest, QueryParams};
pub use selectors::{first_text, AttrSpec, DateSpec, ItemSpec, SelectorSpec, UnionSelector};
