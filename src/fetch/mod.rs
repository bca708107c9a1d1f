//! Document fetching backends.
//!
//! The extraction pipeline only ever sees bytes; where they come from is
//! decided by a [`DocumentFetcher`]:
//!
//! - [`HttpFetcher`]: GET over HTTP(S) with the configured client
//! - [`FileFetcher`]: a local file, for offline runs from the CLI

pub mod http;
pub mod local;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;

// Re-export for convenience
pub use http::HttpFetcher;
pub use local::FileFetcher;

/// Trait for document sources.
#[async_trait]
pub trait DocumentFetcher: Send + Sync {
    /// Fetch the raw document behind `url`.
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>>;
}
