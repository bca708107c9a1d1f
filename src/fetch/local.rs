//! Local filesystem document fetcher.

use std::path::PathBuf;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::fetch::DocumentFetcher;

/// Serves one local file regardless of the requested URL.
///
/// The URL still drives the canonical link and relative link resolution,
/// so a saved page can be turned into the feed it would produce online.
#[derive(Debug, Clone)]
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl DocumentFetcher for FileFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        log::debug!("Reading {} in place of {}", self.path.display(), url);
        Ok(tokio::fs::read(&self.path).await?)
    }
}
