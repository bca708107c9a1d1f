//! HTTP document fetcher.

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::fetch::DocumentFetcher;
use crate::models::FetchConfig;
use crate::utils::http::{create_async_client, fetch_bytes};

/// Fetches documents with a shared `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Create a fetcher with a client built from `config`.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        Ok(Self {
            client: create_async_client(config)?,
        })
    }
}

#[async_trait]
impl DocumentFetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>> {
        log::debug!("Fetching {}", url);
        let body = fetch_bytes(&self.client, url.as_str()).await?;
        log::debug!("Fetched {} bytes from {}", body.len(), url);
        Ok(body)
    }
}
