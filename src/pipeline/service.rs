// src/pipeline/service.rs

//! Transport-agnostic feed request handling.
//!
//! Both the CLI and the Lambda handler go through [`FeedService`]: parse the
//! parameters, fetch the page, extract, assemble, serialize.

use std::sync::Arc;

use scraper::Html;

use crate::error::{AppError, Result};
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::models::{Config, FeedConfig, FeedFormat, FeedRecord, FeedRequest, QueryParams};
use crate::pipeline::{assemble, canonical_link, run_extraction};
use crate::services::{parse_request, write_feed};

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// A serialized feed.
#[derive(Debug, Clone)]
pub struct RenderedFeed {
    pub format: FeedFormat,
    pub body: String,
    pub item_count: usize,
}

/// Status, content type and body ready for any transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedResponse {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
}

impl FeedResponse {
    fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: TEXT_PLAIN,
            body: body.into(),
        }
    }

    fn from_error(err: &AppError) -> Self {
        let status = err.status_code();
        if status >= 500 {
            log::error!("Feed request failed: {}", err);
        } else {
            log::warn!("Feed request rejected: {}", err);
        }
        Self::text(status, err.to_string())
    }
}

/// Turns request parameters into feeds.
#[derive(Clone)]
pub struct FeedService {
    config: Arc<Config>,
    fetcher: Arc<dyn DocumentFetcher>,
}

impl FeedService {
    pub fn new(config: Arc<Config>, fetcher: Arc<dyn DocumentFetcher>) -> Self {
        Self { config, fetcher }
    }

    /// Service fetching over HTTP with the configured client.
    pub fn with_http(config: Arc<Config>) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.fetch)?;
        Ok(Self::new(config, Arc::new(fetcher)))
    }

    /// Extract the feed record described by `params` without serializing it.
    pub async fn record(&self, params: &QueryParams) -> Result<FeedRecord> {
        let request = parse_request(params)?;
        self.fetch_record(&request).await
    }

    /// Render the feed described by `params`.
    ///
    /// The parameters are validated before anything is fetched.
    pub async fn render(&self, params: &QueryParams) -> Result<RenderedFeed> {
        let request = parse_request(params)?;
        let format = request.format.unwrap_or(self.config.feed.default_format);

        let record = self.fetch_record(&request).await?;
        let xml = write_feed(&record, format)?;

        log::info!(
            "Built {} feed with {} items from {}",
            format,
            record.items.len(),
            request.url
        );

        Ok(RenderedFeed {
            format,
            body: xml,
            item_count: record.items.len(),
        })
    }

    async fn fetch_record(&self, request: &FeedRequest) -> Result<FeedRecord> {
        let body = self.fetcher.fetch(&request.url).await?;
        build_feed(&body, request, &self.config.feed)
    }

    /// Answer a request. An empty parameter set is a health check.
    pub async fn handle(&self, params: &QueryParams) -> FeedResponse {
        if params.is_empty() {
            return FeedResponse::text(200, "ok");
        }

        match self.render(params).await {
            Ok(feed) => FeedResponse {
                status: 200,
                content_type: feed.format.content_type(),
                body: feed.body,
            },
            Err(e) => FeedResponse::from_error(&e),
        }
    }
}

/// Parse `body` as HTML and run extraction and assembly over it.
pub fn build_feed(body: &[u8], request: &FeedRequest, config: &FeedConfig) -> Result<FeedRecord> {
    let document = Html::parse_document(&String::from_utf8_lossy(body));
    let extraction = run_extraction(&document, request, config.resolve_links)?;
    Ok(assemble(
        extraction,
        canonical_link(&request.url, config.canonical_link),
    ))
}
