// src/lambda/mod.rs

//! AWS Lambda handler for feed requests.
//!
//! Accepts an API Gateway style event, reads the feed parameters from
//! `queryStringParameters` and answers with the rendered feed (or a
//! plain-text diagnostic) as an HTTP-shaped response.

use std::collections::HashMap;

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::models::{CanonicalLink, Config, FeedFormat, QueryParams};
use crate::pipeline::{FeedResponse, FeedService};

/// Lambda invocation payload.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEvent {
    /// Decoded query parameters; API Gateway sends `null` when there are none
    #[serde(default)]
    pub query_string_parameters: Option<HashMap<String, String>>,
}

/// Lambda response payload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEventResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl From<FeedResponse> for FeedEventResponse {
    fn from(response: FeedResponse) -> Self {
        let headers = HashMap::from([(
            "Content-Type".to_string(),
            response.content_type.to_string(),
        )]);
        Self {
            status_code: response.status,
            headers,
            body: response.body,
        }
    }
}

/// Main Lambda handler function.
#[instrument(skip(service, event))]
pub async fn handler(
    service: &FeedService,
    event: LambdaEvent<FeedEvent>,
) -> std::result::Result<FeedEventResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, context) = event.into_parts();

    let params = QueryParams::from(request.query_string_parameters.unwrap_or_default());
    info!(
        "Handling request {}: url={:?}",
        context.request_id,
        params.get("url")
    );

    let response = service.handle(&params).await;
    info!(
        "Answered {} with {} bytes in {}ms",
        response.status,
        response.body.len(),
        start.elapsed().as_millis()
    );

    Ok(response.into())
}

/// Load configuration suitable for Lambda environment.
///
/// Starts from the TOML file named by `HTML2FEED_CONFIG` (or defaults) and
/// applies individual environment overrides on top.
pub fn load_lambda_config() -> Result<Config> {
    let mut config = match std::env::var("HTML2FEED_CONFIG") {
        Ok(path) => Config::load(&path)?,
        Err(_) => Config::default(),
    };

    if let Ok(timeout) = std::env::var("FETCH_TIMEOUT_SECS") {
        match timeout.parse() {
            Ok(secs) => config.fetch.timeout_secs = secs,
            Err(_) => warn!("Ignoring FETCH_TIMEOUT_SECS={}", timeout),
        }
    }

    if let Ok(user_agent) = std::env::var("FETCH_USER_AGENT") {
        config.fetch.user_agent = user_agent;
    }

    if let Ok(policy) = std::env::var("FEED_CANONICAL_LINK") {
        match parse_canonical_link(&policy) {
            Some(policy) => config.feed.canonical_link = policy,
            None => warn!("Ignoring FEED_CANONICAL_LINK={}", policy),
        }
    }

    if let Ok(format) = std::env::var("FEED_DEFAULT_FORMAT") {
        match format.parse::<FeedFormat>() {
            Ok(format) => config.feed.default_format = format,
            Err(_) => warn!("Ignoring FEED_DEFAULT_FORMAT={}", format),
        }
    }

    config.validate()?;
    Ok(config)
}

fn parse_canonical_link(value: &str) -> Option<CanonicalLink> {
    match value.trim().to_lowercase().as_str() {
        "origin" => Some(CanonicalLink::Origin),
        "full" => Some(CanonicalLink::Full),
        _ => None,
    }
}
