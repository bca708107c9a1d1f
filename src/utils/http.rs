// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};

use crate::error::{AppError, Result};
use crate::models::FetchConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &FetchConfig) -> Result<reqwest::Client> {
    let accept = HeaderValue::from_str(&config.accept)
        .map_err(|e| AppError::config(format!("fetch.accept is not a valid header value: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, accept);

    let client = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Fetch a URL and return its body, failing on non-success statuses.
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>> {
    let response = client.get(url).send().await?;
    let status = response.status();
    if !status.is_success() {
        return Err(AppError::upstream_status(url, status.as_u16()));
    }
    Ok(response.bytes().await?.to_vec())
}
