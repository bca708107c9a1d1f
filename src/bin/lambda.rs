//! AWS Lambda entry point for html2feed
//!
//! Deploy with `cargo lambda build --release --features lambda`
//! and put it behind an API Gateway / function URL.

use std::sync::Arc;

use html2feed::lambda::{handler, load_lambda_config};
use html2feed::pipeline::FeedService;
use lambda_runtime::{Error as LambdaError, LambdaEvent, service_fn};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the AWS Lambda function.
#[tokio::main]
async fn main() -> Result<(), LambdaError> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    let config = load_lambda_config()?;
    let service = FeedService::with_http(Arc::new(config))?;
    info!("html2feed Lambda starting...");

    let service = &service;
    lambda_runtime::run(service_fn(move |event: LambdaEvent<_>| async move {
        handler(service, event).await
    }))
    .await
}
