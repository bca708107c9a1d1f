// src/error.rs

//! Unified error handling for html2feed.

use std::fmt;

use thiserror::Error;

/// Result type alias for html2feed operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// A request parameter is missing or malformed
    #[error("invalid parameter '{param}': {message}")]
    Specification { param: String, message: String },

    /// CSS selector parsing failed
    #[error("failed to parse selector '{selector}' for '{param}' ({message})")]
    Selector {
        param: String,
        selector: String,
        message: String,
    },

    /// An item candidate has no node matching the title selector
    #[error("title selector '{selector}' matched nothing in item {index}")]
    MissingTitle { selector: String, index: usize },

    /// Date text did not match the configured format
    #[error("failed to parse date '{text}' matched by '{selector}' with format '{format}' ({message})")]
    DateParse {
        selector: String,
        text: String,
        format: String,
        message: String,
    },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Remote server answered with a non-success status
    #[error("fetching {url} returned status {status}")]
    UpstreamStatus { url: String, status: u16 },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Feed XML could not be written
    #[error("failed to convert to feed ({0})")]
    Serialization(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Coarse classification used to pick a response status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The request's extraction specification is unusable
    Specification,
    /// The specification was valid but the document did not fit it
    Extraction,
    /// Fetching the document failed
    Upstream,
    /// Writing the feed failed
    Serialization,
    /// Anything outside a single request (configuration, local I/O)
    Internal,
}

impl AppError {
    /// Create a parameter error.
    pub fn specification(param: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Specification {
            param: param.into(),
            message: message.to_string(),
        }
    }

    /// Create a selector parsing error.
    pub fn selector(
        param: impl Into<String>,
        selector: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::Selector {
            param: param.into(),
            selector: selector.into(),
            message: message.to_string(),
        }
    }

    /// Create a date parsing error.
    pub fn date_parse(
        selector: impl Into<String>,
        text: impl Into<String>,
        format: impl Into<String>,
        message: impl fmt::Display,
    ) -> Self {
        Self::DateParse {
            selector: selector.into(),
            text: text.into(),
            format: format.into(),
            message: message.to_string(),
        }
    }

    /// Create an upstream status error.
    pub fn upstream_status(url: impl Into<String>, status: u16) -> Self {
        Self::UpstreamStatus {
            url: url.into(),
            status,
        }
    }

    /// Create a feed serialization error.
    pub fn serialization(message: impl fmt::Display) -> Self {
        Self::Serialization(message.to_string())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Specification { .. } | Self::Selector { .. } => ErrorKind::Specification,
            Self::MissingTitle { .. } | Self::DateParse { .. } => ErrorKind::Extraction,
            Self::Http(_) | Self::UpstreamStatus { .. } => ErrorKind::Upstream,
            Self::Serialization(_) => ErrorKind::Serialization,
            Self::Io(_)
            | Self::Json(_)
            | Self::Toml(_)
            | Self::Config(_)
            | Self::Validation(_) => ErrorKind::Internal,
        }
    }

    /// HTTP status code a transport should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Specification => 400,
            ErrorKind::Extraction => 422,
            ErrorKind::Upstream => 502,
            ErrorKind::Serialization | ErrorKind::Internal => 500,
        }
    }
}
