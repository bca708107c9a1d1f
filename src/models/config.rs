//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::FeedFormat;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// How documents are fetched
    #[serde(default)]
    pub fetch: FetchConfig,

    /// How feeds are assembled and written
    #[serde(default)]
    pub feed: FeedConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration from `path` if it exists, defaults otherwise.
    ///
    /// A file that exists but does not parse is still an error.
    pub fn load_if_exists(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.fetch.user_agent.trim().is_empty() {
            return Err(AppError::validation("fetch.user_agent is empty"));
        }
        if self.fetch.timeout_secs == 0 {
            return Err(AppError::validation("fetch.timeout_secs must be > 0"));
        }
        if !matches!(
            self.logging.level.to_lowercase().as_str(),
            "trace" | "debug" | "info" | "warn" | "error" | "off"
        ) {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not a log level",
                self.logging.level
            )));
        }
        Ok(())
    }
}

/// HTTP fetch settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,

    /// Accept header sent with every request
    #[serde(default = "defaults::accept")]
    pub accept: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
            accept: defaults::accept(),
        }
    }
}

/// Which form of the requested URL becomes the feed's link.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalLink {
    /// `scheme://host[:port]`
    #[default]
    Origin,
    /// The requested URL as given
    Full,
}

/// Feed assembly settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default)]
    pub canonical_link: CanonicalLink,

    /// Format used when a request does not ask for one
    #[serde(default)]
    pub default_format: FeedFormat,

    /// Resolve relative item links against the requested URL; off keeps
    /// the extracted value as both link and identity
    #[serde(default = "defaults::resolve_links")]
    pub resolve_links: bool,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            canonical_link: CanonicalLink::default(),
            default_format: FeedFormat::default(),
            resolve_links: defaults::resolve_links(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when RUST_LOG is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; html2feed/0.1)".into()
    }
    pub fn timeout() -> u64 {
        30
    }
    pub fn accept() -> String {
        "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8".into()
    }
    pub fn resolve_links() -> bool {
        false
    }
    pub fn log_level() -> String {
        "info".into()
    }
}
