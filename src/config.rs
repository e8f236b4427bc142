//! Command-line and environment configuration.

use crate::paginator::{DEFAULT_MAX_WINDOW, DEFAULT_PER_PAGE};
use crate::source::{FetchError, FileSource, HttpSource, UserSource};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Endpoint queried when no URL is given.
pub const DEFAULT_URL: &str = "http://localhost:3000/users";

/// Request timeout, in seconds, when none is given.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// A configuration value that cannot be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `--per-page` was zero.
    #[error("--per-page must be at least 1")]
    ZeroPerPage,
    /// `--max-pages` was zero.
    #[error("--max-pages must be at least 1")]
    ZeroMaxPages,
    /// `--timeout` was zero.
    #[error("--timeout must be at least 1 second")]
    ZeroTimeout,
    /// `--url` is not an http(s) URL.
    #[error("invalid url {0:?}: expected an http:// or https:// address")]
    InvalidUrl(String),
    /// The HTTP client could not be built.
    #[error("failed to set up the http client: {0}")]
    Client(#[from] FetchError),
}

/// Runtime settings.
///
/// ```rust
/// use clap::Parser;
/// use userpager::config::Config;
///
/// let config = Config::try_parse_from(["userpager", "--per-page", "15"]).unwrap();
/// assert_eq!(config.per_page, 15);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Parser)]
#[command(name = "userpager", version, about = "Browse user records page by page")]
pub struct Config {
    /// Endpoint returning a JSON array of users.
    #[arg(long, env = "USERPAGER_URL", default_value = DEFAULT_URL)]
    pub url: String,

    /// Read users from a JSON file instead of the endpoint.
    #[arg(long, env = "USERPAGER_FILE")]
    pub file: Option<PathBuf>,

    /// Records per page.
    #[arg(long, env = "USERPAGER_PER_PAGE", default_value_t = DEFAULT_PER_PAGE)]
    pub per_page: usize,

    /// Page buttons shown at once.
    #[arg(long, env = "USERPAGER_MAX_PAGES", default_value_t = DEFAULT_MAX_WINDOW)]
    pub max_pages: usize,

    /// Request timeout in seconds.
    #[arg(long, env = "USERPAGER_TIMEOUT", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout: u64,

    /// Write logs to this file (filtered by RUST_LOG).
    #[arg(long, env = "USERPAGER_LOG_FILE")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// Checks that every value is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.per_page == 0 {
            return Err(ConfigError::ZeroPerPage);
        }
        if self.max_pages == 0 {
            return Err(ConfigError::ZeroMaxPages);
        }
        if self.timeout == 0 {
            return Err(ConfigError::ZeroTimeout);
        }
        if self.file.is_none() {
            let valid = reqwest::Url::parse(&self.url)
                .map(|url| matches!(url.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !valid {
                return Err(ConfigError::InvalidUrl(self.url.clone()));
            }
        }
        Ok(())
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    /// The configured source: the file when given, otherwise the URL.
    pub fn source(&self) -> Result<Box<dyn UserSource>, ConfigError> {
        match &self.file {
            Some(path) => Ok(Box::new(FileSource::new(path))),
            None => Ok(Box::new(HttpSource::new(&self.url, self.timeout())?)),
        }
    }
}
