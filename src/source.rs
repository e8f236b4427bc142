//! Where user records come from.
//!
//! A [`UserSource`] produces the whole [`Listing`] in one request. Any failure
//! collapses to a single HTTP-style status code ([`FetchError::status_code`]),
//! which is all the error view shows.

use crate::user::{Listing, User};
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Status reported for failures that did not come with a server status.
pub const INTERNAL_ERROR_STATUS: u16 = 500;

/// Why a listing could not be loaded.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with a non-success status.
    #[error("server responded with status {0}")]
    Status(u16),
    /// The request could not be sent or the response could not be read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// A local file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The payload was not a JSON array of users.
    #[error("invalid user data: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    /// The status code shown to the user.
    ///
    /// ```rust
    /// use userpager::source::FetchError;
    ///
    /// assert_eq!(FetchError::Status(404).status_code(), 404);
    /// let bad_json = serde_json::from_str::<u8>("x").unwrap_err();
    /// assert_eq!(FetchError::from(bad_json).status_code(), 500);
    /// ```
    pub fn status_code(&self) -> u16 {
        match self {
            FetchError::Status(code) => *code,
            _ => INTERNAL_ERROR_STATUS,
        }
    }
}

/// A provider of user listings.
#[async_trait]
pub trait UserSource: Send + Sync {
    /// Loads every record.
    async fn fetch(&self) -> Result<Listing, FetchError>;

    /// Where the records come from, for logs.
    fn describe(&self) -> String;
}

/// Loads users with `GET <url>`; the body must be a JSON array of users.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Creates a source with a per-request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// The endpoint being queried.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl UserSource for HttpSource {
    async fn fetch(&self) -> Result<Listing, FetchError> {
        debug!(url = %self.url, "requesting users");
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let records: Vec<User> = serde_json::from_slice(&body)?;
        info!(url = %self.url, count = records.len(), "received users");
        Ok(records.into())
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Loads users from a JSON file in the same format the server sends.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// Creates a source reading `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl UserSource for FileSource {
    async fn fetch(&self) -> Result<Listing, FetchError> {
        debug!(path = %self.path.display(), "reading users");
        let body = tokio::fs::read(&self.path)
            .await
            .map_err(|source| FetchError::Io {
                path: self.path.clone(),
                source,
            })?;
        let records: Vec<User> = serde_json::from_slice(&body)?;
        info!(path = %self.path.display(), count = records.len(), "read users");
        Ok(records.into())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn users_json() -> serde_json::Value {
        json!([
            {
                "id": 1,
                "firstname": "Ada",
                "lastname": "Lovelace",
                "email": "ada@example.com",
                "phone": "+44 20 7946 0000",
                "updatedAt": "2024-01-02T03:04:05.000Z"
            },
            {
                "id": 2,
                "firstname": "Alan",
                "lastname": "Turing",
                "email": "alan@example.com",
                "phone": "+44 20 7946 0001",
                "updatedAt": "2024-02-03T04:05:06.000Z"
            }
        ])
    }

    fn timeout() -> Duration {
        Duration::from_secs(5)
    }

    #[tokio::test]
    async fn test_http_source_decodes_users() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(users_json()))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/users", server.uri()), timeout()).unwrap();
        let listing = source.fetch().await.unwrap();

        assert_eq!(listing.item_count, 2);
        assert_eq!(listing.records[1].lastname, "Turing");
        assert_eq!(listing.records[0].updated_at, "2024-01-02T03:04:05.000Z");
    }

    #[tokio::test]
    async fn test_http_source_reports_server_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/users", server.uri()), timeout()).unwrap();
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Status(404)));
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_http_source_rejects_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let source = HttpSource::new(format!("{}/users", server.uri()), timeout()).unwrap();
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(err.status_code(), INTERNAL_ERROR_STATUS);
    }

    #[tokio::test]
    async fn test_http_source_unreachable_host() {
        // nothing listens on port 1
        let source = HttpSource::new("http://127.0.0.1:1/users", timeout()).unwrap();
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.status_code(), INTERNAL_ERROR_STATUS);
    }

    #[tokio::test]
    async fn test_file_source_reads_users() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", users_json()).unwrap();

        let source = FileSource::new(file.path());
        let listing = source.fetch().await.unwrap();

        assert_eq!(listing.item_count, 2);
        assert_eq!(listing.records[0].firstname, "Ada");
        assert_eq!(source.describe(), file.path().display().to_string());
    }

    #[tokio::test]
    async fn test_file_source_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileSource::new(dir.path().join("missing.json"));
        let err = source.fetch().await.unwrap_err();

        assert!(matches!(err, FetchError::Io { .. }));
        assert_eq!(err.status_code(), INTERNAL_ERROR_STATUS);
    }
}
