//! Remote title-search client.
//!
//! Talks to a MediaWiki OpenSearch endpoint and returns the matched titles in
//! the order the service ranked them.
//!
//! ### Specification
//!
//! - **Endpoint**: `https://en.wikipedia.org/w/api.php` (configurable)
//! - **Query**: `action=opensearch&format=json&search=<term>&limit=10&namespace=0&origin=*`
//! - **Errors**: non-2xx statuses, timeouts and network failures are transport
//!   errors; a cancelled lookup is reported as [`SearchError::Cancelled`].
//! - **Decoding**: element 1 of the JSON array; anything else decodes to an
//!   empty list.

pub mod error;
pub mod request;
pub mod response;

pub use error::SearchError;
pub use request::OpenSearchRequest;
pub use response::decode_titles;

use crate::CancelToken;
use reqwest::header;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Default OpenSearch endpoint.
const DEFAULT_ENDPOINT: &str = "https://en.wikipedia.org/w/api.php";

/// Default request timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent.
const DEFAULT_USER_AGENT: &str = "titleseek/0.1";

/// Default number of titles per lookup.
const DEFAULT_LIMIT: u8 = 10;

/// Remote title lookup.
///
/// The suggestion pipeline depends on this trait rather than on the HTTP
/// client so lookups can be substituted.
#[async_trait::async_trait]
pub trait TitleSearch: Send + Sync {
    /// Look up titles matching `term`, abandoning the call if `cancel` fires.
    async fn search(&self, term: &str, cancel: &CancelToken) -> Result<Vec<String>, SearchError>;
}

/// OpenSearch client configuration.
#[derive(Debug, Clone)]
pub struct OpenSearchConfig {
    /// Endpoint URL (default: https://en.wikipedia.org/w/api.php).
    pub endpoint: String,
    /// Request timeout (default: 10s).
    pub timeout: Duration,
    /// User-agent string (default: titleseek/0.x).
    pub user_agent: String,
    /// Result count per lookup (default: 10).
    pub limit: u8,
    /// Content namespace (default: 0, articles).
    pub namespace: u32,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            limit: DEFAULT_LIMIT,
            namespace: 0,
        }
    }
}

/// HTTP client for the OpenSearch endpoint.
#[derive(Debug, Clone)]
pub struct OpenSearchClient {
    http: reqwest::Client,
    config: OpenSearchConfig,
}

impl OpenSearchClient {
    /// Create a new client with the given configuration.
    pub fn new(config: OpenSearchConfig) -> Result<Self, SearchError> {
        let endpoint = url::Url::parse(&config.endpoint)
            .map_err(|e| SearchError::InvalidEndpoint(format!("{}: {}", config.endpoint, e)))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(SearchError::InvalidEndpoint(format!("unsupported scheme: {}", endpoint.scheme())));
        }

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .build()
            .map_err(|e| SearchError::Network(Arc::new(e)))?;

        Ok(Self { http, config })
    }

    /// Send the request and decode the title list.
    async fn fetch(&self, req: &OpenSearchRequest) -> Result<Vec<String>, SearchError> {
        let start = Instant::now();

        tracing::debug!("searching titles: query={}", req.search);

        let http_response = self
            .http
            .get(&self.config.endpoint)
            .header(header::ACCEPT, "application/json")
            .query(req)
            .send()
            .await?;

        let status = http_response.status();
        tracing::debug!("title search response status: {}", status);

        if !status.is_success() {
            return Err(SearchError::HttpError { status: status.as_u16() });
        }

        let bytes = http_response.bytes().await?;
        let titles = decode_titles(&bytes);

        tracing::debug!("search completed in {:?}, {} titles", start.elapsed(), titles.len());

        Ok(titles)
    }
}

#[async_trait::async_trait]
impl TitleSearch for OpenSearchClient {
    async fn search(&self, term: &str, cancel: &CancelToken) -> Result<Vec<String>, SearchError> {
        if cancel.is_cancelled() {
            return Err(SearchError::Cancelled);
        }

        let req = OpenSearchRequest::new(term, self.config.limit, self.config.namespace);
        req.validate()?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!("title search abandoned: query={}", req.search);
                Err(SearchError::Cancelled)
            }
            result = self.fetch(&req) => result,
        }
    }
}
