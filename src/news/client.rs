use futures::StreamExt;
use secrecy::{ExposeSecret, SecretString};
use std::time::Duration;
use thiserror::Error;
use url::Url;

use super::model::{Article, EverythingResponse};

pub const DEFAULT_BASE_URL: &str = "https://newsapi.org";
const EVERYTHING_PATH: &str = "/v2/everything";
const USER_AGENT: &str = concat!("newsstash/", env!("CARGO_PKG_VERSION"));

const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024; // 10MB

#[derive(Debug, Error)]
pub enum NewsError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    #[error("NewsAPI error ({code}): {message}")]
    Api { code: String, message: String },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Response too large (exceeds {0} bytes)")]
    ResponseTooLarge(usize),
    #[error("Invalid base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
    #[error("Insecure base URL: HTTPS required (except localhost for testing)")]
    InsecureBaseUrl,
}

/// Build the HTTP client used for API calls.
///
/// `None` leaves the request timeout unset, so a stalled server blocks the
/// caller until the connection drops.
pub fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, NewsError> {
    let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    Ok(builder.build()?)
}

/// Client for the NewsAPI `/v2/everything` search endpoint.
#[derive(Debug)]
pub struct NewsClient {
    http: reqwest::Client,
    api_key: SecretString,
    base_url: Url,
}

impl NewsClient {
    /// Client against the public endpoint with no request timeout.
    pub fn new(api_key: SecretString) -> Result<Self, NewsError> {
        Self::with_options(http_client(None)?, api_key, None)
    }

    /// Client with a caller-supplied HTTP client and optional base URL.
    ///
    /// The base URL must be HTTPS; plain HTTP is accepted only for
    /// `localhost` / `127.0.0.1` so tests can point at a mock server. The
    /// credential travels in the query string, so anything else would leak it.
    pub fn with_options(
        http: reqwest::Client,
        api_key: SecretString,
        base_url: Option<&str>,
    ) -> Result<Self, NewsError> {
        let base = base_url.unwrap_or(DEFAULT_BASE_URL);

        if !base.starts_with("https://") {
            let is_localhost =
                base.starts_with("http://127.0.0.1") || base.starts_with("http://localhost");
            if !is_localhost {
                tracing::error!(base_url = %base, "Rejecting non-HTTPS base URL (HTTPS required except for localhost)");
                return Err(NewsError::InsecureBaseUrl);
            }
            tracing::warn!(base_url = %base, "Using non-HTTPS NewsAPI base URL (localhost only)");
        }

        if base_url.is_some() {
            tracing::info!(base_url = %base, "Using custom NewsAPI base URL");
        }

        Ok(Self {
            http,
            api_key,
            base_url: Url::parse(base)?,
        })
    }

    /// The full request URL for `topic`, credential included.
    ///
    /// Both values are percent-encoded as query parameters, so a topic such
    /// as `"rust & go"` reaches the server as a single `q` value.
    pub fn request_url(&self, topic: &str) -> Url {
        let mut url = self.base_url.clone();
        url.set_path(EVERYTHING_PATH);
        url.query_pairs_mut()
            .clear()
            .append_pair("q", topic)
            .append_pair("apiKey", self.api_key.expose_secret());
        url
    }

    /// Search for articles about `topic`.
    ///
    /// Articles come back in the order the service sent them. Either the
    /// whole list decodes or the call fails; there is no partial result.
    pub async fn get_news(&self, topic: &str) -> Result<Vec<Article>, NewsError> {
        let url = self.request_url(topic);
        tracing::debug!(topic = %topic, host = url.host_str().unwrap_or(""), "Requesting articles");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = read_limited_bytes(response, MAX_RESPONSE_SIZE).await?;

        let parsed: EverythingResponse = match serde_json::from_slice(&body) {
            Ok(parsed) => parsed,
            Err(e) if !status.is_success() => {
                tracing::debug!(status = status.as_u16(), error = %e, "Non-JSON error body");
                return Err(NewsError::HttpStatus(status.as_u16()));
            }
            Err(e) => return Err(NewsError::Decode(e)),
        };

        if parsed.is_error() {
            let code = parsed.code.unwrap_or_default();
            let message = parsed.message.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), code = %code, "NewsAPI returned an error");
            return Err(NewsError::Api { code, message });
        }

        if !status.is_success() {
            return Err(NewsError::HttpStatus(status.as_u16()));
        }

        tracing::info!(
            topic = %topic,
            returned = parsed.articles.len(),
            total = parsed.total_results.unwrap_or(0),
            "Fetched articles"
        );
        Ok(parsed.articles)
    }
}

async fn read_limited_bytes(
    response: reqwest::Response,
    limit: usize,
) -> Result<Vec<u8>, NewsError> {
    // Fast path: check Content-Length header
    if let Some(len) = response.content_length() {
        if len as usize > limit {
            return Err(NewsError::ResponseTooLarge(limit));
        }
    }

    let mut bytes = Vec::new();
    let mut stream = response.bytes_stream();

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        if bytes.len().saturating_add(chunk.len()) > limit {
            return Err(NewsError::ResponseTooLarge(limit));
        }
        bytes.extend_from_slice(&chunk);
    }

    Ok(bytes)
}
