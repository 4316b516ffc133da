//! HTTP clients for the two upstream sources.
//!
//! Both sources are plain JSON-over-GET endpoints; they differ only in base
//! URL and the parameters the query builders put on the request.

use std::error::Error;
use std::fmt;
use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::debug;

const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// Which upstream a client or failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpstreamKind {
    GovUk,
    Parliament,
}

impl UpstreamKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::GovUk => "Gov.uk",
            Self::Parliament => "Parliament",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamError {
    Status {
        kind: UpstreamKind,
        status: u16,
        status_text: String,
    },
    Transport {
        kind: UpstreamKind,
        message: String,
    },
    Payload {
        kind: UpstreamKind,
        message: String,
    },
}

impl UpstreamError {
    #[must_use]
    pub const fn kind(&self) -> UpstreamKind {
        match self {
            Self::Status { kind, .. } | Self::Transport { kind, .. } | Self::Payload { kind, .. } => {
                *kind
            }
        }
    }

    fn transport(kind: UpstreamKind, err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.to_string()
        };
        Self::Transport { kind, message }
    }
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Status {
                kind,
                status,
                status_text,
            } => write!(f, "{} API error: {status} {status_text}", kind.label()),
            Self::Transport { kind, message } => {
                write!(f, "{} API request failed: {message}", kind.label())
            }
            Self::Payload { kind, message } => {
                write!(f, "{} API returned an unexpected payload: {message}", kind.label())
            }
        }
    }
}

impl Error for UpstreamError {}

/// Ordered query parameters; absent values are never added.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    #[must_use]
    pub const fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl ToString) -> Self {
        self.pairs.push((name, value.to_string()));
        self
    }

    #[must_use]
    pub fn with_opt<T: ToString>(self, name: &'static str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    #[must_use]
    pub fn as_pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }
}

/// A read-only JSON source queried by endpoint path and parameters.
pub trait Upstream: Send + Sync {
    fn kind(&self) -> UpstreamKind;

    /// Issues a GET for `endpoint` and returns the parsed body.
    fn fetch(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> impl Future<Output = Result<Value, UpstreamError>> + Send;
}

/// Upstream backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpUpstream {
    kind: UpstreamKind,
    base_url: String,
    client: Client,
    timeout: Duration,
}

impl HttpUpstream {
    #[must_use]
    pub fn new(kind: UpstreamKind, base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            kind,
            base_url,
            client,
            timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn request(&self, url: &str, params: &QueryParams) -> Result<Value, UpstreamError> {
        let response = self
            .client
            .get(url)
            .query(params.as_pairs())
            .send()
            .await
            .map_err(|err| UpstreamError::transport(self.kind, &err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Status {
                kind: self.kind,
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        response.json::<Value>().await.map_err(|err| {
            if err.is_decode() {
                UpstreamError::Payload {
                    kind: self.kind,
                    message: err.to_string(),
                }
            } else {
                UpstreamError::transport(self.kind, &err)
            }
        })
    }
}

impl Upstream for HttpUpstream {
    fn kind(&self) -> UpstreamKind {
        self.kind
    }

    async fn fetch(&self, endpoint: &str, params: &QueryParams) -> Result<Value, UpstreamError> {
        let url = format!("{}{endpoint}", self.base_url);
        debug!(source = self.kind.label(), %url, params = ?params.as_pairs(), "upstream request");
        tokio::time::timeout(self.timeout, self.request(&url, params))
            .await
            .map_err(|_| UpstreamError::Transport {
                kind: self.kind,
                message: format!("request timed out after {:?}", self.timeout),
            })?
    }
}

/// Builds the HTTP client shared by both upstreams.
///
/// # Errors
/// Returns the `reqwest` error if the TLS backend cannot be initialized.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder().user_agent(user_agent).build()
}
