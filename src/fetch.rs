use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::error::CrawlError;

/// Why a page fetch failed, after every configured route was tried
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request did not complete within the per-request timeout
    #[error("request timed out after {}s", timeout.as_secs())]
    Timeout { timeout: Duration },

    /// The server answered with a non-success status
    #[error("HTTP error, status {status}")]
    Status { status: u16 },

    /// Transport-level failure (DNS, connection, TLS)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The response body was empty or whitespace only
    #[error("response contained no usable HTML")]
    EmptyBody,

    /// The route list was empty
    #[error("no access routes configured")]
    NoRoutes,
}

/// One way of reaching a page: a plain request, or a request through a
/// CORS-style proxy that takes the encoded target URL as a query suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AccessRoute {
    /// Request straight to the target
    Direct,

    /// Request through a proxy prefix, e.g. `https://host/raw?url=`
    Proxy { prefix: String },
}

impl AccessRoute {
    /// The URL actually requested for `target` over this route
    pub fn request_url(&self, target: &Url) -> String {
        match self {
            AccessRoute::Direct => target.to_string(),
            AccessRoute::Proxy { prefix } => {
                format!("{}{}", prefix, urlencoding::encode(target.as_str()))
            }
        }
    }
}

impl fmt::Display for AccessRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessRoute::Direct => f.write_str("direct"),
            AccessRoute::Proxy { prefix } => write!(f, "proxy {}", prefix),
        }
    }
}

/// Default route order: a direct request first, then the public proxies
pub fn default_routes() -> Vec<AccessRoute> {
    vec![
        AccessRoute::Direct,
        AccessRoute::Proxy {
            prefix: "https://api.allorigins.win/raw?url=".to_string(),
        },
        AccessRoute::Proxy {
            prefix: "https://corsproxy.io/?".to_string(),
        },
        AccessRoute::Proxy {
            prefix: "https://api.codetabs.com/v1/proxy?quest=".to_string(),
        },
    ]
}

/// Fetches the raw HTML document behind a URL
#[async_trait]
pub trait HtmlFetcher: Send + Sync {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError>;
}

/// HTTP fetcher that walks an ordered list of access routes, returning the
/// first HTML body it gets and keeping the last error when every route fails.
pub struct ProxyClient {
    client: reqwest::Client,
    routes: Vec<AccessRoute>,
    timeout: Duration,
}

impl ProxyClient {
    /// Build a client with the given routes, per-request timeout and user agent
    pub fn new(
        routes: Vec<AccessRoute>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self, CrawlError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            client,
            routes,
            timeout,
        })
    }

    async fn fetch_via(&self, route: &AccessRoute, target: &Url) -> Result<String, FetchError> {
        let request_url = route.request_url(target);

        let response = self
            .client
            .get(&request_url)
            .header(reqwest::header::ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| self.classify(e))?;
        if body.trim().is_empty() {
            return Err(FetchError::EmptyBody);
        }

        Ok(body)
    }

    fn classify(&self, error: reqwest::Error) -> FetchError {
        if error.is_timeout() {
            FetchError::Timeout {
                timeout: self.timeout,
            }
        } else {
            FetchError::Network(error)
        }
    }
}

#[async_trait]
impl HtmlFetcher for ProxyClient {
    async fn fetch_html(&self, url: &Url) -> Result<String, FetchError> {
        let mut last_error = FetchError::NoRoutes;

        for route in &self.routes {
            match self.fetch_via(route, url).await {
                Ok(html) => {
                    ::log::debug!("Fetched {} via {} ({} bytes)", url, route, html.len());
                    return Ok(html);
                }
                Err(e) => {
                    ::log::warn!("Route {} failed for {}: {}", route, url, e);
                    last_error = e;
                }
            }
        }

        Err(last_error)
    }
}
