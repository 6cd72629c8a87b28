//! HTTP transport layer for AlphaVantage API requests
//!
//! A [`RoundTrip`] sends one fully-built request and hands back the buffered
//! response. [`ReqwestTransport`] does the network I/O; [`ApiKeyTransport`]
//! wraps any other transport and appends `apikey=<key>` to every outgoing
//! query string before delegating.

use async_trait::async_trait;
use av_core::Result;
use reqwest::header::HeaderMap;
use reqwest::{Client, Request, StatusCode};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// Query parameter carrying the API key
pub const API_KEY_PARAM: &str = "apikey";

/// A response whose body has already been read in full
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// URL the request was actually sent to, after every transport layer ran
    pub url: Url,
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw body bytes, not yet decoded
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Body as text, replacing invalid UTF-8
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Something that can execute a single HTTP request
#[async_trait]
pub trait RoundTrip: Send + Sync {
    /// Send `request` and buffer the full response.
    ///
    /// Network failures are returned as-is; nothing is retried.
    async fn round_trip(&self, request: Request) -> Result<RawResponse>;
}

#[async_trait]
impl<T: RoundTrip + ?Sized> RoundTrip for Arc<T> {
    async fn round_trip(&self, request: Request) -> Result<RawResponse> {
        (**self).round_trip(request).await
    }
}

/// Base transport backed by a `reqwest::Client`
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Wrap an already configured client (proxies, TLS, pools)
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client with the given overall request timeout
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl RoundTrip for ReqwestTransport {
    async fn round_trip(&self, request: Request) -> Result<RawResponse> {
        let url = request.url().clone();
        let response = self.client.execute(request).await?;

        let status = response.status();
        let headers = response.headers().clone();
        // Reading to the end hands the connection back to the pool on every path
        let body = response.bytes().await?.to_vec();

        debug!(%status, bytes = body.len(), "response received");
        Ok(RawResponse { url, status, headers, body })
    }
}

/// Appends the API key to every request, then delegates to `T`
pub struct ApiKeyTransport<T = ReqwestTransport> {
    key: String,
    inner: T,
}

impl<T> ApiKeyTransport<T> {
    /// Wrap `inner` so every request it sees carries `key`
    pub fn new(key: impl Into<String>, inner: T) -> Self {
        Self { key: key.into(), inner }
    }

    /// The wrapped transport
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T> fmt::Debug for ApiKeyTransport<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyTransport").field("key", &"<redacted>").finish_non_exhaustive()
    }
}

#[async_trait]
impl<T: RoundTrip> RoundTrip for ApiKeyTransport<T> {
    #[instrument(level = "trace", skip_all)]
    async fn round_trip(&self, mut request: Request) -> Result<RawResponse> {
        request.url_mut().query_pairs_mut().append_pair(API_KEY_PARAM, &self.key);
        self.inner.round_trip(request).await
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Canned transports for unit tests

    use super::*;
    use std::sync::Mutex;

    /// Answers every request with the same status and body, remembering what it was sent
    #[derive(Debug, Default)]
    pub(crate) struct StaticTransport {
        status: StatusCode,
        body: String,
        headers: HeaderMap,
        pub(crate) sent: Mutex<Vec<Request>>,
    }

    impl StaticTransport {
        pub(crate) fn new(status: u16, body: &str) -> Self {
            Self {
                status: StatusCode::from_u16(status).unwrap(),
                body: body.to_string(),
                headers: HeaderMap::new(),
                sent: Mutex::new(Vec::new()),
            }
        }

        pub(crate) fn with_header(mut self, name: &'static str, value: &'static str) -> Self {
            self.headers.insert(name, value.parse().unwrap());
            self
        }

        pub(crate) fn last_url(&self) -> Url {
            self.sent.lock().unwrap().last().expect("no request sent").url().clone()
        }

        pub(crate) fn sent_count(&self) -> usize {
            self.sent.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl RoundTrip for StaticTransport {
        async fn round_trip(&self, request: Request) -> Result<RawResponse> {
            let url = request.url().clone();
            self.sent.lock().unwrap().push(request);
            Ok(RawResponse {
                url,
                status: self.status,
                headers: self.headers.clone(),
                body: self.body.clone().into_bytes(),
            })
        }
    }
}
