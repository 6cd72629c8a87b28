/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-at-]dwightjbrowne[-dot-]com
 *
 *
 * Permission is hereby granted, free of charge, to any person obtaining a copy
 * of this software and associated documentation files (the "Software"), to deal
 * in the Software without restriction, including without limitation the rights
 * to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
 * copies of the Software, and to permit persons to whom the Software is
 * furnished to do so, subject to the following conditions:
 *
 * The above copyright notice and this permission notice shall be included in all
 * copies or substantial portions of the Software.
 *
 * THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
 * IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
 * FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
 * AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
 * LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
 * OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
 * SOFTWARE.
 */

use crate::endpoints::{
  crypto::CryptoEndpoints, forex::ForexEndpoints, sector::SectorPerformanceEndpoints,
  technical_indicators::TechnicalIndicatorEndpoints, time_series::TimeSeriesEndpoints,
};
use crate::transport::{ApiKeyTransport, ReqwestTransport, RoundTrip};
use av_core::{Config, Error, Result};
use reqwest::header::HeaderValue;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default `User-Agent` sent with every request
pub const USER_AGENT: &str = concat!("av-client/", env!("CARGO_PKG_VERSION"));

#[derive(Clone)]
struct ClientInner {
  transport: Arc<dyn RoundTrip>,
  base_url: Url,
  user_agent: String,
  user_agent_header: HeaderValue,
}

fn agent_header(agent: &str) -> Result<HeaderValue> {
  HeaderValue::from_str(agent)
    .map_err(|e| Error::Config(format!("invalid user agent {agent:?}: {e}")))
}

/// Main AlphaVantage API client
///
/// Holds the base URL and a transport that appends the API key to every
/// request. Cloning is cheap; clones share the same transport.
///
/// # Examples
///
/// ```rust,no_run
/// use av_client::AlphaVantageClient;
/// use av_core::{Config, Interval};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = AlphaVantageClient::new(Config::from_env()?)?;
///
///     let bars = client.time_series().intraday("IBM", Interval::Min5).send().await?;
///     println!("{} bars", bars.len());
///
///     let quote = client.time_series().quote("VTI").send().await?;
///     println!("VTI last traded at {}", quote.price);
///
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct AlphaVantageClient {
  inner: Arc<ClientInner>,
}

impl AlphaVantageClient {
  /// Create a new AlphaVantage API client
  ///
  /// # Arguments
  ///
  /// * `config` - Configuration containing API key and other settings
  ///
  /// # Errors
  ///
  /// Returns an error if the configuration is invalid or the HTTP client
  /// cannot be created.
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// use av_client::AlphaVantageClient;
  /// use av_core::Config;
  ///
  /// let config = Config::from_env().expect("Missing API key");
  /// let client = AlphaVantageClient::new(config).expect("Failed to create client");
  /// ```
  pub fn new(config: Config) -> Result<Self> {
    let config = config.validated()?;
    let base = ReqwestTransport::with_timeout(Duration::from_secs(config.timeout_secs))?;
    Self::with_transport(config, base)
  }

  /// Client for `api_key` with every other setting at its default
  pub fn from_api_key(api_key: impl Into<String>) -> Result<Self> {
    Self::new(Config::default_with_key(api_key.into()))
  }

  /// Build a client on top of a caller-supplied transport.
  ///
  /// The API key from `config` is still injected; `transport` only sees
  /// requests that already carry it. `config.timeout_secs` is not applied
  /// here, the transport owns its own timeouts.
  pub fn with_transport<T>(config: Config, transport: T) -> Result<Self>
  where
    T: RoundTrip + 'static,
  {
    let config = config.validated()?;
    let base_url = Url::parse(&config.base_url)?;
    let transport: Arc<dyn RoundTrip> = Arc::new(ApiKeyTransport::new(config.api_key, transport));

    let client = Self {
      inner: Arc::new(ClientInner {
        transport,
        base_url,
        user_agent: USER_AGENT.to_string(),
        user_agent_header: HeaderValue::from_static(USER_AGENT),
      }),
    };

    match config.user_agent {
      Some(suffix) => client.with_user_agent(suffix),
      None => Ok(client),
    }
  }

  /// Append `suffix` to the default `User-Agent`. An empty suffix is a no-op.
  ///
  /// # Errors
  ///
  /// Returns [`Error::Config`] if the resulting value is not a valid header
  /// value, for example because `suffix` contains a line break.
  pub fn with_user_agent(mut self, suffix: impl AsRef<str>) -> Result<Self> {
    let suffix = suffix.as_ref().trim();
    if !suffix.is_empty() {
      let agent = format!("{USER_AGENT} {suffix}");
      let header = agent_header(&agent)?;
      let inner = Arc::make_mut(&mut self.inner);
      inner.user_agent = agent;
      inner.user_agent_header = header;
    }
    Ok(self)
  }

  /// Endpoint every request is sent to
  pub fn base_url(&self) -> &Url {
    &self.inner.base_url
  }

  /// `User-Agent` header value sent unless a call overrides it
  pub fn user_agent(&self) -> &str {
    &self.inner.user_agent
  }

  pub(crate) fn user_agent_header(&self) -> &HeaderValue {
    &self.inner.user_agent_header
  }

  pub(crate) fn transport(&self) -> &dyn RoundTrip {
    self.inner.transport.as_ref()
  }

  /// Get access to time series endpoints
  ///
  /// Intraday, daily, weekly and monthly equity bars, plus the latest quote
  /// and symbol search.
  pub fn time_series(&self) -> TimeSeriesEndpoints {
    TimeSeriesEndpoints::new(self.clone())
  }

  /// Get access to forex endpoints
  pub fn forex(&self) -> ForexEndpoints {
    ForexEndpoints::new(self.clone())
  }

  /// Get access to cryptocurrency endpoints
  pub fn crypto(&self) -> CryptoEndpoints {
    CryptoEndpoints::new(self.clone())
  }

  /// Get access to technical indicator endpoints
  pub fn technical_indicators(&self) -> TechnicalIndicatorEndpoints {
    TechnicalIndicatorEndpoints::new(self.clone())
  }

  /// Get access to the sector performance endpoint
  pub fn sector_performance(&self) -> SectorPerformanceEndpoints {
    SectorPerformanceEndpoints::new(self.clone())
  }
}

impl std::fmt::Debug for AlphaVantageClient {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("AlphaVantageClient")
      .field("base_url", &self.inner.base_url.as_str())
      .field("user_agent", &self.inner.user_agent)
      .field("transport", &"ApiKeyTransport")
      .finish()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_client_creation() {
    let client = AlphaVantageClient::from_api_key("test_key").expect("Failed to create client");
    assert_eq!(client.base_url().as_str(), av_core::ALPHA_VANTAGE_BASE_URL);
    assert_eq!(client.user_agent(), USER_AGENT);
  }

  #[test]
  fn test_empty_key_rejected() {
    assert!(matches!(AlphaVantageClient::from_api_key("  "), Err(Error::ApiKey(_))));
  }

  #[test]
  fn test_bad_base_url_rejected() {
    let config = Config::default_with_key("k".to_string()).with_base_url("not a url");
    assert!(matches!(AlphaVantageClient::new(config), Err(Error::Url(_))));
  }

  #[test]
  fn test_user_agent_suffix() {
    let client = AlphaVantageClient::from_api_key("k").unwrap();
    let tagged = client.clone().with_user_agent("my-app/1.0").unwrap();

    assert_eq!(tagged.user_agent(), format!("{USER_AGENT} my-app/1.0"));
    assert_eq!(tagged.user_agent_header(), format!("{USER_AGENT} my-app/1.0").as_str());
    // the original keeps its own agent
    assert_eq!(client.user_agent(), USER_AGENT);
    assert_eq!(tagged.with_user_agent("").unwrap().user_agent(), format!("{USER_AGENT} my-app/1.0"));
  }

  #[test]
  fn test_invalid_user_agent_rejected() {
    let client = AlphaVantageClient::from_api_key("k").unwrap();
    let err = client.with_user_agent("my-app\nX-Injected: 1").unwrap_err();
    assert!(matches!(err, Error::Config(_)));

    let mut config = Config::default_with_key("k".to_string());
    config.user_agent = Some("bad\u{7f}agent".to_string());
    assert!(matches!(AlphaVantageClient::new(config), Err(Error::Config(_))));
  }

  #[test]
  fn test_config_user_agent_applied() {
    let mut config = Config::default_with_key("k".to_string());
    config.user_agent = Some("from-env".to_string());
    let client = AlphaVantageClient::new(config).unwrap();
    assert!(client.user_agent().ends_with(" from-env"));
  }

  #[test]
  fn test_debug_hides_key() {
    let client = AlphaVantageClient::from_api_key("super-secret").unwrap();
    let debug = format!("{client:?}");
    assert!(debug.contains("alphavantage.co"));
    assert!(!debug.contains("super-secret"));
  }
}
