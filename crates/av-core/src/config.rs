//! Configuration management for AlphaVantage client

use crate::error::{Error, Result};
use dotenvy::dotenv;
use reqwest::header::HeaderValue;
use serde::{Deserialize, Serialize};
use std::env;

/// Main configuration struct for AlphaVantage client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
  /// AlphaVantage API key
  pub api_key: String,

  /// Request timeout in seconds
  pub timeout_secs: u64,

  /// Base URL for AlphaVantage API
  pub base_url: String,

  /// Optional fragment appended to the default User-Agent
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_agent: Option<String>,
}

impl Config {
  /// Load configuration from environment variables
  ///
  /// Reads `ALPHA_VANTAGE_API_KEY` (required), `AV_TIMEOUT_SECS`, `AV_BASE_URL`
  /// and `AV_USER_AGENT`. A `.env` file is honoured if present.
  pub fn from_env() -> Result<Self> {
    dotenv().ok();

    let api_key = env::var("ALPHA_VANTAGE_API_KEY")
      .map_err(|_| Error::ApiKey("ALPHA_VANTAGE_API_KEY not set".to_string()))?;

    let timeout_secs = env::var("AV_TIMEOUT_SECS")
      .unwrap_or_else(|_| crate::DEFAULT_TIMEOUT_SECS.to_string())
      .parse()
      .map_err(|_| Error::Config("Invalid AV_TIMEOUT_SECS".to_string()))?;

    let base_url =
      env::var("AV_BASE_URL").unwrap_or_else(|_| crate::ALPHA_VANTAGE_BASE_URL.to_string());

    let user_agent = env::var("AV_USER_AGENT").ok().filter(|s| !s.trim().is_empty());

    Config { api_key, timeout_secs, base_url, user_agent }.validated()
  }

  /// Create a config with default values
  pub fn default_with_key(api_key: String) -> Self {
    Config {
      api_key,
      timeout_secs: crate::DEFAULT_TIMEOUT_SECS,
      base_url: crate::ALPHA_VANTAGE_BASE_URL.to_string(),
      user_agent: None,
    }
  }

  /// Point the config at a different endpoint (mock servers, proxies)
  pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
    self.base_url = base_url.into();
    self
  }

  /// Reject configurations that can never produce a working client
  pub fn validated(self) -> Result<Self> {
    if self.api_key.trim().is_empty() {
      return Err(Error::ApiKey("API key is empty".to_string()));
    }
    if self.timeout_secs == 0 {
      return Err(Error::Config("timeout must be at least one second".to_string()));
    }
    url::Url::parse(&self.base_url)?;
    if let Some(suffix) = &self.user_agent {
      HeaderValue::from_str(suffix)
        .map_err(|e| Error::Config(format!("invalid user agent {suffix:?}: {e}")))?;
    }
    Ok(self)
  }
}
