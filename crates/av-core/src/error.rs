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

use reqwest::StatusCode;
use reqwest::header::HeaderMap;
use std::fmt;
use thiserror::Error;

/// Boxed source error used for decode failures
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The main error type for av-* crates
#[derive(Error, Debug)]
pub enum Error {
  /// Environment variable error
  #[error("Environment variable error: {0}")]
  EnvVar(#[from] std::env::VarError),

  /// Configuration error
  #[error("Configuration error: {0}")]
  Config(String),

  /// API key error
  #[error("Failed to retrieve API key: {0}")]
  ApiKey(String),

  /// Base URL could not be parsed
  #[error("Invalid URL: {0}")]
  Url(#[from] url::ParseError),

  /// Network-level failure, passed through from the HTTP layer untouched
  #[error("HTTP transport error: {0}")]
  Transport(#[from] reqwest::Error),

  /// Server answered 304 Not Modified
  #[error("API: got HTTP response code 304 (not modified)")]
  NotModified {
    /// Response headers from the server
    headers: HeaderMap,
  },

  /// Error reported by AlphaVantage, either as a non-2xx status or an error envelope
  #[error(transparent)]
  Api(Box<ApiError>),

  /// Response body did not match the expected record shape
  #[error("Decode error ({context}): {source}")]
  Decode {
    /// Which decoding step failed
    context: String,
    /// Underlying CSV/JSON/field error
    #[source]
    source: BoxError,
  },

  /// Quote endpoint returned no rows
  #[error("{0} could not be found")]
  NotFound(String),
}

impl Error {
  /// Wrap a decoding failure with the step that produced it
  pub fn decode<E>(context: impl Into<String>, source: E) -> Self
  where
    E: Into<BoxError>,
  {
    Error::Decode { context: context.into(), source: source.into() }
  }

  /// HTTP status associated with this error, if the server produced one
  pub fn status(&self) -> Option<StatusCode> {
    match self {
      Error::NotModified { .. } => Some(StatusCode::NOT_MODIFIED),
      Error::Api(api) => Some(api.code),
      Error::Transport(e) => e.status(),
      _ => None,
    }
  }
}

impl From<ApiError> for Error {
  fn from(err: ApiError) -> Self {
    Error::Api(Box::new(err))
  }
}

/// An error response from the AlphaVantage server.
///
/// AlphaVantage frequently answers with `200 OK` and a small JSON envelope
/// (`{"Error Message": ...}` or `{"Note": ...}`) instead of an error status,
/// so `code` may well be 200.
#[derive(Debug, Clone)]
pub struct ApiError {
  /// HTTP response status code
  pub code: StatusCode,
  /// Server message, only populated when the body carried an error envelope
  pub message: Option<String>,
  /// Raw response body
  pub body: String,
  /// Response headers
  pub headers: HeaderMap,
}

impl ApiError {
  /// True when the server is telling us we exceeded the call quota
  pub fn is_rate_limited(&self) -> bool {
    self.code == StatusCode::TOO_MANY_REQUESTS
      || self.message.as_deref().is_some_and(|m| {
        let m = m.to_lowercase();
        m.contains("call frequency") || m.contains("rate limit") || m.contains("requests per day")
      })
  }
}

impl fmt::Display for ApiError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match &self.message {
      Some(message) => write!(f, "API: Error {}: {}", self.code.as_u16(), message),
      None => {
        write!(f, "API: got HTTP response code {} with body: {}", self.code.as_u16(), self.body)
      }
    }
  }
}

impl std::error::Error for ApiError {}

/// Result type alias for av-* crates
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
  use super::*;

  fn api_error(code: u16, message: Option<&str>) -> ApiError {
    ApiError {
      code: StatusCode::from_u16(code).unwrap(),
      message: message.map(str::to_string),
      body: "raw body".to_string(),
      headers: HeaderMap::new(),
    }
  }

  #[test]
  fn test_api_error_display_with_message() {
    let err = api_error(200, Some("Message: Invalid API call."));
    assert_eq!(err.to_string(), "API: Error 200: Message: Invalid API call.");
  }

  #[test]
  fn test_api_error_display_without_message() {
    let err = api_error(500, None);
    assert_eq!(err.to_string(), "API: got HTTP response code 500 with body: raw body");
  }

  #[test]
  fn test_rate_limit_detection() {
    let note = api_error(
      200,
      Some("Note: Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute"),
    );
    assert!(note.is_rate_limited());
    assert!(api_error(429, None).is_rate_limited());
    assert!(!api_error(200, Some("Message: Invalid API call.")).is_rate_limited());
  }

  #[test]
  fn test_error_status() {
    let err: Error = api_error(503, None).into();
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));

    let err = Error::NotModified { headers: HeaderMap::new() };
    assert_eq!(err.status(), Some(StatusCode::NOT_MODIFIED));

    assert_eq!(Error::NotFound("VTI".to_string()).status(), None);
  }

  #[test]
  fn test_not_found_display() {
    assert_eq!(Error::NotFound("0050".to_string()).to_string(), "0050 could not be found");
  }

  #[test]
  fn test_decode_keeps_context() {
    let err = Error::decode("row 3 of TimeSeries", "bad float");
    assert_eq!(err.to_string(), "Decode error (row 3 of TimeSeries): bad float");
  }
}
