//! Response validation shared by every endpoint
//!
//! AlphaVantage reports most failures with `200 OK` and a short JSON object
//! in place of the CSV payload, so the status code alone is not enough.

use crate::transport::RawResponse;
use av_core::{ApiError, Error, Result};
use av_models::ServerResponse;
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

/// Keys AlphaVantage uses for its error/throttle envelope
#[derive(Debug, Default, Deserialize)]
struct ErrorEnvelope {
  #[serde(rename = "Error Message")]
  message: Option<String>,
  #[serde(rename = "Note")]
  note: Option<String>,
  #[serde(rename = "Information")]
  information: Option<String>,
}

impl ErrorEnvelope {
  /// `"Message: .. Note: .."`, or `None` when the object carried none of the keys
  fn summary(self) -> Option<String> {
    let parts: Vec<String> = [("Message", self.message), ("Note", self.note), ("Information", self.information)]
      .into_iter()
      .filter_map(|(label, text)| text.map(|t| format!("{label}: {t}")))
      .collect();

    if parts.is_empty() { None } else { Some(parts.join(" ")) }
  }
}

/// Pull the envelope message out of a body, if the body is one
fn envelope_message(body: &[u8]) -> Option<String> {
  let first = body.iter().find(|b| !b.is_ascii_whitespace())?;
  if *first != b'{' {
    return None;
  }
  serde_json::from_slice::<ErrorEnvelope>(body).ok()?.summary()
}

/// Turn a raw response into an error, or let it through for decoding.
///
/// Checked in order: `304` becomes [`Error::NotModified`], any other non-2xx
/// status becomes [`Error::Api`], and a 2xx whose body is an error envelope
/// also becomes [`Error::Api`].
pub fn check_response(response: &RawResponse) -> Result<()> {
  if response.status == StatusCode::NOT_MODIFIED {
    return Err(Error::NotModified { headers: response.headers.clone() });
  }

  let message = envelope_message(&response.body);

  if !response.status.is_success() || message.is_some() {
    debug!(status = %response.status, ?message, "api error response");
    return Err(
      ApiError {
        code: response.status,
        message,
        body: response.text(),
        headers: response.headers.clone(),
      }
      .into(),
    );
  }

  Ok(())
}

/// Status and headers to attach to a decoded result
pub(crate) fn server_response(response: &RawResponse) -> ServerResponse {
  ServerResponse::new(response.status, response.headers.clone())
}

#[cfg(test)]
mod tests {
  use super::*;
  use reqwest::header::HeaderMap;
  use url::Url;

  fn raw(status: u16, body: &str) -> RawResponse {
    let mut headers = HeaderMap::new();
    headers.insert("x-test", "1".parse().unwrap());
    RawResponse {
      url: Url::parse("https://www.alphavantage.co/query").unwrap(),
      status: StatusCode::from_u16(status).unwrap(),
      headers,
      body: body.as_bytes().to_vec(),
    }
  }

  fn api_error(err: Error) -> ApiError {
    match err {
      Error::Api(api) => *api,
      other => panic!("expected api error, got {other:?}"),
    }
  }

  #[test]
  fn test_csv_body_passes() {
    assert!(check_response(&raw(200, "timestamp,open\n2020-03-25,1.0")).is_ok());
    assert!(check_response(&raw(200, "")).is_ok());
  }

  #[test]
  fn test_json_without_envelope_keys_passes() {
    assert!(check_response(&raw(200, r#"{"Meta Data": {"Information": "x"}}"#)).is_ok());
  }

  #[test]
  fn test_not_modified() {
    match check_response(&raw(304, "")).unwrap_err() {
      Error::NotModified { headers } => assert_eq!(headers["x-test"], "1"),
      other => panic!("expected not modified, got {other:?}"),
    }
  }

  #[test]
  fn test_non_success_status() {
    let err = api_error(check_response(&raw(500, "server exploded")).unwrap_err());
    assert_eq!(err.code, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(err.message, None);
    assert_eq!(err.body, "server exploded");
    assert_eq!(err.to_string(), "API: got HTTP response code 500 with body: server exploded");
  }

  #[test]
  fn test_error_envelope_on_200() {
    let body = r#"{"Error Message": "Invalid API call."}"#;
    let err = api_error(check_response(&raw(200, body)).unwrap_err());
    assert_eq!(err.code, StatusCode::OK);
    assert_eq!(err.message.as_deref(), Some("Message: Invalid API call."));
    assert_eq!(err.body, body);
    assert_eq!(err.headers["x-test"], "1");
  }

  #[test]
  fn test_note_envelope_is_rate_limited() {
    let body = r#"{"Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute."}"#;
    let err = api_error(check_response(&raw(200, body)).unwrap_err());
    assert!(err.message.as_deref().unwrap().starts_with("Note: Thank you"));
    assert!(err.is_rate_limited());
  }

  #[test]
  fn test_message_and_note_are_joined() {
    let body = r#"  {"Error Message": "m", "Note": "n"}"#;
    let err = api_error(check_response(&raw(200, body)).unwrap_err());
    assert_eq!(err.message.as_deref(), Some("Message: m Note: n"));
    assert_eq!(err.to_string(), "API: Error 200: Message: m Note: n");
  }

  #[test]
  fn test_envelope_on_error_status_keeps_message() {
    let err = api_error(check_response(&raw(429, r#"{"Information": "slow down"}"#)).unwrap_err());
    assert_eq!(err.code, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(err.message.as_deref(), Some("Information: slow down"));
  }

  #[test]
  fn test_server_response_copies_status_and_headers() {
    let sr = server_response(&raw(200, ""));
    assert_eq!(sr.http_status_code, StatusCode::OK);
    assert_eq!(sr.headers["x-test"], "1");
  }
}
