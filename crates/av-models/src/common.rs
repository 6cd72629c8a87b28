/*
 *
 *
 *
 *
 * MIT License
 * Copyright (c) 2025. Dwight J. Browne
 * dwight[-dot-]browne[-at-]dwightjbrowne[-dot-]com
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

//! Field types and parsing rules shared by every AlphaVantage CSV response

use av_core::{FuncType, HeaderMap, StatusCode};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

/// Timezone AlphaVantage reports US equity timestamps in
pub const MARKET_TZ: Tz = chrono_tz::US::Eastern;

/// Timestamp formats accepted in date columns, tried in order
pub const TIMESTAMP_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y-%m-%d %H:%M:%S"];

/// HTTP status and headers of the response a result was decoded from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerResponse {
  /// HTTP status code
  pub http_status_code: StatusCode,

  /// Response headers
  pub headers: HeaderMap,
}

impl ServerResponse {
  pub fn new(http_status_code: StatusCode, headers: HeaderMap) -> Self {
    Self { http_status_code, headers }
  }
}

/// Failure to interpret a date column
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimestampError {
  /// The value matched none of the accepted formats
  Format(String),
  /// A wall-clock time skipped by a daylight-saving transition in `tz`
  Nonexistent { value: NaiveDateTime, tz: Tz },
}

impl fmt::Display for TimestampError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      TimestampError::Format(value) => {
        write!(f, "error parsing timestamp {:?}: expected one of {:?}", value, TIMESTAMP_FORMATS)
      }
      TimestampError::Nonexistent { value, tz } => {
        write!(f, "timestamp {} does not exist in {}", value, tz.name())
      }
    }
  }
}

impl std::error::Error for TimestampError {}

/// Zone the API reports a function's timestamps in.
///
/// FX and digital currency series trade around the clock and are stamped in
/// UTC. Equity series and technical indicators use US/Eastern.
pub fn market_tz(function: FuncType) -> Tz {
  match function {
    FuncType::FxIntraday
    | FuncType::FxDaily
    | FuncType::FxWeekly
    | FuncType::FxMonthly
    | FuncType::CryptoIntraday
    | FuncType::CryptoDaily
    | FuncType::CryptoWeekly
    | FuncType::CryptoMonthly => Tz::UTC,
    _ => MARKET_TZ,
  }
}

/// Parse an AlphaVantage timestamp in US/Eastern.
///
/// Accepts `YYYY-MM-DD` (midnight) and `YYYY-MM-DD HH:MM:SS`; the first format
/// that matches wins.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Tz>, TimestampError> {
  parse_timestamp_in(value, MARKET_TZ)
}

/// Parse an AlphaVantage timestamp as wall-clock time in `tz`
pub fn parse_timestamp_in(value: &str, tz: Tz) -> Result<DateTime<Tz>, TimestampError> {
  localize(parse_wall_clock(value, &TIMESTAMP_FORMATS)?, tz)
}

/// Pin a wall-clock time to `tz`.
///
/// Times repeated by a fall-back transition resolve to the earlier instant.
/// Times skipped by a spring-forward transition are an error.
pub fn localize(naive: NaiveDateTime, tz: Tz) -> Result<DateTime<Tz>, TimestampError> {
  tz.from_local_datetime(&naive)
    .earliest()
    .ok_or(TimestampError::Nonexistent { value: naive, tz })
}

pub(crate) fn parse_wall_clock(
  value: &str,
  formats: &[&str],
) -> Result<NaiveDateTime, TimestampError> {
  let value = value.trim();

  formats
    .iter()
    .find_map(|format| {
      // Date-only formats never satisfy NaiveDateTime, so try them as dates first
      NaiveDateTime::parse_from_str(value, format).ok().or_else(|| {
        NaiveDate::parse_from_str(value, format).ok().and_then(|d| d.and_hms_opt(0, 0, 0))
      })
    })
    .ok_or_else(|| TimestampError::Format(value.to_string()))
}

/// Records whose date columns still hold raw wall-clock values after
/// deserialization and must be pinned to the endpoint's zone.
pub trait Localize {
  fn localize(&mut self, tz: Tz) -> Result<(), TimestampError>;
}

/// Re-pin a timestamp read by [`market_time::deserialize`] to `tz`
pub fn relocalize(timestamp: &mut DateTime<Tz>, tz: Tz) -> Result<(), TimestampError> {
  *timestamp = localize(timestamp.naive_local(), tz)?;
  Ok(())
}

/// serde adapter for timestamp columns.
///
/// The zone is not known while a row is being read, so `deserialize` keeps
/// the wall-clock value as-is with a UTC offset. Decoders call
/// [`Localize::localize`] afterwards with the zone of the endpoint.
pub mod market_time {
  use super::*;

  pub fn serialize<S>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: Serializer,
  {
    serializer.collect_str(&value.format("%Y-%m-%d %H:%M:%S"))
  }

  pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Tz>, D::Error>
  where
    D: Deserializer<'de>,
  {
    let raw = Cow::<str>::deserialize(deserializer)?;
    let naive = parse_wall_clock(&raw, &TIMESTAMP_FORMATS).map_err(serde::de::Error::custom)?;
    Ok(Tz::UTC.from_utc_datetime(&naive))
  }
}

/// A percentage as reported by the API, e.g. `"-4.2096%"`, stored as `-4.2096`
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Percent(pub f64);

impl Percent {
  pub fn value(self) -> f64 {
    self.0
  }
}

impl FromStr for Percent {
  type Err = std::num::ParseFloatError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.trim().trim_end_matches('%').trim_end().parse().map(Percent)
  }
}

impl fmt::Display for Percent {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}%", self.0)
  }
}

impl From<Percent> for f64 {
  fn from(p: Percent) -> Self {
    p.0
  }
}

impl Serialize for Percent {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64(self.0)
  }
}

impl<'de> Deserialize<'de> for Percent {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    let raw = Cow::<str>::deserialize(deserializer)?;
    raw.parse().map_err(|e| serde::de::Error::custom(format!("invalid percentage {raw:?}: {e}")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Timelike;

  #[test]
  fn test_parse_date_only_is_midnight_eastern() {
    let ts = parse_timestamp("2020-03-25").unwrap();
    let expected = MARKET_TZ.with_ymd_and_hms(2020, 3, 25, 0, 0, 0).unwrap();
    assert_eq!(ts, expected);
    assert_eq!(ts.hour(), 0);
  }

  #[test]
  fn test_parse_date_time() {
    let ts = parse_timestamp("2020-03-25 16:00:00").unwrap();
    assert_eq!(ts, MARKET_TZ.with_ymd_and_hms(2020, 3, 25, 16, 0, 0).unwrap());
  }

  #[test]
  fn test_parse_rejects_other_formats() {
    assert!(parse_timestamp("03/25/2020").is_err());
    assert!(parse_timestamp("2020-03-25T16:00:00").is_err());
    assert!(parse_timestamp("").is_err());
    assert!(matches!(parse_timestamp("03/25/2020"), Err(TimestampError::Format(_))));
  }

  #[test]
  fn test_fx_and_crypto_are_utc() {
    assert_eq!(market_tz(FuncType::CryptoIntraday), Tz::UTC);
    assert_eq!(market_tz(FuncType::FxDaily), Tz::UTC);
    assert_eq!(market_tz(FuncType::TimeSeriesIntraday), MARKET_TZ);
    assert_eq!(market_tz(FuncType::Indicator(av_core::TechnicalIndicator::Sma)), MARKET_TZ);
  }

  #[test]
  fn test_spring_forward_gap_exists_in_utc() {
    let ts = parse_timestamp_in("2024-03-10 02:30:00", Tz::UTC).unwrap();
    assert_eq!(ts.to_rfc3339(), "2024-03-10T02:30:00+00:00");

    let err = parse_timestamp("2024-03-10 02:30:00").unwrap_err();
    assert!(matches!(err, TimestampError::Nonexistent { tz, .. } if tz == MARKET_TZ));
    assert_eq!(err.to_string(), "timestamp 2024-03-10 02:30:00 does not exist in US/Eastern");
  }

  #[test]
  fn test_fall_back_hour_stays_distinct_in_utc() {
    let first = parse_timestamp_in("2024-11-03 01:30:00", Tz::UTC).unwrap();
    let second = parse_timestamp_in("2024-11-03 02:30:00", Tz::UTC).unwrap();
    assert_eq!((second - first).num_minutes(), 60);

    // Eastern repeats 01:30 and takes the earlier (EDT) instant
    let eastern = parse_timestamp("2024-11-03 01:30:00").unwrap();
    assert_eq!(eastern.to_rfc3339(), "2024-11-03T01:30:00-04:00");
  }

  #[test]
  fn test_relocalize_keeps_wall_clock() {
    let mut ts = Tz::UTC.with_ymd_and_hms(2020, 3, 25, 16, 0, 0).unwrap();
    relocalize(&mut ts, MARKET_TZ).unwrap();
    assert_eq!(ts, MARKET_TZ.with_ymd_and_hms(2020, 3, 25, 16, 0, 0).unwrap());
  }

  #[test]
  fn test_percent_strips_trailing_sign() {
    assert_eq!("-4.2096%".parse::<Percent>().unwrap(), Percent(-4.2096));
    assert_eq!("0.99".parse::<Percent>().unwrap(), Percent(0.99));
    assert!("abc%".parse::<Percent>().is_err());
  }

  #[test]
  fn test_percent_deserializes_from_json_string() {
    let p: Percent = serde_json::from_str("\"1.25%\"").unwrap();
    assert_eq!(p.value(), 1.25);
  }

  #[test]
  fn test_server_response_default_is_ok() {
    let sr = ServerResponse::default();
    assert_eq!(sr.http_status_code, StatusCode::OK);
    assert!(sr.headers.is_empty());
  }
}
