//! Technical indicator series

use crate::common::{ServerResponse, market_time};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;
use std::collections::BTreeMap;

/// One indicator row: its timestamp and every value column keyed by header
/// (`SMA`, or `MACD`/`MACD_Hist`/`MACD_Signal`, ...)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPoint {
  #[serde(serialize_with = "market_time::serialize")]
  pub timestamp: DateTime<Tz>,
  pub values: BTreeMap<String, f64>,
}

impl IndicatorPoint {
  /// Value of a single column
  pub fn get(&self, column: &str) -> Option<f64> {
    self.values.get(column).copied()
  }
}

/// Decoded indicator series
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
  /// HTTP status and headers
  pub server_response: ServerResponse,

  /// Indicator function name, e.g. `SMA`
  pub indicator: String,

  /// Rows in API order (most recent first)
  pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
  pub fn latest(&self) -> Option<&IndicatorPoint> {
    self.points.first()
  }

  pub fn len(&self) -> usize {
    self.points.len()
  }

  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// `(timestamp, value)` pairs for one column, skipping rows that lack it
  pub fn column<'a>(&'a self, name: &'a str) -> impl Iterator<Item = (DateTime<Tz>, f64)> + 'a {
    self.points.iter().filter_map(move |p| p.get(name).map(|v| (p.timestamp, v)))
  }
}
