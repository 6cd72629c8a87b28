//! Time series, quote and symbol search records for US equities

use crate::common::{Localize, Percent, ServerResponse, TimestampError, market_time, relocalize};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One bar of price/volume data.
///
/// The adjusted fields are only present on the `*_ADJUSTED` endpoints and stay
/// at `0.0` everywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeries {
    /// Bar timestamp, in the zone the endpoint reports
    #[serde(with = "market_time")]
    pub timestamp: DateTime<Tz>,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Trading volume
    pub volume: f64,

    /// Adjusted closing price
    #[serde(default)]
    pub adjusted_close: f64,

    /// Dividend amount
    #[serde(default)]
    pub dividend_amount: f64,

    /// Split coefficient
    #[serde(default)]
    pub split_coefficient: f64,
}

impl Localize for TimeSeries {
    fn localize(&mut self, tz: Tz) -> Result<(), TimestampError> {
        relocalize(&mut self.timestamp, tz)
    }
}

impl TimeSeries {
    /// Close minus open
    pub fn change(&self) -> f64 {
        self.close - self.open
    }

    /// High minus low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// Decoded time series with the response it came from
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeriesList {
    /// HTTP status and headers
    pub server_response: ServerResponse,

    /// Bars in the order the API returned them (most recent first)
    pub time_series: Vec<TimeSeries>,
}

impl TimeSeriesList {
    /// Get the latest data point
    pub fn latest(&self) -> Option<&TimeSeries> {
        self.time_series.first()
    }

    /// Get the number of data points
    pub fn len(&self) -> usize {
        self.time_series.len()
    }

    /// Check if the time series is empty
    pub fn is_empty(&self) -> bool {
        self.time_series.is_empty()
    }

    /// Calculate average volume over the time series
    pub fn average_volume(&self) -> f64 {
        if self.time_series.is_empty() {
            return 0.0;
        }
        self.time_series.iter().map(|bar| bar.volume).sum::<f64>() / self.time_series.len() as f64
    }

    /// Calculate average closing price
    pub fn average_close(&self) -> f64 {
        if self.time_series.is_empty() {
            return 0.0;
        }
        self.time_series.iter().map(|bar| bar.close).sum::<f64>() / self.time_series.len() as f64
    }
}

/// Latest price snapshot for a symbol (GLOBAL_QUOTE)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// HTTP status and headers
    #[serde(skip)]
    pub server_response: ServerResponse,

    /// Symbol
    pub symbol: String,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Current price
    pub price: f64,

    /// Trading volume
    pub volume: f64,

    /// Latest trading day
    #[serde(with = "market_time")]
    pub latest_day: DateTime<Tz>,

    /// Previous close
    pub previous_close: f64,

    /// Price change
    pub change: f64,

    /// Change percentage
    pub change_percent: Percent,
}

impl Localize for Quote {
    fn localize(&mut self, tz: Tz) -> Result<(), TimestampError> {
        relocalize(&mut self.latest_day, tz)
    }
}

/// One match returned by SYMBOL_SEARCH
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub region: String,
    pub market_open: String,
    pub market_close: String,
    pub timezone: String,
    pub currency: String,
    /// Match confidence in `[0, 1]`
    pub match_score: f64,
}

// No date columns
impl Localize for SearchResult {
    fn localize(&mut self, _tz: Tz) -> Result<(), TimestampError> {
        Ok(())
    }
}

/// Search matches in server rank order
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResultList {
    /// HTTP status and headers
    pub server_response: ServerResponse,

    pub search_results: Vec<SearchResult>,
}

impl SearchResultList {
    /// Best-ranked match, if any
    pub fn best_match(&self) -> Option<&SearchResult> {
        self.search_results.first()
    }

    /// Matches scoring at least `min_score`
    pub fn above(&self, min_score: f64) -> impl Iterator<Item = &SearchResult> {
        self.search_results.iter().filter(move |r| r.match_score >= min_score)
    }
}
