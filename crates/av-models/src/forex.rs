//! Foreign exchange (forex) data models

use crate::common::{Localize, ServerResponse, TimestampError, market_time, relocalize};
use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// One FX bar. FX CSV carries no volume column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FxBar {
    /// Bar timestamp
    #[serde(with = "market_time")]
    pub timestamp: DateTime<Tz>,

    /// Opening rate
    pub open: f64,

    /// Highest rate
    pub high: f64,

    /// Lowest rate
    pub low: f64,

    /// Closing rate
    pub close: f64,
}

impl Localize for FxBar {
    fn localize(&mut self, tz: Tz) -> Result<(), TimestampError> {
        relocalize(&mut self.timestamp, tz)
    }
}

/// Decoded FX series for one currency pair
#[derive(Debug, Clone, PartialEq)]
pub struct FxSeriesList {
    /// HTTP status and headers
    pub server_response: ServerResponse,

    /// Bars in API order (most recent first)
    pub bars: Vec<FxBar>,
}

impl FxSeriesList {
    /// Get the latest data point
    pub fn latest(&self) -> Option<&FxBar> {
        self.bars.first()
    }

    /// Get the number of data points
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Check if the series is empty
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Standard deviation of close-to-close returns, in percent
    pub fn volatility(&self) -> f64 {
        if self.bars.len() < 2 {
            return 0.0;
        }

        // bars are newest first, so windows()[0] is the later bar
        let returns: Vec<f64> =
            self.bars.windows(2).map(|w| (w[0].close / w[1].close - 1.0) * 100.0).collect();

        let mean = returns.iter().sum::<f64>() / returns.len() as f64;
        let variance =
            returns.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / returns.len() as f64;

        variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MARKET_TZ;
    use av_core::test_utils::{assert_approx_eq, assert_approx_zero};
    use chrono::TimeZone;

    fn bar(day: u32, close: f64) -> FxBar {
        FxBar {
            timestamp: MARKET_TZ.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
        }
    }

    #[test]
    fn test_volatility_constant_series_is_zero() {
        let list = FxSeriesList {
            server_response: ServerResponse::default(),
            bars: vec![bar(3, 1.1), bar(2, 1.1), bar(1, 1.1)],
        };
        assert_approx_zero(list.volatility());
    }

    #[test]
    fn test_volatility_alternating_returns() {
        // +10% then -10%: mean 0, stddev 10
        let list = FxSeriesList {
            server_response: ServerResponse::default(),
            bars: vec![bar(3, 0.99), bar(2, 1.1), bar(1, 1.0)],
        };
        assert_approx_eq(list.volatility(), 10.0, 1e-9);
    }

    #[test]
    fn test_short_series() {
        let list = FxSeriesList { server_response: ServerResponse::default(), bars: vec![bar(1, 1.0)] };
        assert_approx_zero(list.volatility());
        assert_eq!(list.len(), 1);
    }
}
