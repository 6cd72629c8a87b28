//! # av-core
//!
//! Configuration, error types and API function identifiers shared by the
//! av-* crates.

pub mod config;
pub mod error;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::Config;
pub use error::{ApiError, BoxError, Error, Result};
pub use reqwest::StatusCode;
pub use reqwest::header::HeaderMap;
pub use types::{DataType, IndicatorInterval, Interval, OutputSize, SeriesType};

/// The AlphaVantage API functions this client knows how to call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FuncType {
  // Time Series functions
  TimeSeriesIntraday,
  TimeSeriesDaily,
  TimeSeriesDailyAdjusted,
  TimeSeriesWeekly,
  TimeSeriesWeeklyAdjusted,
  TimeSeriesMonthly,
  TimeSeriesMonthlyAdjusted,
  GlobalQuote,
  SymbolSearch,

  // Forex functions
  FxIntraday,
  FxDaily,
  FxWeekly,
  FxMonthly,

  // Crypto functions
  CryptoIntraday,
  CryptoDaily,
  CryptoWeekly,
  CryptoMonthly,

  // Technical indicators
  Indicator(TechnicalIndicator),

  // Sector performance
  Sector,
}

impl std::fmt::Display for FuncType {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      // Time Series functions
      FuncType::TimeSeriesIntraday => write!(f, "TIME_SERIES_INTRADAY"),
      FuncType::TimeSeriesDaily => write!(f, "TIME_SERIES_DAILY"),
      FuncType::TimeSeriesDailyAdjusted => write!(f, "TIME_SERIES_DAILY_ADJUSTED"),
      FuncType::TimeSeriesWeekly => write!(f, "TIME_SERIES_WEEKLY"),
      FuncType::TimeSeriesWeeklyAdjusted => write!(f, "TIME_SERIES_WEEKLY_ADJUSTED"),
      FuncType::TimeSeriesMonthly => write!(f, "TIME_SERIES_MONTHLY"),
      FuncType::TimeSeriesMonthlyAdjusted => write!(f, "TIME_SERIES_MONTHLY_ADJUSTED"),
      FuncType::GlobalQuote => write!(f, "GLOBAL_QUOTE"),
      FuncType::SymbolSearch => write!(f, "SYMBOL_SEARCH"),

      // Forex functions
      FuncType::FxIntraday => write!(f, "FX_INTRADAY"),
      FuncType::FxDaily => write!(f, "FX_DAILY"),
      FuncType::FxWeekly => write!(f, "FX_WEEKLY"),
      FuncType::FxMonthly => write!(f, "FX_MONTHLY"),

      // Crypto functions
      FuncType::CryptoIntraday => write!(f, "CRYPTO_INTRADAY"),
      FuncType::CryptoDaily => write!(f, "DIGITAL_CURRENCY_DAILY"),
      FuncType::CryptoWeekly => write!(f, "DIGITAL_CURRENCY_WEEKLY"),
      FuncType::CryptoMonthly => write!(f, "DIGITAL_CURRENCY_MONTHLY"),

      FuncType::Indicator(indicator) => write!(f, "{indicator}"),

      FuncType::Sector => write!(f, "SECTOR"),
    }
  }
}

/// Technical indicators that return CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TechnicalIndicator {
  Sma,
  Ema,
  Wma,
  Dema,
  Tema,
  Vwap,
  Macd,
  Stoch,
  Rsi,
  Adx,
  Cci,
  Aroon,
  Bbands,
  Ad,
  Obv,
  Atr,
}

impl TechnicalIndicator {
  /// Whether the endpoint takes `time_period`
  pub fn takes_time_period(&self) -> bool {
    !matches!(
      self,
      TechnicalIndicator::Vwap
        | TechnicalIndicator::Macd
        | TechnicalIndicator::Stoch
        | TechnicalIndicator::Ad
        | TechnicalIndicator::Obv
    )
  }

  /// Whether the endpoint takes `series_type`
  pub fn takes_series_type(&self) -> bool {
    matches!(
      self,
      TechnicalIndicator::Sma
        | TechnicalIndicator::Ema
        | TechnicalIndicator::Wma
        | TechnicalIndicator::Dema
        | TechnicalIndicator::Tema
        | TechnicalIndicator::Macd
        | TechnicalIndicator::Rsi
        | TechnicalIndicator::Bbands
    )
  }
}

impl std::fmt::Display for TechnicalIndicator {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    let name = match self {
      TechnicalIndicator::Sma => "SMA",
      TechnicalIndicator::Ema => "EMA",
      TechnicalIndicator::Wma => "WMA",
      TechnicalIndicator::Dema => "DEMA",
      TechnicalIndicator::Tema => "TEMA",
      TechnicalIndicator::Vwap => "VWAP",
      TechnicalIndicator::Macd => "MACD",
      TechnicalIndicator::Stoch => "STOCH",
      TechnicalIndicator::Rsi => "RSI",
      TechnicalIndicator::Adx => "ADX",
      TechnicalIndicator::Cci => "CCI",
      TechnicalIndicator::Aroon => "AROON",
      TechnicalIndicator::Bbands => "BBANDS",
      TechnicalIndicator::Ad => "AD",
      TechnicalIndicator::Obv => "OBV",
      TechnicalIndicator::Atr => "ATR",
    };
    f.write_str(name)
  }
}

/// Base URL for AlphaVantage API
pub const ALPHA_VANTAGE_BASE_URL: &str = "https://www.alphavantage.co/query";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
