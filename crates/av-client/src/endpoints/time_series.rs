//! Time series data endpoints for stock prices
//!
//! This module provides access to AlphaVantage's equity data including:
//! - Intraday prices (1min, 5min, 15min, 30min, 60min)
//! - Daily prices with full/compact output
//! - Weekly and monthly prices
//! - Adjusted prices with dividends and splits
//! - The latest quote for a symbol
//! - Symbol search

use super::{EndpointBase, impl_endpoint_base};
use crate::call::{Call, IntradaySeries, QuoteLookup, Series, SizedSeries, SymbolSearch};
use crate::client::AlphaVantageClient;
use av_core::{FuncType, Interval};

/// Time series endpoints for historical and intraday price data
#[derive(Debug, Clone)]
pub struct TimeSeriesEndpoints {
  client: AlphaVantageClient,
}

impl_endpoint_base!(TimeSeriesEndpoints);

impl TimeSeriesEndpoints {
  /// Get intraday time series data
  ///
  /// # Arguments
  ///
  /// * `symbol` - The stock symbol (e.g., "AAPL", "MSFT")
  /// * `interval` - Bar width
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # use av_client::AlphaVantageClient;
  /// # use av_core::{Interval, OutputSize};
  /// # async fn run(client: AlphaVantageClient) -> av_core::Result<()> {
  /// // Full history of 5-minute bars, regular session only
  /// let data = client
  ///     .time_series()
  ///     .intraday("AAPL", Interval::Min5)
  ///     .output_size(OutputSize::Full)
  ///     .extended_hours(false)
  ///     .send()
  ///     .await?;
  /// # Ok(())
  /// # }
  /// ```
  pub fn intraday(&self, symbol: &str, interval: Interval) -> Call<IntradaySeries> {
    self.call(FuncType::TimeSeriesIntraday).param("symbol", symbol).param("interval", interval)
  }

  /// Get daily time series data
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # use av_client::AlphaVantageClient;
  /// # async fn run(client: AlphaVantageClient) -> av_core::Result<()> {
  /// // Latest 100 days
  /// let data = client.time_series().daily("AAPL").send().await?;
  /// println!("{:?}", data.latest());
  /// # Ok(())
  /// # }
  /// ```
  pub fn daily(&self, symbol: &str) -> Call<SizedSeries> {
    self.call(FuncType::TimeSeriesDaily).param("symbol", symbol)
  }

  /// Get daily adjusted time series data (includes dividends and splits)
  pub fn daily_adjusted(&self, symbol: &str) -> Call<SizedSeries> {
    self.call(FuncType::TimeSeriesDailyAdjusted).param("symbol", symbol)
  }

  /// Get weekly time series data
  pub fn weekly(&self, symbol: &str) -> Call<Series> {
    self.call(FuncType::TimeSeriesWeekly).param("symbol", symbol)
  }

  /// Get weekly adjusted time series data
  pub fn weekly_adjusted(&self, symbol: &str) -> Call<Series> {
    self.call(FuncType::TimeSeriesWeeklyAdjusted).param("symbol", symbol)
  }

  /// Get monthly time series data
  pub fn monthly(&self, symbol: &str) -> Call<Series> {
    self.call(FuncType::TimeSeriesMonthly).param("symbol", symbol)
  }

  /// Get monthly adjusted time series data
  pub fn monthly_adjusted(&self, symbol: &str) -> Call<Series> {
    self.call(FuncType::TimeSeriesMonthlyAdjusted).param("symbol", symbol)
  }

  /// Latest price and volume for one symbol
  ///
  /// Sending fails with [`av_core::Error::NotFound`] when the server knows no
  /// such symbol.
  pub fn quote(&self, symbol: &str) -> Call<QuoteLookup> {
    self.call(FuncType::GlobalQuote).param("symbol", symbol)
  }

  /// Best-matching symbols for free-text `keywords`
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # use av_client::AlphaVantageClient;
  /// # async fn run(client: AlphaVantageClient) -> av_core::Result<()> {
  /// let matches = client.time_series().search("boeing").send().await?;
  /// if let Some(best) = matches.best_match() {
  ///     println!("{} ({})", best.symbol, best.name);
  /// }
  /// # Ok(())
  /// # }
  /// ```
  pub fn search(&self, keywords: &str) -> Call<SymbolSearch> {
    self.call(FuncType::SymbolSearch).param("keywords", keywords)
  }
}
