//! Technical indicator endpoints
//!
//! Every indicator shares one request shape: `function`, `symbol`,
//! `interval`, plus `time_period` and `series_type` where the indicator
//! accepts them. The response columns depend on the indicator, so rows are
//! decoded into name/value maps.

use super::{EndpointBase, impl_endpoint_base};
use crate::call::{Call, IndicatorValues};
use crate::client::AlphaVantageClient;
use av_core::{FuncType, IndicatorInterval, SeriesType, TechnicalIndicator};

/// Technical indicator endpoints
#[derive(Debug, Clone)]
pub struct TechnicalIndicatorEndpoints {
  client: AlphaVantageClient,
}

impl_endpoint_base!(TechnicalIndicatorEndpoints);

impl TechnicalIndicatorEndpoints {
  /// Any indicator, with the remaining options set on the returned call
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # use av_client::AlphaVantageClient;
  /// # use av_core::{IndicatorInterval, TechnicalIndicator};
  /// # async fn run(client: AlphaVantageClient) -> av_core::Result<()> {
  /// let adx = client
  ///     .technical_indicators()
  ///     .indicator(TechnicalIndicator::Adx, "IBM", IndicatorInterval::Daily)
  ///     .time_period(14)
  ///     .send()
  ///     .await?;
  /// for (ts, value) in adx.column("ADX").take(5) {
  ///     println!("{ts}: {value}");
  /// }
  /// # Ok(())
  /// # }
  /// ```
  pub fn indicator(
    &self,
    indicator: TechnicalIndicator,
    symbol: &str,
    interval: impl Into<IndicatorInterval>,
  ) -> Call<IndicatorValues> {
    self
      .call(FuncType::Indicator(indicator))
      .param("symbol", symbol)
      .param("interval", interval.into())
  }

  /// Simple moving average
  pub fn sma(
    &self,
    symbol: &str,
    interval: impl Into<IndicatorInterval>,
    time_period: u32,
    series_type: SeriesType,
  ) -> Call<IndicatorValues> {
    self
      .indicator(TechnicalIndicator::Sma, symbol, interval)
      .time_period(time_period)
      .series_type(series_type)
  }

  /// Exponential moving average
  pub fn ema(
    &self,
    symbol: &str,
    interval: impl Into<IndicatorInterval>,
    time_period: u32,
    series_type: SeriesType,
  ) -> Call<IndicatorValues> {
    self
      .indicator(TechnicalIndicator::Ema, symbol, interval)
      .time_period(time_period)
      .series_type(series_type)
  }

  /// Relative strength index
  pub fn rsi(
    &self,
    symbol: &str,
    interval: impl Into<IndicatorInterval>,
    time_period: u32,
    series_type: SeriesType,
  ) -> Call<IndicatorValues> {
    self
      .indicator(TechnicalIndicator::Rsi, symbol, interval)
      .time_period(time_period)
      .series_type(series_type)
  }

  /// MACD with the server's default fast/slow/signal periods.
  /// Rows carry `MACD`, `MACD_Hist` and `MACD_Signal`.
  pub fn macd(
    &self,
    symbol: &str,
    interval: impl Into<IndicatorInterval>,
    series_type: SeriesType,
  ) -> Call<IndicatorValues> {
    self.indicator(TechnicalIndicator::Macd, symbol, interval).series_type(series_type)
  }
}

#[cfg(test)]
mod tests {
  use super::super::test_support::{offline_client, query};
  use av_core::{IndicatorInterval, Interval, SeriesType, TechnicalIndicator};

  #[test]
  fn test_sma_url() {
    let call = offline_client().technical_indicators().sma("IBM", IndicatorInterval::Weekly, 10, SeriesType::Open);
    assert_eq!(
      query(&call),
      "datatype=csv&function=SMA&interval=weekly&series_type=open&symbol=IBM&time_period=10"
    );
  }

  #[test]
  fn test_intraday_interval_converts() {
    let call = offline_client().technical_indicators().rsi("IBM", Interval::Min15, 14, SeriesType::Close);
    assert_eq!(
      query(&call),
      "datatype=csv&function=RSI&interval=15min&series_type=close&symbol=IBM&time_period=14"
    );
  }

  #[test]
  fn test_macd_has_no_time_period() {
    let call = offline_client()
      .technical_indicators()
      .macd("IBM", IndicatorInterval::Daily, SeriesType::Close)
      .time_period(9);
    assert_eq!(query(&call), "datatype=csv&function=MACD&interval=daily&series_type=close&symbol=IBM");
  }

  #[test]
  fn test_unsupported_series_type_dropped() {
    let call = offline_client()
      .technical_indicators()
      .indicator(TechnicalIndicator::Adx, "IBM", IndicatorInterval::Monthly)
      .time_period(14)
      .series_type(SeriesType::High);
    assert_eq!(query(&call), "datatype=csv&function=ADX&interval=monthly&symbol=IBM&time_period=14");
  }

  #[tokio::test]
  async fn test_indicator_send_decodes_columns() {
    use crate::transport::testing::StaticTransport;
    use crate::AlphaVantageClient;
    use av_core::Config;

    let body = "time,EMA\n2024-01-05,150.1200\n2024-01-04,149.8800";
    let client = AlphaVantageClient::with_transport(
      Config::default_with_key("key".to_string()),
      StaticTransport::new(200, body),
    )
    .unwrap();

    let series = client.technical_indicators().ema("IBM", IndicatorInterval::Daily, 20, SeriesType::Close).send().await.unwrap();

    assert_eq!(series.indicator, "EMA");
    assert_eq!(series.len(), 2);
    assert!((series.latest().unwrap().get("EMA").unwrap() - 150.12).abs() < 1e-9);
  }
}
