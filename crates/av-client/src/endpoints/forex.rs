//! Foreign exchange (forex) endpoints
//!
//! FX series carry open/high/low/close per bar but no volume.

use super::{EndpointBase, impl_endpoint_base};
use crate::call::{Call, FxSeries, SizedFxSeries};
use crate::client::AlphaVantageClient;
use av_core::{FuncType, Interval};

/// Forex endpoints for currency pair time series
#[derive(Debug, Clone)]
pub struct ForexEndpoints {
  client: AlphaVantageClient,
}

impl_endpoint_base!(ForexEndpoints);

impl ForexEndpoints {
  fn pair<E: crate::call::Endpoint>(&self, function: FuncType, from: &str, to: &str) -> Call<E> {
    self.call(function).param("from_symbol", from).param("to_symbol", to)
  }

  /// Get intraday forex data
  ///
  /// # Arguments
  ///
  /// * `from_symbol` - Source currency (e.g., "EUR")
  /// * `to_symbol` - Target currency (e.g., "USD")
  /// * `interval` - Bar width
  pub fn intraday(&self, from_symbol: &str, to_symbol: &str, interval: Interval) -> Call<SizedFxSeries> {
    self.pair(FuncType::FxIntraday, from_symbol, to_symbol).param("interval", interval)
  }

  /// Get daily forex data
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # use av_client::AlphaVantageClient;
  /// # use av_core::OutputSize;
  /// # async fn run(client: AlphaVantageClient) -> av_core::Result<()> {
  /// let eur_usd = client.forex().daily("EUR", "USD").output_size(OutputSize::Full).send().await?;
  /// println!("{} daily bars, volatility {:.4}", eur_usd.len(), eur_usd.volatility());
  /// # Ok(())
  /// # }
  /// ```
  pub fn daily(&self, from_symbol: &str, to_symbol: &str) -> Call<SizedFxSeries> {
    self.pair(FuncType::FxDaily, from_symbol, to_symbol)
  }

  /// Get weekly forex data
  pub fn weekly(&self, from_symbol: &str, to_symbol: &str) -> Call<FxSeries> {
    self.pair(FuncType::FxWeekly, from_symbol, to_symbol)
  }

  /// Get monthly forex data
  pub fn monthly(&self, from_symbol: &str, to_symbol: &str) -> Call<FxSeries> {
    self.pair(FuncType::FxMonthly, from_symbol, to_symbol)
  }
}

#[cfg(test)]
mod tests {
  use super::super::test_support::{offline_client, query};
  use av_core::{Interval, OutputSize};

  #[test]
  fn test_intraday_url() {
    let call = offline_client().forex().intraday("EUR", "USD", Interval::Min15);
    assert_eq!(
      query(&call),
      "datatype=csv&from_symbol=EUR&function=FX_INTRADAY&interval=15min&to_symbol=USD"
    );
  }

  #[test]
  fn test_daily_with_output_size() {
    let call = offline_client().forex().daily("EUR", "USD").output_size(OutputSize::Full);
    assert_eq!(
      query(&call),
      "datatype=csv&from_symbol=EUR&function=FX_DAILY&outputsize=full&to_symbol=USD"
    );
  }

  #[test]
  fn test_weekly_and_monthly_urls() {
    let fx = offline_client().forex();
    assert_eq!(query(&fx.weekly("GBP", "JPY")), "datatype=csv&from_symbol=GBP&function=FX_WEEKLY&to_symbol=JPY");
    assert_eq!(
      query(&fx.monthly("GBP", "JPY")),
      "datatype=csv&from_symbol=GBP&function=FX_MONTHLY&to_symbol=JPY"
    );
  }
}
