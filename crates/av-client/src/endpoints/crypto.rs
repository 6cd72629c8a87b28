//! Cryptocurrency endpoints
//!
//! Digital currency series decode into the same [`av_models::TimeSeriesList`]
//! as equities; the `market` argument picks the quote currency.

use super::{EndpointBase, impl_endpoint_base};
use crate::call::{Call, Series, SizedSeries};
use crate::client::AlphaVantageClient;
use av_core::{FuncType, Interval};

/// Cryptocurrency endpoints for digital currency data
#[derive(Debug, Clone)]
pub struct CryptoEndpoints {
  client: AlphaVantageClient,
}

impl_endpoint_base!(CryptoEndpoints);

impl CryptoEndpoints {
  /// Get intraday cryptocurrency data
  ///
  /// # Arguments
  ///
  /// * `symbol` - The cryptocurrency symbol (e.g., "BTC", "ETH")
  /// * `market` - The exchange market (e.g., "USD", "EUR")
  /// * `interval` - Bar width
  ///
  /// # Examples
  ///
  /// ```rust,no_run
  /// # use av_client::AlphaVantageClient;
  /// # use av_core::Interval;
  /// # async fn run(client: AlphaVantageClient) -> av_core::Result<()> {
  /// let btc = client.crypto().intraday("BTC", "USD", Interval::Min5).send().await?;
  /// if let Some(bar) = btc.latest() {
  ///     println!("BTC closed at {} on {}", bar.close, bar.timestamp);
  /// }
  /// # Ok(())
  /// # }
  /// ```
  pub fn intraday(&self, symbol: &str, market: &str, interval: Interval) -> Call<SizedSeries> {
    self
      .call(FuncType::CryptoIntraday)
      .param("symbol", symbol)
      .param("market", market)
      .param("interval", interval)
  }

  /// Get daily cryptocurrency data
  pub fn daily(&self, symbol: &str, market: &str) -> Call<Series> {
    self.call(FuncType::CryptoDaily).param("symbol", symbol).param("market", market)
  }

  /// Get weekly cryptocurrency data
  pub fn weekly(&self, symbol: &str, market: &str) -> Call<Series> {
    self.call(FuncType::CryptoWeekly).param("symbol", symbol).param("market", market)
  }

  /// Get monthly cryptocurrency data
  pub fn monthly(&self, symbol: &str, market: &str) -> Call<Series> {
    self.call(FuncType::CryptoMonthly).param("symbol", symbol).param("market", market)
  }
}

#[cfg(test)]
mod tests {
  use super::super::test_support::{offline_client, query};
  use av_core::{Interval, OutputSize};

  #[test]
  fn test_intraday_url() {
    let call = offline_client().crypto().intraday("ETH", "USD", Interval::Min1).output_size(OutputSize::Full);
    assert_eq!(
      query(&call),
      "datatype=csv&function=CRYPTO_INTRADAY&interval=1min&market=USD&outputsize=full&symbol=ETH"
    );
  }

  #[test]
  fn test_digital_currency_urls() {
    let crypto = offline_client().crypto();
    assert_eq!(
      query(&crypto.daily("BTC", "EUR")),
      "datatype=csv&function=DIGITAL_CURRENCY_DAILY&market=EUR&symbol=BTC"
    );
    assert_eq!(
      query(&crypto.weekly("BTC", "EUR")),
      "datatype=csv&function=DIGITAL_CURRENCY_WEEKLY&market=EUR&symbol=BTC"
    );
    assert_eq!(
      query(&crypto.monthly("BTC", "EUR")),
      "datatype=csv&function=DIGITAL_CURRENCY_MONTHLY&market=EUR&symbol=BTC"
    );
  }
}
