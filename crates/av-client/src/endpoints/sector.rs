//! Sector performance endpoint
//!
//! Realtime and historical S&P 500 sector performance. This is the one
//! function the API only serves as JSON, so no `datatype` is sent.

use super::{EndpointBase, impl_endpoint_base};
use crate::call::{Call, SectorRanks};
use crate::client::AlphaVantageClient;
use av_core::FuncType;

/// Sector performance endpoint
#[derive(Debug, Clone)]
pub struct SectorPerformanceEndpoints {
  client: AlphaVantageClient,
}

impl_endpoint_base!(SectorPerformanceEndpoints);

impl SectorPerformanceEndpoints {
  /// Sector performance across every rank window (`Rank A` realtime through `Rank J` 10 year)
  pub fn sectors(&self) -> Call<SectorRanks> {
    self.call(FuncType::Sector)
  }
}

#[cfg(test)]
mod tests {
  use super::super::test_support::{offline_client, query};

  #[test]
  fn test_sector_url_has_no_datatype() {
    assert_eq!(query(&offline_client().sector_performance().sectors()), "function=SECTOR");
  }
}
