pub mod crypto;
pub mod forex;
pub mod sector;
pub mod technical_indicators;
pub mod time_series;

use crate::call::{Call, Endpoint};
use crate::client::AlphaVantageClient;
use av_core::FuncType;

/// Base trait for endpoint implementations
///
/// Every façade holds a clone of the shared client and hands out calls built
/// against it.
pub trait EndpointBase {
  /// Get a reference to the client the façade was created from
  fn client(&self) -> &AlphaVantageClient;

  /// Start a call for `function` with `datatype` already set
  fn call<E: Endpoint>(&self, function: FuncType) -> Call<E> {
    Call::new(self.client(), function)
  }
}

/// Macro to implement the EndpointBase trait for endpoint structs
macro_rules! impl_endpoint_base {
  ($struct_name:ident) => {
    impl $struct_name {
      /// Create a new endpoints instance bound to `client`
      pub fn new(client: AlphaVantageClient) -> Self {
        Self { client }
      }
    }

    impl EndpointBase for $struct_name {
      fn client(&self) -> &AlphaVantageClient {
        &self.client
      }
    }
  };
}

pub(crate) use impl_endpoint_base;

#[cfg(test)]
pub(crate) mod test_support {
  use super::*;
  use av_core::Config;

  /// Client whose requests never leave the process
  pub(crate) fn offline_client() -> AlphaVantageClient {
    let transport = crate::transport::testing::StaticTransport::new(200, "");
    AlphaVantageClient::with_transport(Config::default_with_key("key".to_string()), transport)
      .unwrap()
  }

  /// `Call::url` query string, for comparing against expected parameter lists
  pub(crate) fn query<E: Endpoint>(call: &Call<E>) -> String {
    call.url().query().unwrap_or_default().to_string()
  }
}
