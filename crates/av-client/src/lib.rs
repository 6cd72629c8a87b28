//! # av-client
//!
//! An AlphaVantage API client that asks for CSV and hands back typed records.
//!
//! ## Features
//!
//! - **Call builders**: every endpoint method returns a [`Call`] that can be
//!   inspected and adjusted before it is sent
//! - **Async/Await**: built on tokio and reqwest
//! - **Type Safe**: options only exist on the endpoints that accept them, and
//!   responses decode into av-models records
//! - **Configurable**: environment-based configuration via av-core
//! - **Pluggable transport**: the API key is injected by a transport
//!   decorator, so tests can swap the network out
//!
//! ## Usage
//!
//! ```rust,no_run
//! use av_client::AlphaVantageClient;
//! use av_core::{Config, OutputSize};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = AlphaVantageClient::new(config)?;
//!
//!     // Get the full daily history for a symbol
//!     let data = client.time_series().daily("AAPL").output_size(OutputSize::Full).send().await?;
//!     println!("Latest close price: {:?}", data.latest().map(|bar| bar.close));
//!
//!     // Look up a symbol
//!     let matches = client.time_series().search("tesco").send().await?;
//!     println!("Best match: {:?}", matches.best_match().map(|m| &m.symbol));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! All methods return `Result<T, av_core::Error>` for consistent error handling
//! across the entire av-* ecosystem. AlphaVantage often reports failures as
//! `200 OK` with a JSON message in place of the CSV; those surface as
//! [`Error::Api`] just like non-2xx responses.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod call;
/// The client handle and its configuration
pub mod client;
/// Per-API-family façades that build calls
pub mod endpoints;
pub mod response;
pub mod transport;

// Re-export the main client and common types
pub use av_core::{Config, Error, Result};
pub use av_models::*;
pub use call::Call;
pub use client::AlphaVantageClient;
pub use transport::{ApiKeyTransport, RawResponse, ReqwestTransport, RoundTrip};

// Re-export endpoint modules for direct access if needed
pub use endpoints::{
  crypto::CryptoEndpoints, forex::ForexEndpoints, sector::SectorPerformanceEndpoints,
  technical_indicators::TechnicalIndicatorEndpoints, time_series::TimeSeriesEndpoints,
};
