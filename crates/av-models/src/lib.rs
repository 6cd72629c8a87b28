//! # av-models
//!
//! Typed records for AlphaVantage CSV responses and the decoder that
//! produces them.
//!
//! ## Features
//!
//! - **Column mapping**: CSV columns are matched to fields by header name
//! - **Date Handling**: `YYYY-MM-DD` and `YYYY-MM-DD HH:MM:SS` timestamps, pinned to
//!   US/Eastern for equities and UTC for FX and digital currencies
//! - **Percentages**: `"-4.2096%"` decodes to `-4.2096`
//! - **Optional columns**: adjusted-price fields default to zero when absent
//!
//! ## Usage
//!
//! ```
//! use av_models::{TimeSeries, decode_csv};
//!
//! let body = "timestamp,open,high,low,close,volume\n2020-03-25,148.98,149.10,146.16,146.86,2666656";
//! let bars: Vec<TimeSeries> = decode_csv(body.as_bytes()).unwrap();
//! assert_eq!(bars.len(), 1);
//! ```

#![warn(clippy::all)]

pub mod common;
pub mod decode;
pub mod forex;
pub mod indicator;
pub mod sector;
pub mod time_series;

// Re-export common types for convenience
pub use common::*;
pub use decode::{decode_csv, decode_csv_in, decode_indicator_csv, decode_indicator_csv_in, decode_sector_json};

// Re-export all model types
pub use forex::*;
pub use indicator::*;
pub use sector::*;
pub use time_series::*;
