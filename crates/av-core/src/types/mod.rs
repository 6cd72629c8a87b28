//! Common types used across av-* crates

pub mod common;

pub use common::{DataType, IndicatorInterval, Interval, OutputSize, SeriesType};
