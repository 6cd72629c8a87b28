//! Common types used across the API

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Data output format for API requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    /// JSON format
    Json,
    /// CSV format
    Csv,
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataType::Json => write!(f, "json"),
            DataType::Csv => write!(f, "csv"),
        }
    }
}

/// Time interval for intraday data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    Min1,
    Min5,
    Min15,
    Min30,
    Min60,
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Interval::Min1 => write!(f, "1min"),
            Interval::Min5 => write!(f, "5min"),
            Interval::Min15 => write!(f, "15min"),
            Interval::Min30 => write!(f, "30min"),
            Interval::Min60 => write!(f, "60min"),
        }
    }
}

impl FromStr for Interval {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "1min" => Ok(Interval::Min1),
            "5min" => Ok(Interval::Min5),
            "15min" => Ok(Interval::Min15),
            "30min" => Ok(Interval::Min30),
            "60min" => Ok(Interval::Min60),
            other => Err(crate::Error::Config(format!("unknown interval: {other}"))),
        }
    }
}

impl Interval {
    /// Get interval duration in minutes
    pub fn minutes(&self) -> u32 {
        match self {
            Interval::Min1 => 1,
            Interval::Min5 => 5,
            Interval::Min15 => 15,
            Interval::Min30 => 30,
            Interval::Min60 => 60,
        }
    }
}

/// Interval accepted by the technical indicator endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorInterval {
    Intraday(Interval),
    Daily,
    Weekly,
    Monthly,
}

impl std::fmt::Display for IndicatorInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndicatorInterval::Intraday(interval) => write!(f, "{interval}"),
            IndicatorInterval::Daily => write!(f, "daily"),
            IndicatorInterval::Weekly => write!(f, "weekly"),
            IndicatorInterval::Monthly => write!(f, "monthly"),
        }
    }
}

impl From<Interval> for IndicatorInterval {
    fn from(interval: Interval) -> Self {
        IndicatorInterval::Intraday(interval)
    }
}

/// Output size for API requests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputSize {
    /// Compact output (latest 100 data points)
    #[default]
    Compact,
    /// Full output (up to 20 years of data)
    Full,
}

impl std::fmt::Display for OutputSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputSize::Compact => write!(f, "compact"),
            OutputSize::Full => write!(f, "full"),
        }
    }
}

/// Price series a technical indicator is computed over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeriesType {
    Open,
    High,
    Low,
    Close,
}

impl std::fmt::Display for SeriesType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesType::Open => write!(f, "open"),
            SeriesType::High => write!(f, "high"),
            SeriesType::Low => write!(f, "low"),
            SeriesType::Close => write!(f, "close"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_round_trips_through_display() {
        for interval in [Interval::Min1, Interval::Min5, Interval::Min15, Interval::Min30, Interval::Min60] {
            assert_eq!(interval.to_string().parse::<Interval>().unwrap(), interval);
        }
        assert!("2min".parse::<Interval>().is_err());
    }

    #[test]
    fn test_indicator_interval_display() {
        assert_eq!(IndicatorInterval::from(Interval::Min15).to_string(), "15min");
        assert_eq!(IndicatorInterval::Weekly.to_string(), "weekly");
    }

    #[test]
    fn test_output_size_default_is_compact() {
        assert_eq!(OutputSize::default(), OutputSize::Compact);
        assert_eq!(OutputSize::Full.to_string(), "full");
    }
}
