//! Response body decoding
//!
//! Every CSV endpoint goes through the same reader: the header row fixes the
//! column order and each data row is mapped onto the target record by column
//! name, not position. A row that fails any required column fails the whole
//! body; partial results are never returned.

use crate::common::{
  Localize, MARKET_TZ, Percent, ServerResponse, TIMESTAMP_FORMATS, localize, parse_wall_clock,
};
use crate::indicator::IndicatorPoint;
use crate::sector::{META_DATA_KEY, SectorPerformance};
use av_core::{Error, Result};
use chrono_tz::Tz;
use csv::{Reader, ReaderBuilder, Trim};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use tracing::trace;

/// Indicator rows on intraday intervals drop the seconds
const INDICATOR_TIMESTAMP_FORMATS: [&str; 3] =
  [TIMESTAMP_FORMATS[0], TIMESTAMP_FORMATS[1], "%Y-%m-%d %H:%M"];

fn reader(body: &[u8]) -> Reader<&[u8]> {
  ReaderBuilder::new().has_headers(true).trim(Trim::All).from_reader(body)
}

fn short_type_name<T>() -> &'static str {
  let full = std::any::type_name::<T>();
  full.rsplit("::").next().unwrap_or(full)
}

/// Decode a CSV body into one `T` per data row, with timestamps in US/Eastern.
///
/// An empty body, or one holding only a header, yields an empty vector.
pub fn decode_csv<T>(body: &[u8]) -> Result<Vec<T>>
where
  T: DeserializeOwned + Localize,
{
  decode_csv_in(body, MARKET_TZ)
}

/// Decode a CSV body into one `T` per data row, pinning timestamps to `tz`
pub fn decode_csv_in<T>(body: &[u8], tz: Tz) -> Result<Vec<T>>
where
  T: DeserializeOwned + Localize,
{
  let record = short_type_name::<T>();
  let mut rdr = reader(body);

  rdr.headers().map_err(|e| Error::decode(format!("header row of {record}"), e))?;

  let rows = rdr
    .deserialize::<T>()
    .enumerate()
    .map(|(i, row)| {
      let context = || format!("row {} of {record}", i + 1);
      let mut row = row.map_err(|e| Error::decode(context(), e))?;
      row.localize(tz).map_err(|e| Error::decode(context(), e))?;
      Ok(row)
    })
    .collect::<Result<Vec<T>>>()?;

  trace!(rows = rows.len(), record, tz = tz.name(), "decoded csv body");
  Ok(rows)
}

/// Decode a technical indicator CSV body.
///
/// The first column is the timestamp; every other column becomes a named value.
pub fn decode_indicator_csv(body: &[u8]) -> Result<Vec<IndicatorPoint>> {
  decode_indicator_csv_in(body, MARKET_TZ)
}

/// [`decode_indicator_csv`] with timestamps pinned to `tz`
pub fn decode_indicator_csv_in(body: &[u8], tz: Tz) -> Result<Vec<IndicatorPoint>> {
  let mut rdr = reader(body);
  let headers = rdr.headers().map_err(|e| Error::decode("header row of indicator", e))?.clone();

  let mut points = Vec::new();
  for (i, row) in rdr.records().enumerate() {
    let row_no = i + 1;
    let row = row.map_err(|e| Error::decode(format!("row {row_no} of indicator"), e))?;

    let raw_ts = row.get(0).unwrap_or_default();
    let timestamp = parse_wall_clock(raw_ts, &INDICATOR_TIMESTAMP_FORMATS)
      .and_then(|naive| localize(naive, tz))
      .map_err(|e| Error::decode(format!("row {row_no} of indicator"), e))?;

    let mut values = BTreeMap::new();
    for (column, raw) in headers.iter().zip(row.iter()).skip(1) {
      let value = raw.parse::<f64>().map_err(|e| {
        Error::decode(format!("row {row_no} of indicator, column {column}"), e)
      })?;
      values.insert(column.to_string(), value);
    }

    points.push(IndicatorPoint { timestamp, values });
  }

  trace!(rows = points.len(), "decoded indicator body");
  Ok(points)
}

/// Decode the JSON body of the SECTOR endpoint
pub fn decode_sector_json(body: &[u8], server_response: ServerResponse) -> Result<SectorPerformance> {
  let raw: BTreeMap<String, serde_json::Value> =
    serde_json::from_slice(body).map_err(|e| Error::decode("sector performance body", e))?;

  let mut meta_data = BTreeMap::new();
  let mut ranks = BTreeMap::new();

  for (key, value) in raw {
    if key == META_DATA_KEY {
      meta_data = serde_json::from_value(value)
        .map_err(|e| Error::decode("sector performance metadata", e))?;
    } else {
      let sectors: BTreeMap<String, Percent> = serde_json::from_value(value)
        .map_err(|e| Error::decode(format!("sector performance {key}"), e))?;
      ranks.insert(key, sectors);
    }
  }

  Ok(SectorPerformance { server_response, meta_data, ranks })
}
