//! Lenient decoding of `{ticker: [{timestamp, price}, ...]}` documents.
//!
//! Only a non-object top level is an error. Every malformed piece below it is
//! skipped and counted in a [`DecodeReport`].

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

use crate::{CoreError, PricePoint, PriceSeriesMap, Ticker, TimeSeries};

/// Counts of what was kept and what was skipped while decoding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodeReport {
    pub tickers: usize,
    pub points: usize,
    pub invalid_tickers: usize,
    pub non_array_series: usize,
    pub malformed_points: usize,
}

impl DecodeReport {
    pub fn skipped(&self) -> usize {
        self.invalid_tickers + self.non_array_series + self.malformed_points
    }
}

/// Decoded price map together with its [`DecodeReport`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedInput {
    pub series: PriceSeriesMap,
    pub report: DecodeReport,
}

pub fn decode_price_map(value: &Value) -> Result<DecodedInput, CoreError> {
    let object = value.as_object().ok_or(CoreError::InvalidDocument {
        found: json_kind(value),
    })?;
    Ok(decode_object(object))
}

pub fn parse_price_map(input: &str) -> Result<DecodedInput, CoreError> {
    let value: Value = serde_json::from_str(input)?;
    decode_price_map(&value)
}

pub fn read_price_map(reader: impl Read) -> Result<DecodedInput, CoreError> {
    let value: Value = serde_json::from_reader(reader)?;
    decode_price_map(&value)
}

fn decode_object(object: &Map<String, Value>) -> DecodedInput {
    let mut series = PriceSeriesMap::with_capacity(object.len());
    let mut report = DecodeReport::default();

    for (key, entries) in object {
        let ticker = match Ticker::parse(key) {
            Ok(ticker) => ticker,
            Err(error) => {
                debug!(key = %key, %error, "skipping invalid ticker");
                report.invalid_tickers += 1;
                continue;
            }
        };

        let target = series.entry(ticker).or_insert_with(TimeSeries::default);
        let Some(entries) = entries.as_array() else {
            debug!(key = %key, found = json_kind(entries), "series is not an array");
            report.non_array_series += 1;
            continue;
        };

        for entry in entries {
            match decode_point(entry) {
                Some(point) => {
                    target.push(point);
                    report.points += 1;
                }
                None => report.malformed_points += 1,
            }
        }
    }

    report.tickers = series.len();
    if report.skipped() > 0 {
        debug!(?report, "decoded price map with skipped entries");
    }

    DecodedInput { series, report }
}

fn decode_point(entry: &Value) -> Option<PricePoint> {
    let object = entry.as_object()?;
    let timestamp = object.get("timestamp")?.as_str()?;
    let price = object.get("price")?.as_f64()?;
    if timestamp.trim().is_empty() || !price.is_finite() {
        return None;
    }
    Some(PricePoint::new(timestamp, price))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
