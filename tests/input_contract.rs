//! Contract tests for the JSON input and output shapes
//!
//! These tests verify that documents produced by a price-fetch layer decode
//! leniently and that results serialize in the shape presentation code reads.

use std::io::Write;

use ferrocorr_core::{
    parse_price_map, read_price_map, CoreError, CorrelationEngine, Lookback, Ticker,
};
use serde_json::{json, Value};
use tempfile::NamedTempFile;

const DOCUMENT: &str = r#"{
    "AAPL": [
        {"timestamp": "2024-04-03T20:00:00Z", "price": 169.65},
        {"timestamp": "2024-04-01T20:00:00Z", "price": 170.03},
        {"timestamp": "2024-04-02T20:00:00Z", "price": 168.84},
        {"timestamp": "2024-04-04T20:00:00Z", "price": "NaN"}
    ],
    "msft": [
        {"timestamp": "2024-04-01T20:00:00Z", "price": 424.57},
        {"timestamp": "2024-04-02T20:00:00Z", "price": 421.44},
        {"timestamp": "2024-04-03T20:00:00Z", "price": 420.45},
        {"timestamp": "2024-04-04T20:00:00Z", "price": 417.88}
    ],
    "NVDA": [
        {"timestamp": "2024-04-01T20:00:00Z", "price": 903.63},
        {"timestamp": "2024-04-02T20:00:00Z", "price": 894.52},
        {"timestamp": "2024-04-03T20:00:00Z", "price": 889.64}
    ],
    "1BAD": [
        {"timestamp": "2024-04-01T20:00:00Z", "price": 1.0}
    ]
}"#;

#[test]
fn when_a_document_is_decoded_key_order_is_preserved() {
    // Given: A document with mixed-case and invalid keys
    let decoded = parse_price_map(DOCUMENT).expect("valid document");

    // Then: Valid tickers keep document order and are normalized
    let names: Vec<&str> = decoded.series.keys().map(Ticker::as_str).collect();
    assert_eq!(names, vec!["AAPL", "MSFT", "NVDA"]);
    assert_eq!(decoded.report.invalid_tickers, 1);
    assert_eq!(decoded.report.malformed_points, 1);
    assert_eq!(decoded.report.points, 10);
}

#[test]
fn when_a_result_is_serialized_it_follows_the_output_contract() {
    // Given: A decoded document
    let decoded = parse_price_map(DOCUMENT).expect("valid document");

    // When: The engine correlates it and the result is serialized
    let result = CorrelationEngine::default().compute(&decoded.series);
    let value = serde_json::to_value(&result).expect("serializable");

    // Then: Field names and row order match the contract
    assert_eq!(value["dataPoints"], 3);
    assert_eq!(value["tickers"], json!(["AAPL", "MSFT", "NVDA"]));
    let matrix = value["matrix"].as_array().expect("matrix array");
    assert_eq!(matrix.len(), 3);
    assert_eq!(matrix[1][1], 1.0);
    let std_devs = value["standardDeviations"].as_object().expect("std dev map");
    let keys: Vec<&String> = std_devs.keys().collect();
    assert_eq!(keys, vec!["AAPL", "MSFT", "NVDA"]);
}

#[test]
fn when_the_window_excludes_everything_the_result_is_neutral() {
    // Given: A document whose tickers share one date inside the last week
    let decoded = parse_price_map(
        r#"{
            "AAA": [{"timestamp": "2020-01-01", "price": 1}, {"timestamp": "2024-01-10", "price": 2}],
            "BBB": [{"timestamp": "2020-01-01", "price": 3}, {"timestamp": "2024-01-10", "price": 4}]
        }"#,
    )
    .expect("valid document");

    // When: A one-week lookback is applied
    let result = CorrelationEngine::default().compute_with_lookback(&decoded.series, Lookback::OneWeek);

    // Then: The neutral empty result is returned rather than an error
    assert!(result.is_empty());
    assert_eq!(
        serde_json::to_value(&result).expect("serializable"),
        json!({"tickers": [], "matrix": [], "standardDeviations": {}, "dataPoints": 0})
    );
}

#[test]
fn when_input_comes_from_a_file_it_decodes_the_same() {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(DOCUMENT.as_bytes()).expect("write");

    let from_file = read_price_map(std::fs::File::open(file.path()).expect("open"))
        .expect("valid document");
    let from_str = parse_price_map(DOCUMENT).expect("valid document");

    assert_eq!(from_file, from_str);
}

#[test]
fn when_the_document_is_not_an_object_decoding_fails() {
    for document in ["[]", "null", "42", r#""AAPL""#] {
        let err = parse_price_map(document).expect_err("must fail");
        assert!(matches!(err, CoreError::InvalidDocument { .. }), "{document}");
    }

    let value: Value = serde_json::from_str("{}").expect("json");
    let decoded = ferrocorr_core::decode_price_map(&value).expect("empty object is fine");
    assert!(decoded.series.is_empty());
}
