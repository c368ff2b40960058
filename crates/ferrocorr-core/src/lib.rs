//! # Ferrocorr Core
//!
//! Alignment and correlation analytics for multi-instrument price series.
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`align`] | Union and intersection alignment onto a shared timestamp grid |
//! | [`config`] | Engine settings (parallel scheduling) |
//! | [`correlation`] | Pearson matrix and per-ticker dispersion |
//! | [`domain`] | Tickers, price points, series, lookback windows |
//! | [`envelope`] | Response envelope with metadata |
//! | [`error`] | Core error types |
//! | [`input`] | Lenient JSON decoding of price maps |
//! | [`stats`] | Mean, population standard deviation, summaries |
//! | [`window`] | Lookback trimming |
//!
//! ## Quick Start
//!
//! ```rust
//! use ferrocorr_core::{parse_price_map, CorrelationEngine};
//!
//! let decoded = parse_price_map(
//!     r#"{
//!         "AAPL":  [{"timestamp": "t1", "price": 100}, {"timestamp": "t2", "price": 102}, {"timestamp": "t3", "price": 101}],
//!         "GOOGL": [{"timestamp": "t1", "price": 200}, {"timestamp": "t2", "price": 204}, {"timestamp": "t3", "price": 202}]
//!     }"#,
//! )?;
//!
//! let result = CorrelationEngine::default().compute(&decoded.series);
//! assert_eq!(result.data_points, 3);
//! assert!((result.matrix[0][1] - 1.0).abs() < 1e-9);
//! # Ok::<(), ferrocorr_core::CoreError>(())
//! ```
//!
//! ## Error Handling
//!
//! The engine never fails. Malformed points are filtered out and
//! insufficient data produces an empty [`CorrelationResult`] with
//! `data_points == 0`. Errors only exist at the edges: decoding a document
//! that is not a JSON object, or validating tickers and envelope metadata.

pub mod align;
pub mod config;
pub mod correlation;
pub mod domain;
pub mod envelope;
pub mod error;
pub mod input;
pub mod stats;
pub mod window;

pub use align::{align_common, align_union, common_timestamps, AlignedDataset};
pub use config::{EngineConfig, Parallelism};
pub use correlation::{pearson, CorrelationEngine, CorrelationResult};
pub use domain::{Lookback, PricePoint, PriceSeriesMap, Ticker, TimeSeries, UtcDateTime};
pub use envelope::{Envelope, EnvelopeMeta};
pub use error::{CoreError, ValidationError};
pub use input::{decode_price_map, parse_price_map, read_price_map, DecodeReport, DecodedInput};
pub use stats::{average, standard_deviation, SeriesSummary};
pub use window::apply_lookback;
