//! # Domain Models
//!
//! Value types shared by the aligner and the correlation engine.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Ticker`] | Validated instrument identifier |
//! | [`PricePoint`] | One `(timestamp, price)` observation |
//! | [`TimeSeries`] | Observations for one ticker, in source order |
//! | [`PriceSeriesMap`] | Ordered `Ticker -> TimeSeries` input mapping |
//! | [`Lookback`] | Trailing window (1w, 1m, 3m, 6m, 1y, 5y, max) |
//! | [`UtcDateTime`] | UTC timestamp used for window arithmetic |
//!
//! Timestamps stay plain strings inside [`PricePoint`]: alignment matches
//! them by exact string equality, and only the lookback window ever parses
//! them.

mod lookback;
mod series;
mod ticker;
mod timestamp;

pub use lookback::Lookback;
pub use series::{PricePoint, PriceSeriesMap, TimeSeries};
pub use ticker::Ticker;
pub use timestamp::UtcDateTime;
