use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::Ticker;

/// Insertion-ordered price series keyed by ticker. The key order is the
/// ticker ordering every engine output follows.
pub type PriceSeriesMap = IndexMap<Ticker, TimeSeries>;

/// One observation of an instrument price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: String,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: impl Into<String>, price: f64) -> Self {
        Self {
            timestamp: timestamp.into(),
            price,
        }
    }

    /// A point takes part in alignment only with a non-blank timestamp and a
    /// finite price.
    pub fn is_usable(&self) -> bool {
        !self.timestamp.trim().is_empty() && self.price.is_finite()
    }
}

/// Price observations for one ticker in source order (not necessarily sorted).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimeSeries {
    pub points: Vec<PricePoint>,
}

impl TimeSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn push(&mut self, point: PricePoint) {
        self.points.push(point);
    }

    pub fn usable_points(&self) -> impl Iterator<Item = &PricePoint> {
        self.points.iter().filter(|point| point.is_usable())
    }

    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|point| point.price).collect()
    }
}

impl FromIterator<PricePoint> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = PricePoint>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for TimeSeries {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(timestamp, price)| PricePoint::new(timestamp, price))
            .collect()
    }
}
