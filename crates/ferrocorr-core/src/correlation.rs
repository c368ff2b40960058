//! Pairwise Pearson correlation over intersection-aligned price vectors.

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::align::{align_common, AlignedDataset, MIN_ALIGNED_POINTS};
use crate::stats::{finite_values, standard_deviation};
use crate::window::apply_lookback;
use crate::{EngineConfig, Lookback, PriceSeriesMap, Ticker};

/// Correlation matrix plus per-ticker dispersion for one computation.
///
/// `matrix[i][j]` refers to `tickers[i]` and `tickers[j]`. Tickers without
/// enough overlapping data are absent from every field, so `tickers` can be
/// shorter than the input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationResult {
    pub tickers: Vec<Ticker>,
    pub matrix: Vec<Vec<f64>>,
    pub standard_deviations: IndexMap<Ticker, f64>,
    /// Number of common timestamps used; 0 when data was insufficient.
    pub data_points: usize,
}

impl CorrelationResult {
    /// The neutral "not enough data" result.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.data_points == 0
    }

    /// Correlation between two retained tickers.
    pub fn correlation(&self, a: &Ticker, b: &Ticker) -> Option<f64> {
        let row = self.tickers.iter().position(|ticker| ticker == a)?;
        let column = self.tickers.iter().position(|ticker| ticker == b)?;
        Some(self.matrix[row][column])
    }
}

/// Pearson correlation coefficient of `x` and `y`.
///
/// Only index pairs where both values are finite take part; extra entries of
/// the longer slice are ignored. Returns `0.0` for fewer than two valid pairs
/// or a zero denominator (a constant series), and clamps the result to
/// `[-1.0, 1.0]`.
///
/// Squared deviations are accumulated directly, so inputs near the limits of
/// `f64` lose the result: deviations around `1e-200` underflow to a zero
/// denominator and deviations around `1e200` overflow to a non-finite ratio.
/// Both come back as `0.0`.
pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect();

    if pairs.len() < MIN_ALIGNED_POINTS {
        return 0.0;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|(a, _)| a).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|(_, b)| b).sum::<f64>() / n;

    let mut covariance = 0.0;
    let mut sum_sq_x = 0.0;
    let mut sum_sq_y = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        covariance += dx * dy;
        sum_sq_x += dx * dx;
        sum_sq_y += dy * dy;
    }

    let denominator = (sum_sq_x * sum_sq_y).sqrt();
    if denominator == 0.0 {
        return 0.0;
    }

    let rho = covariance / denominator;
    if !rho.is_finite() {
        return 0.0;
    }
    rho.clamp(-1.0, 1.0)
}

/// Stateless correlation engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct CorrelationEngine {
    config: EngineConfig,
}

impl CorrelationEngine {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Correlation matrix over the full history of every series.
    pub fn compute(&self, input: &PriceSeriesMap) -> CorrelationResult {
        if input.is_empty() {
            debug!("no tickers supplied");
            return CorrelationResult::empty();
        }

        let aligned = align_common(input);
        if aligned.timestamps.len() < MIN_ALIGNED_POINTS {
            debug!(
                tickers = input.len(),
                common = aligned.timestamps.len(),
                "insufficient common timestamps"
            );
            return CorrelationResult::empty();
        }

        self.correlate(aligned)
    }

    /// Same as [`Self::compute`] after trimming every series to `lookback`.
    pub fn compute_with_lookback(
        &self,
        input: &PriceSeriesMap,
        lookback: Lookback,
    ) -> CorrelationResult {
        self.compute(&apply_lookback(input, lookback))
    }

    fn correlate(&self, aligned: AlignedDataset) -> CorrelationResult {
        let data_points = aligned.timestamps.len();
        let (tickers, vectors): (Vec<Ticker>, Vec<Vec<f64>>) = aligned
            .series
            .into_iter()
            .map(|(ticker, prices)| (ticker, finite_values(&prices)))
            .unzip();

        let standard_deviations = tickers
            .iter()
            .zip(&vectors)
            .map(|(ticker, prices)| (ticker.clone(), standard_deviation(prices)))
            .collect();

        let parallel = self.config.runs_parallel(tickers.len());
        debug!(
            tickers = tickers.len(),
            data_points, parallel, "computing correlation matrix"
        );

        CorrelationResult {
            matrix: build_matrix(&vectors, parallel),
            tickers,
            standard_deviations,
            data_points,
        }
    }
}

/// Symmetric matrix with an exact unit diagonal. Only the upper triangle is
/// computed; rows are collected in index order whether or not they ran on the
/// rayon pool, so both paths give identical bits.
fn build_matrix(vectors: &[Vec<f64>], parallel: bool) -> Vec<Vec<f64>> {
    let n = vectors.len();
    let upper_row = |i: usize| -> Vec<f64> {
        trace!(row = i, "correlating row");
        ((i + 1)..n)
            .map(|j| pearson(&vectors[i], &vectors[j]))
            .collect()
    };

    let upper: Vec<Vec<f64>> = if parallel {
        (0..n).into_par_iter().map(upper_row).collect()
    } else {
        (0..n).map(upper_row).collect()
    };

    let mut matrix = vec![vec![0.0; n]; n];
    for (i, row) in upper.into_iter().enumerate() {
        matrix[i][i] = 1.0;
        for (offset, value) in row.into_iter().enumerate() {
            let j = i + 1 + offset;
            matrix[i][j] = value;
            matrix[j][i] = value;
        }
    }
    matrix
}
