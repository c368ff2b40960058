//! Scalar statistics over cleaned numeric sequences.
//!
//! Every function drops non-finite values before computing anything and
//! returns `0.0` for an empty cleaned sequence.

use serde::{Deserialize, Serialize};

/// Copy of `values` with NaN and infinities removed.
pub fn finite_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|value| value.is_finite()).collect()
}

/// Arithmetic mean of the finite entries of `values`.
pub fn average(values: &[f64]) -> f64 {
    mean_of_clean(&finite_values(values))
}

/// Population standard deviation (divides by N) of the finite entries of
/// `values`.
pub fn standard_deviation(values: &[f64]) -> f64 {
    std_dev_of_clean(&finite_values(values))
}

fn mean_of_clean(clean: &[f64]) -> f64 {
    if clean.is_empty() {
        return 0.0;
    }
    clean.iter().sum::<f64>() / clean.len() as f64
}

fn std_dev_of_clean(clean: &[f64]) -> f64 {
    if clean.is_empty() {
        return 0.0;
    }
    let mean = mean_of_clean(clean);
    let variance = clean
        .iter()
        .map(|value| {
            let delta = value - mean;
            delta * delta
        })
        .sum::<f64>()
        / clean.len() as f64;
    variance.sqrt()
}

/// Descriptive summary of one price sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSummary {
    pub count: usize,
    pub mean: f64,
    pub standard_deviation: f64,
    pub min: f64,
    pub max: f64,
}

impl SeriesSummary {
    pub fn from_values(values: &[f64]) -> Self {
        let clean = finite_values(values);
        if clean.is_empty() {
            return Self::default();
        }

        let min = clean.iter().copied().fold(f64::INFINITY, f64::min);
        let max = clean.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self {
            count: clean.len(),
            mean: mean_of_clean(&clean),
            standard_deviation: std_dev_of_clean(&clean),
            min,
            max,
        }
    }
}
