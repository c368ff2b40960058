//! Time-series alignment onto a shared timestamp grid.
//!
//! Two modes are provided:
//!
//! - [`align_union`] keeps every timestamp seen by any ticker. Vectors can end
//!   up with different lengths, so they are only comparable position by
//!   position in a loose sense.
//! - [`align_common`] keeps only the timestamps every retained ticker has a
//!   finite price for. Index `k` means the same timestamp in every vector; this
//!   is what the correlation engine consumes.
//!
//! Timestamps are matched by exact string equality and sorted lexically, which
//! is chronological for uniformly formatted ISO-8601 strings. Nothing is
//! interpolated. Points with a blank timestamp or a non-finite price are
//! skipped, and when a ticker repeats a timestamp the first usable occurrence
//! wins.

use std::collections::{BTreeSet, HashMap};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PriceSeriesMap, Ticker, TimeSeries};

/// Minimum number of points a vector (or a common grid) needs to be kept.
pub const MIN_ALIGNED_POINTS: usize = 2;

/// Price vectors indexed against a derived timestamp grid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignedDataset {
    /// Sorted timestamp grid the vectors were built from.
    pub timestamps: Vec<String>,
    /// Ticker to price vector, in input order. Every vector has at least
    /// [`MIN_ALIGNED_POINTS`] entries.
    pub series: IndexMap<Ticker, Vec<f64>>,
}

impl AlignedDataset {
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.series.keys()
    }

    pub fn get(&self, ticker: &Ticker) -> Option<&[f64]> {
        self.series.get(ticker).map(Vec::as_slice)
    }
}

/// First usable price per timestamp for one series.
fn price_index(series: &TimeSeries) -> HashMap<&str, f64> {
    let mut index = HashMap::with_capacity(series.len());
    for point in series.usable_points() {
        index.entry(point.timestamp.as_str()).or_insert(point.price);
    }
    index
}

/// Union-mode alignment.
///
/// Builds the sorted union of all usable timestamps and, for each ticker,
/// appends its price at every union timestamp it has. Tickers left with fewer
/// than two prices are dropped.
pub fn align_union(input: &PriceSeriesMap) -> AlignedDataset {
    let indexes: Vec<(&Ticker, HashMap<&str, f64>)> = input
        .iter()
        .map(|(ticker, series)| (ticker, price_index(series)))
        .collect();

    let grid: BTreeSet<&str> = indexes
        .iter()
        .flat_map(|(_, index)| index.keys().copied())
        .collect();

    let mut series = IndexMap::with_capacity(indexes.len());
    for (ticker, index) in &indexes {
        let prices: Vec<f64> = grid
            .iter()
            .filter_map(|timestamp| index.get(timestamp).copied())
            .collect();

        if prices.len() < MIN_ALIGNED_POINTS {
            debug!(ticker = %ticker, points = prices.len(), "dropping ticker with too few points");
            continue;
        }
        series.insert((*ticker).clone(), prices);
    }

    AlignedDataset {
        timestamps: grid.into_iter().map(str::to_owned).collect(),
        series,
    }
}

/// Sorted timestamps at which every ticker in `input` has a usable price.
///
/// Empty when `input` is empty.
pub fn common_timestamps(input: &PriceSeriesMap) -> Vec<String> {
    let mut indexes = input.values().map(price_index);
    let Some(first) = indexes.next() else {
        return Vec::new();
    };

    let mut common: BTreeSet<&str> = first.keys().copied().collect();
    for index in indexes {
        common.retain(|timestamp| index.contains_key(timestamp));
        if common.is_empty() {
            break;
        }
    }

    common.into_iter().map(str::to_owned).collect()
}

/// Intersection-mode alignment used by the correlation engine.
///
/// Tickers that cannot share at least two timestamps with the rest are
/// excluded rather than collapsing the whole grid. The retained group is the
/// largest one found by greedily admitting tickers in input order from each
/// possible starting ticker; ties go to the larger grid, then to the earliest
/// start. A lone ticker is only retained when it is the only one with usable
/// data: `{AAA: t1,t2; BBB: [NaN]}` keeps `AAA` as a 1x1 grid, while
/// `{AAA: t1,t2; BBB: t3,t4}` has two usable tickers with no shared timestamp
/// and yields nothing. Returns an empty dataset when no group of two or more
/// reaches two common timestamps.
pub fn align_common(input: &PriceSeriesMap) -> AlignedDataset {
    let candidates: Vec<(&Ticker, HashMap<&str, f64>)> = input
        .iter()
        .map(|(ticker, series)| (ticker, price_index(series)))
        .filter(|(ticker, index)| {
            let usable = index.len() >= MIN_ALIGNED_POINTS;
            if !usable {
                debug!(ticker = %ticker, points = index.len(), "ticker has too few usable points");
            }
            usable
        })
        .collect();

    let Some((members, grid)) = select_overlapping_group(&candidates) else {
        debug!(candidates = candidates.len(), "no overlapping group of tickers");
        return AlignedDataset::default();
    };

    if members.len() < candidates.len() {
        let excluded: Vec<&str> = candidates
            .iter()
            .enumerate()
            .filter(|(position, _)| !members.contains(position))
            .map(|(_, (ticker, _))| ticker.as_str())
            .collect();
        debug!(?excluded, "excluding tickers without enough overlap");
    }

    let mut series = IndexMap::with_capacity(members.len());
    for position in members {
        let (ticker, index) = &candidates[position];
        let prices: Vec<f64> = grid
            .iter()
            .filter_map(|timestamp| index.get(timestamp).copied())
            .collect();
        debug_assert_eq!(prices.len(), grid.len(), "common grid lookup must not miss");
        series.insert((*ticker).clone(), prices);
    }

    AlignedDataset {
        timestamps: grid.into_iter().map(str::to_owned).collect(),
        series,
    }
}

/// Picks the retained ticker positions (ascending) and their common grid.
fn select_overlapping_group<'a>(
    candidates: &[(&Ticker, HashMap<&'a str, f64>)],
) -> Option<(Vec<usize>, BTreeSet<&'a str>)> {
    match candidates {
        [] => None,
        [(_, only)] => Some((vec![0], only.keys().copied().collect())),
        _ => {
            let mut best: Option<(Vec<usize>, BTreeSet<&'a str>)> = None;

            for seed in 0..candidates.len() {
                let (members, grid) = grow_group(candidates, seed);
                if members.len() < 2 {
                    continue;
                }

                let better = best.as_ref().is_none_or(|(best_members, best_grid)| {
                    (members.len(), grid.len()) > (best_members.len(), best_grid.len())
                });
                let complete = members.len() == candidates.len();
                if better {
                    best = Some((members, grid));
                }
                if complete {
                    break;
                }
            }

            best
        }
    }
}

fn grow_group<'a>(
    candidates: &[(&Ticker, HashMap<&'a str, f64>)],
    seed: usize,
) -> (Vec<usize>, BTreeSet<&'a str>) {
    let mut grid: BTreeSet<&'a str> = candidates[seed].1.keys().copied().collect();
    let mut members = vec![seed];

    for (position, (_, index)) in candidates.iter().enumerate() {
        if position == seed {
            continue;
        }
        let narrowed: BTreeSet<&'a str> = grid
            .iter()
            .copied()
            .filter(|timestamp| index.contains_key(timestamp))
            .collect();
        if narrowed.len() >= MIN_ALIGNED_POINTS {
            grid = narrowed;
            members.push(position);
        }
    }

    members.sort_unstable();
    (members, grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PricePoint;

    fn ticker(value: &str) -> Ticker {
        Ticker::parse(value).expect("valid ticker")
    }

    fn map(entries: Vec<(&str, Vec<(&str, f64)>)>) -> PriceSeriesMap {
        entries
            .into_iter()
            .map(|(name, points)| (ticker(name), points.into_iter().collect::<TimeSeries>()))
            .collect()
    }

    #[test]
    fn union_sorts_timestamps_and_skips_missing_points() {
        let input = map(vec![
            ("AAA", vec![("t3", 3.0), ("t1", 1.0), ("t2", 2.0)]),
            ("BBB", vec![("t4", 40.0), ("t2", 20.0)]),
        ]);

        let aligned = align_union(&input);

        assert_eq!(aligned.timestamps, vec!["t1", "t2", "t3", "t4"]);
        assert_eq!(aligned.get(&ticker("AAA")), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(aligned.get(&ticker("BBB")), Some(&[20.0, 40.0][..]));
    }

    #[test]
    fn union_drops_short_vectors() {
        let input = map(vec![
            ("AAA", vec![("t1", 1.0), ("t2", 2.0)]),
            ("BBB", vec![("t1", 5.0), ("t2", f64::NAN)]),
        ]);

        let aligned = align_union(&input);

        assert_eq!(aligned.tickers().count(), 1);
        assert!(aligned.get(&ticker("BBB")).is_none());
    }

    #[test]
    fn first_usable_duplicate_wins() {
        let mut series = TimeSeries::default();
        series.push(PricePoint::new("t1", f64::NAN));
        series.push(PricePoint::new("t1", 7.0));
        series.push(PricePoint::new("t1", 9.0));
        series.push(PricePoint::new("t2", 8.0));
        let input: PriceSeriesMap = [(ticker("AAA"), series)].into_iter().collect();

        let aligned = align_union(&input);

        assert_eq!(aligned.get(&ticker("AAA")), Some(&[7.0, 8.0][..]));
    }

    #[test]
    fn common_timestamps_is_a_strict_intersection() {
        let input = map(vec![
            ("AAA", vec![("t1", 1.0), ("t2", 2.0), ("t3", 3.0)]),
            ("BBB", vec![("t3", 1.0), ("t2", 2.0), ("t4", f64::NAN)]),
            ("CCC", vec![("t2", 1.0), ("t3", f64::NAN)]),
        ]);

        assert_eq!(common_timestamps(&input), vec!["t2"]);
        assert!(common_timestamps(&PriceSeriesMap::new()).is_empty());
    }

    #[test]
    fn common_alignment_produces_equal_length_vectors() {
        let input = map(vec![
            ("AAA", vec![("t3", 3.0), ("t1", 1.0), ("t2", 2.0), ("t0", 0.5)]),
            ("BBB", vec![("t1", 10.0), ("t2", 20.0), ("t3", 30.0)]),
        ]);

        let aligned = align_common(&input);

        assert_eq!(aligned.timestamps, vec!["t1", "t2", "t3"]);
        assert_eq!(aligned.get(&ticker("AAA")), Some(&[1.0, 2.0, 3.0][..]));
        assert_eq!(aligned.get(&ticker("BBB")), Some(&[10.0, 20.0, 30.0][..]));
    }

    #[test]
    fn common_alignment_excludes_isolated_leading_ticker() {
        let input = map(vec![
            ("LONE", vec![("x1", 1.0), ("x2", 2.0), ("x3", 3.0)]),
            ("AAA", vec![("t1", 1.0), ("t2", 2.0)]),
            ("BBB", vec![("t1", 3.0), ("t2", 5.0)]),
        ]);

        let aligned = align_common(&input);

        let tickers: Vec<&str> = aligned.tickers().map(Ticker::as_str).collect();
        assert_eq!(tickers, vec!["AAA", "BBB"]);
        assert_eq!(aligned.timestamps.len(), 2);
    }

    #[test]
    fn common_alignment_prefers_the_larger_grid_between_equal_groups() {
        let input = map(vec![
            ("XXX", vec![("a", 1.0), ("b", 2.0), ("c", 3.0), ("d", 4.0), ("e", 5.0)]),
            ("YYY", vec![("a", 2.0), ("b", 1.0)]),
            ("ZZZ", vec![("c", 7.0), ("d", 8.0), ("e", 6.0)]),
        ]);

        let aligned = align_common(&input);

        let tickers: Vec<&str> = aligned.tickers().map(Ticker::as_str).collect();
        assert_eq!(tickers, vec!["XXX", "ZZZ"]);
        assert_eq!(aligned.timestamps, vec!["c", "d", "e"]);
        assert_eq!(aligned.get(&ticker("XXX")), Some(&[3.0, 4.0, 5.0][..]));
    }

    #[test]
    fn common_alignment_breaks_full_ties_by_earliest_start() {
        let input = map(vec![
            ("AAA", vec![("a", 1.0), ("b", 2.0), ("c", 3.0)]),
            ("BBB", vec![("a", 4.0), ("b", 5.0)]),
            ("CCC", vec![("b", 6.0), ("c", 7.0)]),
        ]);

        let aligned = align_common(&input);

        let tickers: Vec<&str> = aligned.tickers().map(Ticker::as_str).collect();
        assert_eq!(tickers, vec!["AAA", "BBB"]);
        assert_eq!(aligned.timestamps, vec!["a", "b"]);
    }

    #[test]
    fn common_alignment_is_empty_without_overlap() {
        let input = map(vec![
            ("AAA", vec![("t1", 1.0), ("t2", 2.0)]),
            ("BBB", vec![("t3", 3.0), ("t4", 5.0)]),
        ]);

        assert!(align_common(&input).is_empty());
    }

    #[test]
    fn lone_usable_ticker_is_kept() {
        let input = map(vec![
            ("AAA", vec![("t1", 1.0), ("t2", 2.0)]),
            ("BBB", vec![("t1", f64::NAN)]),
        ]);

        let aligned = align_common(&input);

        assert_eq!(aligned.tickers().count(), 1);
        assert_eq!(aligned.timestamps, vec!["t1", "t2"]);
    }
}
