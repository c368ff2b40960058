use std::borrow::Cow;

use tracing::debug;

use crate::{Lookback, PriceSeriesMap, TimeSeries, UtcDateTime};

/// Trims every series to the trailing `lookback` window.
///
/// The window ends at the latest parseable timestamp across all series and is
/// inclusive at both ends. With a bounded window, points whose timestamp does
/// not parse are dropped. [`Lookback::Max`] borrows the input untouched.
pub fn apply_lookback(input: &PriceSeriesMap, lookback: Lookback) -> Cow<'_, PriceSeriesMap> {
    let Some(days) = lookback.days() else {
        return Cow::Borrowed(input);
    };

    let parsed: Vec<Vec<Option<UtcDateTime>>> = input
        .values()
        .map(|series| {
            series
                .points
                .iter()
                .map(|point| UtcDateTime::parse(&point.timestamp).ok())
                .collect()
        })
        .collect();

    let Some(latest) = parsed.iter().flatten().flatten().max().copied() else {
        debug!(%lookback, "no parseable timestamps, window keeps nothing");
        return Cow::Owned(
            input
                .keys()
                .map(|ticker| (ticker.clone(), TimeSeries::default()))
                .collect(),
        );
    };
    let start = latest.saturating_sub_days(days);

    let trimmed = input
        .iter()
        .zip(parsed)
        .map(|((ticker, series), instants)| {
            let kept: TimeSeries = series
                .points
                .iter()
                .zip(instants)
                .filter(|(_, instant)| instant.is_some_and(|at| at >= start && at <= latest))
                .map(|(point, _)| point.clone())
                .collect();
            debug!(
                ticker = %ticker,
                before = series.len(),
                after = kept.len(),
                %lookback,
                "applied lookback window"
            );
            (ticker.clone(), kept)
        })
        .collect();

    Cow::Owned(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Ticker;

    fn input() -> PriceSeriesMap {
        let aapl: TimeSeries = vec![
            ("2024-01-01", 1.0),
            ("2024-03-01", 2.0),
            ("2024-03-20", 3.0),
            ("not-a-date", 4.0),
        ]
        .into_iter()
        .collect();
        let msft: TimeSeries = vec![("2024-03-25T15:30:00Z", 5.0), ("2024-02-01", 6.0)]
            .into_iter()
            .collect();

        [
            (Ticker::parse("AAPL").expect("valid"), aapl),
            (Ticker::parse("MSFT").expect("valid"), msft),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn max_lookback_borrows_input() {
        let input = input();
        assert!(matches!(apply_lookback(&input, Lookback::Max), Cow::Borrowed(_)));
    }

    #[test]
    fn bounded_lookback_keeps_trailing_window() {
        let input = input();
        let trimmed = apply_lookback(&input, Lookback::OneMonth);

        let aapl = &trimmed[&Ticker::parse("AAPL").expect("valid")];
        let prices: Vec<f64> = aapl.points.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![2.0, 3.0]);

        let msft = &trimmed[&Ticker::parse("MSFT").expect("valid")];
        assert_eq!(msft.points.len(), 1);
        assert_eq!(msft.points[0].price, 5.0);
    }

    #[test]
    fn unparseable_input_keeps_tickers_with_empty_series() {
        let input: PriceSeriesMap = [(
            Ticker::parse("AAPL").expect("valid"),
            vec![("garbage", 1.0)].into_iter().collect::<TimeSeries>(),
        )]
        .into_iter()
        .collect();

        let trimmed = apply_lookback(&input, Lookback::OneWeek);
        assert_eq!(trimmed.len(), 1);
        assert!(trimmed.values().all(TimeSeries::is_empty));
    }
}
