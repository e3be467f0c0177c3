//! Polars DataFrame views of index run tables.

use chrono::NaiveDate;
use polars::prelude::*;
use summit_index::{Composition, CompositionChange, IndexPerformanceRecord, MarketCapSeries};

fn epoch_days(dates: impl Iterator<Item = NaiveDate>) -> Vec<i32> {
    let epoch = NaiveDate::default();
    dates.map(|d| (d - epoch).num_days() as i32).collect()
}

// Date columns are built as epoch days and cast to the Date logical type.
fn with_dates(columns: Vec<Column>) -> PolarsResult<DataFrame> {
    DataFrame::new(columns)?
        .lazy()
        .with_column(col("date").cast(DataType::Date))
        .collect()
}

/// `date, ticker, close_price, market_cap`
pub fn market_caps_frame(series: &MarketCapSeries) -> PolarsResult<DataFrame> {
    let records = series.records();
    with_dates(vec![
        Series::new("date".into(), epoch_days(records.iter().map(|r| r.date))).into(),
        Series::new(
            "ticker".into(),
            records.iter().map(|r| r.ticker.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "close_price".into(),
            records.iter().map(|r| r.close_price).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "market_cap".into(),
            records.iter().map(|r| r.market_cap).collect::<Vec<_>>(),
        )
        .into(),
    ])
}

/// `date, ticker, market_cap, weight`
pub fn composition_frame(composition: &Composition) -> PolarsResult<DataFrame> {
    let rows: Vec<_> = composition.rows().collect();
    with_dates(vec![
        Series::new("date".into(), epoch_days(rows.iter().map(|r| r.date))).into(),
        Series::new(
            "ticker".into(),
            rows.iter().map(|r| r.ticker.as_str()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "market_cap".into(),
            rows.iter().map(|r| r.market_cap).collect::<Vec<_>>(),
        )
        .into(),
        Series::new("weight".into(), rows.iter().map(|r| r.weight).collect::<Vec<_>>()).into(),
    ])
}

/// `date, additions, removals, added_tickers, removed_tickers`
pub fn changes_frame(changes: &[CompositionChange]) -> PolarsResult<DataFrame> {
    with_dates(vec![
        Series::new("date".into(), epoch_days(changes.iter().map(|c| c.date))).into(),
        Series::new(
            "additions".into(),
            changes.iter().map(|c| c.additions() as u32).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "removals".into(),
            changes.iter().map(|c| c.removals() as u32).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "added_tickers".into(),
            changes.iter().map(|c| c.added_joined()).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "removed_tickers".into(),
            changes.iter().map(|c| c.removed_joined()).collect::<Vec<_>>(),
        )
        .into(),
    ])
}

/// `date, daily_return, cumulative_value`
pub fn performance_frame(performance: &[IndexPerformanceRecord]) -> PolarsResult<DataFrame> {
    with_dates(vec![
        Series::new("date".into(), epoch_days(performance.iter().map(|p| p.date))).into(),
        Series::new(
            "daily_return".into(),
            performance.iter().map(|p| p.daily_return).collect::<Vec<_>>(),
        )
        .into(),
        Series::new(
            "cumulative_value".into(),
            performance
                .iter()
                .map(|p| p.cumulative_value)
                .collect::<Vec<_>>(),
        )
        .into(),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use summit_index::MarketCapRecord;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    #[test]
    fn test_epoch_days() {
        let days = epoch_days([NaiveDate::from_ymd_opt(1970, 1, 2).unwrap()].into_iter());
        assert_eq!(days, vec![1]);
    }

    #[test]
    fn test_market_caps_frame() {
        let series = MarketCapSeries::from_records(vec![
            MarketCapRecord {
                date: date(2),
                ticker: "AAPL".to_string(),
                close_price: 243.85,
                market_cap: 100,
            },
            MarketCapRecord {
                date: date(3),
                ticker: "AAPL".to_string(),
                close_price: 243.36,
                market_cap: 99,
            },
        ]);

        let df = market_caps_frame(&series).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(
            df.get_column_names(),
            vec!["date", "ticker", "close_price", "market_cap"]
        );
        assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_performance_frame() {
        let records = vec![IndexPerformanceRecord {
            date: date(2),
            daily_return: 0.0,
            cumulative_value: 1.0,
        }];

        let df = performance_frame(&records).unwrap();
        assert_eq!(df.height(), 1);
        let values = df.column("cumulative_value").unwrap().f64().unwrap();
        assert_eq!(values.get(0), Some(1.0));
    }

    #[test]
    fn test_empty_changes_frame() {
        let df = changes_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 5);
    }
}
