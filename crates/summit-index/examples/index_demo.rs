//! Build a small equal-weight index from in-memory data.
//!
//! Run with: `cargo run -p summit-index --example index_demo`

use chrono::NaiveDate;
use summit_data::{InstrumentData, PricePoint, PriceHistory, SplitEvent};
use summit_index::{IndexConfig, IndexEngine};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let day = |d: u32| NaiveDate::from_ymd_opt(2024, 6, d).ok_or("invalid date");
    let dates = [day(6)?, day(7)?, day(10)?, day(11)?];

    let universe = [
        ("NVDA", [1209.98, 1208.88, 121.79, 120.91], 24.5e9, Some((day(10)?, 10.0))),
        ("AAPL", [194.0, 194.4, 195.9, 194.5], 15.2e9, None),
        ("MSFT", [413.5, 416.1, 424.0, 424.5], 7.4e9, None),
        ("GOOGL", [173.2, 175.1, 177.1, 176.1], 12.3e9, None),
    ];

    let instruments = universe
        .iter()
        .map(|&(ticker, closes, shares, split)| {
            let points = dates
                .iter()
                .zip(closes)
                .map(|(&d, c)| PricePoint::new(d, c))
                .collect();
            let splits = split
                .map(|(d, r)| vec![SplitEvent::new(d, r)])
                .unwrap_or_default();
            let prices = PriceHistory::new(ticker, points)?;
            Ok(InstrumentData::new(ticker, ticker, prices, Some(shares)).with_splits(splits))
        })
        .collect::<Result<Vec<_>, summit_data::DataError>>()?;

    let engine = IndexEngine::new(IndexConfig::new(3, day(1)?, day(30)?))?;
    let (run, _) = engine.run(&instruments);

    println!("Composition:");
    for snapshot in run.composition.days() {
        let tickers: Vec<_> = snapshot.members.iter().map(|m| m.ticker.as_str()).collect();
        println!("  {}  {}", snapshot.date, tickers.join(", "));
    }

    println!("\nChanges:");
    for change in &run.changes {
        println!(
            "  {}  +[{}]  -[{}]",
            change.date,
            change.added_joined(),
            change.removed_joined()
        );
    }

    println!("\nPerformance:");
    for record in &run.performance {
        println!(
            "  {}  {:>+8.4}%  {:.6}",
            record.date,
            record.daily_return * 100.0,
            record.cumulative_value
        );
    }

    Ok(())
}
