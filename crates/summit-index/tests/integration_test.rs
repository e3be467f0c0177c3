//! End-to-end tests of index construction.

use approx::assert_relative_eq;
use chrono::NaiveDate;
use rstest::rstest;
use summit_data::{InstrumentData, PricePoint, PriceHistory, SplitEvent};
use summit_index::{IndexConfig, IndexEngine, WeightPolicy};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn instrument(ticker: &str, closes: &[(NaiveDate, f64)], shares: f64) -> InstrumentData {
    let points = closes.iter().map(|&(d, c)| PricePoint::new(d, c)).collect();
    InstrumentData::new(
        ticker,
        format!("{} Corp", ticker),
        PriceHistory::new(ticker, points).unwrap(),
        Some(shares),
    )
}

#[test]
fn test_split_continuity_end_to_end() {
    let a = instrument(
        "A",
        &[(ymd(2024, 5, 1), 100.0), (ymd(2024, 6, 2), 50.0)],
        1_000_000.0,
    )
    .with_splits(vec![SplitEvent::new(ymd(2024, 6, 1), 2.0)]);

    let engine = IndexEngine::new(IndexConfig::new(10, ymd(2024, 1, 1), ymd(2025, 1, 1))).unwrap();
    let (run, rejected) = engine.run(&[a]);

    assert!(rejected.is_empty());
    let caps: Vec<_> = run.market_caps.records().iter().map(|r| r.market_cap).collect();
    assert_eq!(caps, vec![50_000_000, 50_000_000]);
}

#[test]
fn test_composition_change_scenario() {
    let d1 = ymd(2025, 1, 2);
    let d2 = ymd(2025, 1, 3);
    let instruments = vec![
        instrument("A", &[(d1, 100.0), (d2, 100.0)], 1_000.0),
        instrument("B", &[(d1, 90.0), (d2, 90.0)], 1_000.0),
        instrument("C", &[(d1, 80.0), (d2, 10.0)], 1_000.0),
        instrument("D", &[(d1, 10.0), (d2, 85.0)], 1_000.0),
    ];

    let engine = IndexEngine::new(IndexConfig::new(3, ymd(2025, 1, 1), ymd(2025, 2, 1))).unwrap();
    let (run, _) = engine.run(&instruments);

    assert_eq!(run.changes.len(), 1);
    let change = &run.changes[0];
    assert_eq!(change.date, d2);
    assert_eq!(change.added_joined(), "D");
    assert_eq!(change.removed_joined(), "C");
}

#[rstest]
#[case(WeightPolicy::EqualBySlot, 2.0 / 3.0)]
#[case(WeightPolicy::EqualByCount, 1.0)]
fn test_weight_sum_with_short_slate(#[case] policy: WeightPolicy, #[case] expected: f64) {
    let d1 = ymd(2025, 1, 2);
    let instruments = vec![
        instrument("A", &[(d1, 100.0)], 1_000.0),
        instrument("B", &[(d1, 90.0)], 1_000.0),
    ];

    let config = IndexConfig::new(3, ymd(2025, 1, 1), ymd(2025, 2, 1)).with_weighting(policy);
    let (run, _) = IndexEngine::new(config).unwrap().run(&instruments);

    let day = run.composition.on(d1).unwrap();
    assert_eq!(day.members.len(), 2);
    assert_relative_eq!(day.total_weight(), expected, epsilon = 1e-12);
    assert!(day.total_weight() <= 1.0 + 1e-12);
}

#[test]
fn test_performance_over_run() {
    let days = [ymd(2025, 1, 2), ymd(2025, 1, 3), ymd(2025, 1, 6)];
    let instruments = vec![
        instrument("A", &[(days[0], 100.0), (days[1], 110.0), (days[2], 121.0)], 1_000.0),
        instrument("B", &[(days[0], 50.0), (days[1], 49.0), (days[2], 49.0)], 1_000.0),
    ];

    let engine = IndexEngine::new(IndexConfig::new(2, ymd(2025, 1, 1), ymd(2025, 2, 1))).unwrap();
    let (run, _) = engine.run(&instruments);

    assert_eq!(run.performance.len(), 3);
    assert_eq!(run.performance[0].cumulative_value, 1.0);
    assert_relative_eq!(run.performance[1].daily_return, 0.04, epsilon = 1e-12);
    assert_relative_eq!(run.performance[1].cumulative_value, 1.04, epsilon = 1e-12);
    assert_relative_eq!(run.performance[2].daily_return, 0.05, epsilon = 1e-12);
    assert_relative_eq!(run.performance[2].cumulative_value, 1.04 * 1.05, epsilon = 1e-12);
}

#[test]
fn test_missing_shares_excluded_everywhere() {
    let d1 = ymd(2025, 1, 2);
    let mut no_shares = instrument("Z", &[(d1, 1_000.0)], 1.0);
    no_shares.shares_outstanding = None;
    let instruments = vec![instrument("A", &[(d1, 10.0)], 1.0), no_shares];

    let engine = IndexEngine::new(IndexConfig::new(5, ymd(2025, 1, 1), ymd(2025, 2, 1))).unwrap();
    let (run, rejected) = engine.run(&instruments);

    assert!(rejected.is_empty());
    assert!(run.market_caps.for_ticker("Z").next().is_none());
    assert!(run.composition.rows().all(|c| c.ticker != "Z"));
}
