//! Daily top-N constituent selection.

use crate::market_cap::{MarketCapRecord, MarketCapSeries};
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Select the `top_n` largest instruments by market cap on every date.
///
/// Ranking is by market cap descending, then ticker ascending. Dates with
/// fewer than `top_n` instruments keep all of them.
pub fn select_top_n(
    series: &MarketCapSeries,
    top_n: usize,
) -> BTreeMap<NaiveDate, Vec<&MarketCapRecord>> {
    let mut by_date: BTreeMap<NaiveDate, Vec<&MarketCapRecord>> = BTreeMap::new();
    for record in series.records() {
        by_date.entry(record.date).or_default().push(record);
    }

    for records in by_date.values_mut() {
        records.sort_by(|a, b| {
            b.market_cap
                .cmp(&a.market_cap)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });
        records.truncate(top_n);
    }

    by_date
}
