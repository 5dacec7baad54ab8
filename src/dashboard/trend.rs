use std::collections::BTreeMap;
use std::fmt;

use chrono::Datelike;
use serde::Serialize;

use crate::data::model::OrderDataset;

// ---------------------------------------------------------------------------
// YearMonth – calendar-month bucket
// ---------------------------------------------------------------------------

/// A calendar year-month, ordered chronologically, displayed as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// One point of the monthly trend line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub month: YearMonth,
    pub rows: u64,
}

// ---------------------------------------------------------------------------
// Monthly trend
// ---------------------------------------------------------------------------

/// Row counts per calendar month of the purchase timestamp, ascending.
///
/// Counts rows, not distinct orders, matching the source chart. Months with
/// no rows are absent rather than zero-filled, and rows without a timestamp
/// are skipped entirely.
pub fn monthly_trend(dataset: &OrderDataset, indices: &[usize]) -> Vec<TrendPoint> {
    let mut counts: BTreeMap<YearMonth, u64> = BTreeMap::new();

    for &i in indices {
        if let Some(ts) = dataset.orders[i].purchase_ts {
            let key = YearMonth {
                year: ts.year(),
                month: ts.month(),
            };
            *counts.entry(key).or_default() += 1;
        }
    }

    counts
        .into_iter()
        .map(|(month, rows)| TrendPoint { month, rows })
        .collect()
}
