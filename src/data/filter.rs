use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::model::OrderDataset;

// ---------------------------------------------------------------------------
// Filter criteria: what the sidebar currently selects
// ---------------------------------------------------------------------------

/// Inclusive date range over the purchase date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        DateRange { start, end }
    }

    /// An inverted range (`start > end`) matches nothing.
    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// The four sidebar selections. `None` on the string fields is the
/// "match all" sentinel: the field does not constrain the result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub order_status: Option<String>,
    pub payment_type: Option<String>,
    pub seller_city: Option<String>,
    pub date_range: DateRange,
}

impl FilterCriteria {
    /// Default criteria: every dropdown on "all", date range spanning the
    /// dataset's purchase-date bounds (or all representable dates when no row
    /// carries a timestamp).
    pub fn match_all(dataset: &OrderDataset) -> Self {
        let (start, end) = dataset
            .date_bounds
            .unwrap_or((NaiveDate::MIN, NaiveDate::MAX));
        FilterCriteria {
            order_status: None,
            payment_type: None,
            seller_city: None,
            date_range: DateRange::new(start, end),
        }
    }
}

// ---------------------------------------------------------------------------
// Row predicate
// ---------------------------------------------------------------------------

/// Return indices of rows that pass all active criteria, in original order.
///
/// A row is retained when every predicate holds:
/// * each string criterion is either unset ("all") or equal, case-sensitive;
/// * the purchase date falls inside the inclusive range. Rows without a
///   usable timestamp pass the date check so they still count toward totals.
///
/// An inverted range matches nothing; an empty result is valid and every
/// downstream aggregate handles it.
pub fn apply_filters(dataset: &OrderDataset, criteria: &FilterCriteria) -> Vec<usize> {
    if criteria.date_range.is_inverted() {
        log::debug!(
            "inverted date range {} > {}, matching no rows",
            criteria.date_range.start,
            criteria.date_range.end
        );
        return Vec::new();
    }

    dataset
        .orders
        .iter()
        .enumerate()
        .filter(|(_, row)| {
            if let Some(status) = &criteria.order_status {
                if row.order_status != *status {
                    return false;
                }
            }
            if let Some(payment) = &criteria.payment_type {
                if row.payment_type != *payment {
                    return false;
                }
            }
            if let Some(city) = &criteria.seller_city {
                if row.seller_city != *city {
                    return false;
                }
            }
            match row.purchase_date() {
                Some(date) => criteria.date_range.contains(date),
                None => true,
            }
        })
        .map(|(i, _)| i)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::OrderRecord;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn row(
        order: &str,
        status: &str,
        payment: &str,
        city: &str,
        day: Option<&str>,
    ) -> OrderRecord {
        OrderRecord {
            order_id: order.into(),
            customer_id: "c".into(),
            seller_id: "s".into(),
            seller_city: city.into(),
            order_status: status.into(),
            payment_type: payment.into(),
            payment_value: 1.0,
            product_category_name: None,
            purchase_ts: day.map(|d| date(d).and_hms_opt(9, 30, 0).unwrap()),
        }
    }

    fn sample_dataset() -> OrderDataset {
        OrderDataset::from_orders(vec![
            row("o1", "delivered", "credit_card", "sao paulo", Some("2024-01-01")),
            row("o2", "shipped", "boleto", "rio", Some("2024-01-20")),
            row("o3", "canceled", "voucher", "sao paulo", Some("2024-02-05")),
            row("o4", "delivered", "credit_card", "rio", None),
        ])
    }

    #[test]
    fn match_all_returns_every_row_in_order() {
        let ds = sample_dataset();
        let criteria = FilterCriteria::match_all(&ds);
        assert_eq!(apply_filters(&ds, &criteria), vec![0, 1, 2, 3]);
    }

    #[test]
    fn status_filter_is_exact_and_case_sensitive() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::match_all(&ds);
        criteria.order_status = Some("delivered".into());
        assert_eq!(apply_filters(&ds, &criteria), vec![0, 3]);

        criteria.order_status = Some("Delivered".into());
        assert!(apply_filters(&ds, &criteria).is_empty());
    }

    #[test]
    fn predicates_are_conjunctive() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::match_all(&ds);
        criteria.order_status = Some("delivered".into());
        criteria.seller_city = Some("rio".into());
        assert_eq!(apply_filters(&ds, &criteria), vec![3]);
    }

    #[test]
    fn date_range_is_inclusive_on_both_ends() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::match_all(&ds);
        criteria.date_range = DateRange::new(date("2024-01-01"), date("2024-01-20"));
        // o4 has no timestamp and passes the date check by policy.
        assert_eq!(apply_filters(&ds, &criteria), vec![0, 1, 3]);
    }

    #[test]
    fn inverted_range_matches_nothing() {
        let ds = sample_dataset();
        let mut criteria = FilterCriteria::match_all(&ds);
        criteria.date_range = DateRange::new(date("2024-02-01"), date("2024-01-01"));
        assert!(apply_filters(&ds, &criteria).is_empty());
    }

    #[test]
    fn empty_dataset_yields_empty_result() {
        let ds = OrderDataset::from_orders(Vec::new());
        let criteria = FilterCriteria::match_all(&ds);
        assert!(apply_filters(&ds, &criteria).is_empty());
    }
}
