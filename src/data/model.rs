use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// OrderRecord – one row of the merged order table
// ---------------------------------------------------------------------------

/// A single order-payment row of the source table. Immutable once loaded.
///
/// `order_id` is unique per logical order but not per row: an order paid in
/// several installments appears once per payment row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub customer_id: String,
    pub seller_id: String,
    pub seller_city: String,
    pub order_status: String,
    pub payment_type: String,
    pub payment_value: f64,
    /// Missing in the source data for some rows.
    pub product_category_name: Option<String>,
    /// `None` when the source timestamp was absent or unparseable; such rows
    /// still count toward totals but are skipped by date-based groupings.
    pub purchase_ts: Option<NaiveDateTime>,
}

impl OrderRecord {
    /// Date portion of the purchase timestamp, used for range filtering.
    pub fn purchase_date(&self) -> Option<NaiveDate> {
        self.purchase_ts.map(|ts| ts.date())
    }
}

// ---------------------------------------------------------------------------
// OrderDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed sidebar indexes.
///
/// The unique-value sets are what a filter dropdown enumerates; the date
/// bounds are the default date-range selection. All of it is derived once at
/// load time and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct OrderDataset {
    /// All rows, in source order.
    pub orders: Vec<OrderRecord>,
    /// Sorted distinct `order_status` values.
    pub statuses: BTreeSet<String>,
    /// Sorted distinct `payment_type` values.
    pub payment_types: BTreeSet<String>,
    /// Sorted distinct `seller_city` values.
    pub seller_cities: BTreeSet<String>,
    /// Earliest and latest purchase dates, if any row has a timestamp.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,
}

impl OrderDataset {
    /// Build the sidebar indexes from the loaded rows.
    pub fn from_orders(orders: Vec<OrderRecord>) -> Self {
        let mut statuses = BTreeSet::new();
        let mut payment_types = BTreeSet::new();
        let mut seller_cities = BTreeSet::new();
        let mut date_bounds: Option<(NaiveDate, NaiveDate)> = None;

        for row in &orders {
            statuses.insert(row.order_status.clone());
            payment_types.insert(row.payment_type.clone());
            seller_cities.insert(row.seller_city.clone());

            if let Some(date) = row.purchase_date() {
                date_bounds = Some(match date_bounds {
                    None => (date, date),
                    Some((lo, hi)) => (lo.min(date), hi.max(date)),
                });
            }
        }

        OrderDataset {
            orders,
            statuses,
            payment_types,
            seller_cities,
            date_bounds,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.orders.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn row(status: &str, city: &str, date: Option<&str>) -> OrderRecord {
        OrderRecord {
            order_id: "o1".into(),
            customer_id: "c1".into(),
            seller_id: "s1".into(),
            seller_city: city.into(),
            order_status: status.into(),
            payment_type: "credit_card".into(),
            payment_value: 10.0,
            product_category_name: None,
            purchase_ts: date.map(|d| {
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap()
            }),
        }
    }

    #[test]
    fn indexes_collect_sorted_unique_values() {
        let ds = OrderDataset::from_orders(vec![
            row("delivered", "sao paulo", Some("2024-03-01")),
            row("shipped", "rio", Some("2024-01-15")),
            row("delivered", "rio", None),
        ]);
        assert_eq!(
            ds.statuses.iter().collect::<Vec<_>>(),
            ["delivered", "shipped"]
        );
        assert_eq!(
            ds.seller_cities.iter().collect::<Vec<_>>(),
            ["rio", "sao paulo"]
        );
        assert_eq!(
            ds.date_bounds,
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
            ))
        );
    }

    #[test]
    fn no_timestamps_means_no_bounds() {
        let ds = OrderDataset::from_orders(vec![row("delivered", "rio", None)]);
        assert_eq!(ds.date_bounds, None);
        assert_eq!(ds.len(), 1);
    }
}
