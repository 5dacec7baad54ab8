use std::collections::HashSet;

use serde::Serialize;

use crate::data::model::OrderDataset;

/// The five top-line metrics shown above the charts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scorecard {
    /// Distinct `order_id` count.
    pub total_orders: u64,
    /// Sum of `payment_value` over all rows. Orders with several payment rows
    /// are summed in full, not deduplicated, matching the source data model.
    pub total_revenue: f64,
    /// Distinct `customer_id` count.
    pub total_customers: u64,
    /// Distinct `seller_id` count.
    pub total_sellers: u64,
    /// `total_revenue / total_orders`, or 0 when there are no orders.
    pub average_order_value: f64,
}

/// Compute the scorecard over the filtered rows. Pure; an empty selection
/// yields all zeros.
pub fn compute_scorecard(dataset: &OrderDataset, indices: &[usize]) -> Scorecard {
    let mut orders: HashSet<&str> = HashSet::new();
    let mut customers: HashSet<&str> = HashSet::new();
    let mut sellers: HashSet<&str> = HashSet::new();
    let mut revenue = 0.0;

    for &i in indices {
        let row = &dataset.orders[i];
        orders.insert(&row.order_id);
        customers.insert(&row.customer_id);
        sellers.insert(&row.seller_id);
        revenue += row.payment_value;
    }

    let total_orders = orders.len() as u64;
    let average_order_value = if total_orders > 0 {
        revenue / total_orders as f64
    } else {
        0.0
    };

    Scorecard {
        total_orders,
        total_revenue: revenue,
        total_customers: customers.len() as u64,
        total_sellers: sellers.len() as u64,
        average_order_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{all_indices, sample_dataset};

    #[test]
    fn counts_distinct_ids_and_sums_every_payment_row() {
        let ds = sample_dataset();
        let card = compute_scorecard(&ds, &all_indices(&ds));
        // o1 appears twice (two payment rows) but counts once.
        assert_eq!(card.total_orders, 3);
        assert_eq!(card.total_customers, 2);
        assert_eq!(card.total_sellers, 2);
        // Revenue keeps both payment rows of o1.
        assert!((card.total_revenue - 375.0).abs() < 1e-9);
        assert!((card.average_order_value - 125.0).abs() < 1e-9);
    }

    #[test]
    fn empty_selection_is_all_zeros() {
        let ds = sample_dataset();
        let card = compute_scorecard(&ds, &[]);
        assert_eq!(card, Scorecard::default());
        assert_eq!(card.average_order_value, 0.0);
    }

    #[test]
    fn aov_matches_revenue_over_orders() {
        let ds = sample_dataset();
        let card = compute_scorecard(&ds, &all_indices(&ds));
        assert!(
            (card.average_order_value - card.total_revenue / card.total_orders as f64).abs()
                < 1e-9
        );
    }
}
