use std::collections::{BTreeMap, HashSet};

use serde::Serialize;

use crate::data::model::OrderDataset;

// ---------------------------------------------------------------------------
// City and category panels
// ---------------------------------------------------------------------------
//
// Both panels read the *unfiltered* dataset: the source dashboard computes
// them outside the sidebar filters, and that asymmetry is kept on purpose.

/// One bar of the top-cities chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitySales {
    pub city: String,
    /// Distinct `order_id` count for the city.
    pub orders: u64,
}

/// One bar of the category chart for the leading city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    /// Occurrence count of the category among the city's rows.
    pub products: u64,
}

/// The `k` cities with the most distinct orders, descending, with city name
/// ascending as the tie-break.
pub fn top_cities(dataset: &OrderDataset, k: usize) -> Vec<CitySales> {
    let mut per_city: BTreeMap<&str, HashSet<&str>> = BTreeMap::new();
    for row in &dataset.orders {
        per_city
            .entry(&row.seller_city)
            .or_default()
            .insert(&row.order_id);
    }

    let mut out: Vec<CitySales> = per_city
        .into_iter()
        .map(|(city, orders)| CitySales {
            city: city.to_string(),
            orders: orders.len() as u64,
        })
        .collect();
    // Name-ascending order from the BTreeMap survives the stable sort.
    out.sort_by(|a, b| b.orders.cmp(&a.orders));
    out.truncate(k);
    out
}

/// Category occurrence counts for one city, descending, name ascending on
/// ties. Rows without a category are excluded.
pub fn top_categories_for_city(
    dataset: &OrderDataset,
    city: &str,
    k: usize,
) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for row in &dataset.orders {
        if row.seller_city != city {
            continue;
        }
        if let Some(category) = &row.product_category_name {
            *counts.entry(category).or_default() += 1;
        }
    }

    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, products)| CategoryCount {
            category: category.to_string(),
            products,
        })
        .collect();
    out.sort_by(|a, b| b.products.cmp(&a.products));
    out.truncate(k);
    out
}
