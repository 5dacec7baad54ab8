use std::collections::BTreeMap;

use serde::Serialize;

use crate::data::model::OrderDataset;

/// One bar of the payment-type chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentShare {
    pub payment_type: String,
    pub rows: u64,
}

/// Row counts per payment type over the filtered set, descending by count
/// with payment-type name ascending as the tie-break.
pub fn payment_distribution(dataset: &OrderDataset, indices: &[usize]) -> Vec<PaymentShare> {
    let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
    for &i in indices {
        *counts.entry(&dataset.orders[i].payment_type).or_default() += 1;
    }

    let mut shares: Vec<PaymentShare> = counts
        .into_iter()
        .map(|(payment_type, rows)| PaymentShare {
            payment_type: payment_type.to_string(),
            rows,
        })
        .collect();
    // BTreeMap already yields name-ascending order; the stable sort keeps
    // that order inside equal counts.
    shares.sort_by(|a, b| b.rows.cmp(&a.rows));
    shares
}
