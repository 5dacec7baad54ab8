use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::data::model::OrderDataset;

/// Per-customer Recency/Frequency/Monetary aggregate over the filtered set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmRecord {
    pub customer_id: String,
    /// Whole days between the reference instant and the customer's latest
    /// purchase. Negative when the reference precedes the data; `i64::MAX`
    /// when none of the customer's rows carries a timestamp.
    pub recency_days: i64,
    /// Row count for the customer in the filtered set.
    pub frequency: u64,
    /// Summed `payment_value` for the customer in the filtered set.
    pub monetary: f64,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// One record per distinct customer in the filtered set, in first-seen row
/// order. Recomputed from scratch on every filter change; never persisted.
pub fn compute_rfm(
    dataset: &OrderDataset,
    indices: &[usize],
    reference: NaiveDateTime,
) -> Vec<RfmRecord> {
    let mut by_customer: HashMap<&str, usize> = HashMap::new();
    let mut records: Vec<RfmRecord> = Vec::new();
    let mut latest: Vec<Option<NaiveDateTime>> = Vec::new();

    for &i in indices {
        let row = &dataset.orders[i];
        let slot = *by_customer.entry(&row.customer_id).or_insert_with(|| {
            records.push(RfmRecord {
                customer_id: row.customer_id.clone(),
                recency_days: i64::MAX,
                frequency: 0,
                monetary: 0.0,
            });
            latest.push(None);
            records.len() - 1
        });

        records[slot].frequency += 1;
        records[slot].monetary += row.payment_value;
        if let Some(ts) = row.purchase_ts {
            latest[slot] = Some(match latest[slot] {
                None => ts,
                Some(prev) => prev.max(ts),
            });
        }
    }

    for (record, last_purchase) in records.iter_mut().zip(latest) {
        if let Some(ts) = last_purchase {
            // Truncating whole-day difference.
            record.recency_days = (reference - ts).num_days();
        }
    }
    records
}

// ---------------------------------------------------------------------------
// Top-N selectors
// ---------------------------------------------------------------------------
//
// All three use stable sorts over the first-seen-ordered input, so the
// first-seen customer wins any tie.

/// The `k` most recent purchasers (smallest recency first).
pub fn top_by_recency(rfm: &[RfmRecord], k: usize) -> Vec<RfmRecord> {
    let mut out = rfm.to_vec();
    out.sort_by_key(|r| r.recency_days);
    out.truncate(k);
    out
}

/// The `k` most frequent purchasers (largest frequency first).
pub fn top_by_frequency(rfm: &[RfmRecord], k: usize) -> Vec<RfmRecord> {
    let mut out = rfm.to_vec();
    out.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    out.truncate(k);
    out
}

/// The `k` biggest spenders (largest monetary first).
pub fn top_by_monetary(rfm: &[RfmRecord], k: usize) -> Vec<RfmRecord> {
    let mut out = rfm.to_vec();
    out.sort_by(|a, b| b.monetary.total_cmp(&a.monetary));
    out.truncate(k);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{all_indices, reference_instant, sample_dataset};

    #[test]
    fn one_record_per_customer_in_first_seen_order() {
        let ds = sample_dataset();
        let rfm = compute_rfm(&ds, &all_indices(&ds), reference_instant());
        let ids: Vec<&str> = rfm.iter().map(|r| r.customer_id.as_str()).collect();
        assert_eq!(ids, ["c1", "c2"]);
        // Frequencies sum to the filtered row count.
        let total: u64 = rfm.iter().map(|r| r.frequency).sum();
        assert_eq!(total as usize, ds.len());
    }

    #[test]
    fn recency_uses_latest_purchase() {
        let ds = sample_dataset();
        let rfm = compute_rfm(&ds, &all_indices(&ds), reference_instant());
        // c1's latest purchase is 2024-02-10; reference is 2024-03-01 00:00.
        assert_eq!(rfm[0].recency_days, 19);
        // c2 bought once on 2024-01-20.
        assert_eq!(rfm[1].recency_days, 40);
    }

    #[test]
    fn recency_can_go_negative() {
        let ds = sample_dataset();
        let early = chrono::NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let rfm = compute_rfm(&ds, &all_indices(&ds), early);
        assert!(rfm[0].recency_days < 0);
    }

    #[test]
    fn customer_without_timestamps_sorts_last_by_recency() {
        let mut ds = sample_dataset();
        for row in &mut ds.orders {
            if row.customer_id == "c2" {
                row.purchase_ts = None;
            }
        }
        let ds = crate::data::model::OrderDataset::from_orders(ds.orders);
        let rfm = compute_rfm(&ds, &all_indices(&ds), reference_instant());
        let top = top_by_recency(&rfm, 5);
        assert_eq!(top.last().unwrap().customer_id, "c2");
        assert_eq!(top.last().unwrap().recency_days, i64::MAX);
    }

    #[test]
    fn monetary_and_frequency_aggregate_per_customer() {
        let ds = sample_dataset();
        let rfm = compute_rfm(&ds, &all_indices(&ds), reference_instant());
        assert_eq!(rfm[0].frequency, 3);
        assert!((rfm[0].monetary - 325.0).abs() < 1e-9);
        assert_eq!(rfm[1].frequency, 1);
        assert!((rfm[1].monetary - 50.0).abs() < 1e-9);
    }

    #[test]
    fn top_lists_sort_and_truncate() {
        let ds = sample_dataset();
        let rfm = compute_rfm(&ds, &all_indices(&ds), reference_instant());

        let by_freq = top_by_frequency(&rfm, 5);
        assert_eq!(by_freq.len(), 2);
        assert!(by_freq[0].frequency >= by_freq[1].frequency);

        let by_money = top_by_monetary(&rfm, 1);
        assert_eq!(by_money.len(), 1);
        assert_eq!(by_money[0].customer_id, "c1");
    }

    #[test]
    fn ties_keep_first_seen_customer_first() {
        let rfm = vec![
            RfmRecord {
                customer_id: "a".into(),
                recency_days: 3,
                frequency: 2,
                monetary: 10.0,
            },
            RfmRecord {
                customer_id: "b".into(),
                recency_days: 3,
                frequency: 2,
                monetary: 10.0,
            },
        ];
        assert_eq!(top_by_recency(&rfm, 2)[0].customer_id, "a");
        assert_eq!(top_by_frequency(&rfm, 2)[0].customer_id, "a");
        assert_eq!(top_by_monetary(&rfm, 2)[0].customer_id, "a");
    }
}
