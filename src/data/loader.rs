use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDateTime;
use serde::Deserialize;
use thiserror::Error;

use super::model::{OrderDataset, OrderRecord};

/// Column names of the merged order export.
const REQUIRED_COLUMNS: [&str; 7] = [
    "order_id",
    "customer_id",
    "seller_id",
    "seller_city",
    "order_status",
    "payment_type",
    "payment_value",
];

/// Structural problems with the input file, as opposed to per-row parse
/// failures which carry `anyhow` context instead.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("input is missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: invalid payment_value '{value}'")]
    InvalidPayment { row: usize, value: String },
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load an order dataset from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`  – header row with the merged-export column names
/// * `.json` – records-oriented array, `df.to_json(orient='records')` style
pub fn load_file(path: &Path) -> Result<OrderDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV file")?;
            load_csv(file)
        }
        "json" => {
            let text = std::fs::read_to_string(path).context("reading JSON file")?;
            load_json(&text)
        }
        other => Err(LoadError::UnsupportedExtension(other.to_string()).into()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse the merged order export from any reader.
///
/// Identifier and payment columns are required and strict; the timestamp and
/// category columns are lenient (blank or unparseable → `None`).
pub fn load_csv<R: std::io::Read>(reader: R) -> Result<OrderDataset> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let col = |name: &'static str| -> Result<usize, LoadError> {
        headers
            .iter()
            .position(|h| h == name)
            .ok_or(LoadError::MissingColumn(name))
    };

    let mut idx = [0usize; 7];
    for (slot, name) in idx.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = col(name)?;
    }
    let [order_idx, customer_idx, seller_idx, city_idx, status_idx, payment_idx, value_idx] = idx;
    // Optional columns.
    let category_idx = headers.iter().position(|h| h == "product_category_name");
    let ts_idx = headers.iter().position(|h| h == "order_purchase_timestamp");

    let mut orders = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        let raw_value = field(value_idx);
        let payment_value: f64 = raw_value.trim().parse().map_err(|_| {
            LoadError::InvalidPayment {
                row: row_no,
                value: raw_value.clone(),
            }
        })?;

        let category = category_idx.map(field).filter(|s| !s.is_empty());
        let purchase_ts = ts_idx.and_then(|i| parse_timestamp(record.get(i).unwrap_or(""), row_no));

        orders.push(OrderRecord {
            order_id: field(order_idx),
            customer_id: field(customer_idx),
            seller_id: field(seller_idx),
            seller_city: field(city_idx),
            order_status: field(status_idx),
            payment_type: field(payment_idx),
            payment_value,
            product_category_name: category,
            purchase_ts,
        });
    }

    log::info!("loaded {} order rows from CSV", orders.len());
    Ok(OrderDataset::from_orders(orders))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// One record of the `orient='records'` JSON export; timestamps arrive as
/// strings and are parsed with the same leniency as the CSV path.
#[derive(Debug, Deserialize)]
struct RawOrder {
    order_id: String,
    customer_id: String,
    seller_id: String,
    seller_city: String,
    order_status: String,
    payment_type: String,
    payment_value: f64,
    #[serde(default)]
    product_category_name: Option<String>,
    #[serde(default)]
    order_purchase_timestamp: Option<String>,
}

/// Parse a records-oriented JSON array of order rows.
pub fn load_json(text: &str) -> Result<OrderDataset> {
    let raw: Vec<RawOrder> = serde_json::from_str(text).context("parsing JSON records")?;

    let orders: Vec<OrderRecord> = raw
        .into_iter()
        .enumerate()
        .map(|(row_no, r)| OrderRecord {
            order_id: r.order_id,
            customer_id: r.customer_id,
            seller_id: r.seller_id,
            seller_city: r.seller_city,
            order_status: r.order_status,
            payment_type: r.payment_type,
            payment_value: r.payment_value,
            product_category_name: r.product_category_name.filter(|s| !s.is_empty()),
            purchase_ts: r
                .order_purchase_timestamp
                .as_deref()
                .and_then(|s| parse_timestamp(s, row_no)),
        })
        .collect();

    log::info!("loaded {} order rows from JSON", orders.len());
    Ok(OrderDataset::from_orders(orders))
}

// ---------------------------------------------------------------------------
// Timestamp parsing
// ---------------------------------------------------------------------------

const TS_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d"];

/// Lenient timestamp parse: `None` on blank or unrecognized input. Rows with
/// a `None` timestamp stay in the dataset but drop out of date groupings.
fn parse_timestamp(s: &str, row_no: usize) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    for fmt in TS_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ts);
        }
        // Date-only inputs have no time component to parse.
        if let Ok(date) = chrono::NaiveDate::parse_from_str(s, fmt) {
            return date.and_hms_opt(0, 0, 0);
        }
    }
    log::warn!("row {row_no}: unparseable order_purchase_timestamp '{s}'");
    None
}
