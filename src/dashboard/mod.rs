/// Dashboard layer: the pure recomputation pipeline behind every panel.
///
/// ```text
///   OrderDataset + FilterCriteria
///        │ apply_filters
///        ▼
///   retained indices ──► scorecard ─┐
///        │                payment   │
///        │                trend     ├──► DashboardView
///        │                rfm       │
///        ▼                          │
///   full dataset ──────► geo ───────┘   (city panels ignore the filters)
/// ```
///
/// Every filter change recomputes the whole view from the immutable snapshot;
/// nothing is cached across calls and nothing is mutated in place.

pub mod geo;
pub mod payment;
pub mod rfm;
pub mod scorecard;
pub mod trend;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::data::filter::{apply_filters, FilterCriteria};
use crate::data::model::OrderDataset;

use self::geo::{CategoryCount, CitySales};
use self::payment::PaymentShare;
use self::rfm::RfmRecord;
use self::scorecard::Scorecard;
use self::trend::TrendPoint;

/// Entries in each RFM top list.
pub const RFM_TOP_N: usize = 5;
/// Entries in the top-cities panel.
pub const CITY_TOP_N: usize = 10;
/// Entries in the category panel.
pub const CATEGORY_TOP_N: usize = 10;

// ---------------------------------------------------------------------------
// View model
// ---------------------------------------------------------------------------

/// Everything the rendering layer needs for one draw, as plain data.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Row count after filtering (the sidebar figure).
    pub filtered_rows: u64,
    pub scorecard: Scorecard,
    pub payment_distribution: Vec<PaymentShare>,
    pub monthly_trend: Vec<TrendPoint>,
    pub top_recency: Vec<RfmRecord>,
    pub top_frequency: Vec<RfmRecord>,
    pub top_monetary: Vec<RfmRecord>,
    /// Computed over the unfiltered dataset.
    pub top_cities: Vec<CitySales>,
    /// City the category panel is scoped to: the first entry of `top_cities`.
    pub leading_city: Option<String>,
    pub top_categories: Vec<CategoryCount>,
}

/// Recompute the full dashboard for one set of criteria.
///
/// Pure: same snapshot, criteria, and reference instant always produce the
/// same view. An empty dataset or an all-excluding filter yields zeroed
/// scorecards and empty series, never an error.
pub fn render(
    dataset: &OrderDataset,
    criteria: &FilterCriteria,
    reference: NaiveDateTime,
) -> DashboardView {
    let indices = apply_filters(dataset, criteria);
    render_filtered(dataset, &indices, reference)
}

/// Same as [`render`] when the caller already holds the filtered indices
/// (the session state caches them between interactions).
pub fn render_filtered(
    dataset: &OrderDataset,
    indices: &[usize],
    reference: NaiveDateTime,
) -> DashboardView {
    let rfm = rfm::compute_rfm(dataset, indices, reference);
    let top_cities = geo::top_cities(dataset, CITY_TOP_N);
    let leading_city = top_cities.first().map(|c| c.city.clone());
    let top_categories = leading_city
        .as_deref()
        .map(|city| geo::top_categories_for_city(dataset, city, CATEGORY_TOP_N))
        .unwrap_or_default();

    DashboardView {
        filtered_rows: indices.len() as u64,
        scorecard: scorecard::compute_scorecard(dataset, indices),
        payment_distribution: payment::payment_distribution(dataset, indices),
        monthly_trend: trend::monthly_trend(dataset, indices),
        top_recency: rfm::top_by_recency(&rfm, RFM_TOP_N),
        top_frequency: rfm::top_by_frequency(&rfm, RFM_TOP_N),
        top_monetary: rfm::top_by_monetary(&rfm, RFM_TOP_N),
        top_cities,
        leading_city,
        top_categories,
    }
}

// ---------------------------------------------------------------------------
// Shared test fixtures
// ---------------------------------------------------------------------------
