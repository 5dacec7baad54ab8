use chrono::NaiveDateTime;

use crate::dashboard::{self, DashboardView};
use crate::data::filter::{apply_filters, FilterCriteria};
use crate::data::model::OrderDataset;

// ---------------------------------------------------------------------------
// Dashboard session state
// ---------------------------------------------------------------------------

/// What the external UI collaborator holds between interactions: the
/// immutable dataset snapshot, the current sidebar criteria, and the cached
/// filtered indices. Rendering itself stays a pure function of these.
#[derive(Default)]
pub struct DashboardState {
    /// Loaded dataset (None until a file is loaded).
    pub dataset: Option<OrderDataset>,

    /// Current sidebar selections.
    pub criteria: Option<FilterCriteria>,

    /// Indices of rows passing the current criteria (cached).
    pub filtered_indices: Vec<usize>,
}

impl DashboardState {
    /// Ingest a newly loaded dataset and reset the sidebar to match-all.
    pub fn set_dataset(&mut self, dataset: OrderDataset) {
        self.criteria = Some(FilterCriteria::match_all(&dataset));
        self.filtered_indices = (0..dataset.len()).collect();
        self.dataset = Some(dataset);
    }

    /// Replace the criteria and recompute the cached indices.
    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = Some(criteria);
        self.refilter();
    }

    /// Recompute `filtered_indices` after a criteria change.
    pub fn refilter(&mut self) {
        if let (Some(ds), Some(criteria)) = (&self.dataset, &self.criteria) {
            self.filtered_indices = apply_filters(ds, criteria);
        }
    }

    /// Render the full view for the current selections using the cached
    /// indices. `None` until a dataset has been loaded.
    pub fn render(&self, reference: NaiveDateTime) -> Option<DashboardView> {
        let ds = self.dataset.as_ref()?;
        Some(dashboard::render_filtered(ds, &self.filtered_indices, reference))
    }
}
