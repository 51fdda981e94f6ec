use crate::color::ColorMap;
use crate::data::filter::{Facet, FilterCriteria, filtered_indices, init_criteria};
use crate::data::model::PlayerDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// One interaction (a sidebar change) mutates `criteria`, which triggers one
/// full recomputation of `visible_indices`; every panel redraws from that
/// cached view on the next frame.
pub struct AppState {
    /// Loaded dataset (None until a file loads).
    pub dataset: Option<PlayerDataset>,

    /// Current sidebar selections.
    pub criteria: FilterCriteria,

    /// Indices of players passing the current criteria (cached).
    pub visible_indices: Vec<usize>,

    /// Colour per club, built once per dataset.
    pub club_colors: ColorMap,

    /// Colour per position string, built once per dataset.
    pub position_colors: ColorMap,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    /// Whether a file loading operation is in progress.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            criteria: FilterCriteria::default(),
            visible_indices: Vec::new(),
            club_colors: ColorMap::empty(),
            position_colors: ColorMap::empty(),
            status_message: None,
            loading: false,
        }
    }
}

impl AppState {
    /// Ingest a newly loaded dataset: reset criteria to their defaults,
    /// rebuild the colour maps, and filter.
    pub fn set_dataset(&mut self, dataset: PlayerDataset) {
        self.criteria = init_criteria(&dataset);
        self.club_colors = ColorMap::new(&dataset.clubs);
        self.position_colors = ColorMap::new(&dataset.positions);
        self.visible_indices = filtered_indices(&dataset, &self.criteria);

        self.dataset = Some(dataset);
        self.status_message = None;
        self.loading = false;
    }

    /// Recompute `visible_indices` after a criteria change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_indices = filtered_indices(ds, &self.criteria);
        }
    }

    /// Toggle a single value in a facet's selection.
    pub fn toggle_value(&mut self, facet: Facet, value: &str) {
        let selected = facet.selection_mut(&mut self.criteria);
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        self.refilter();
    }

    /// Select every observed value of a facet.
    pub fn select_all(&mut self, facet: Facet) {
        if let Some(ds) = &self.dataset {
            let all = facet.values(ds).clone();
            *facet.selection_mut(&mut self.criteria) = all;
            self.refilter();
        }
    }

    /// Clear a facet's selection, lifting its constraint entirely.
    pub fn clear_selection(&mut self, facet: Facet) {
        facet.selection_mut(&mut self.criteria).clear();
        self.refilter();
    }

    /// Set the inclusive age range, swapping the ends if they arrive crossed.
    pub fn set_age_range(&mut self, min: u32, max: u32) {
        self.criteria.age_min = min.min(max);
        self.criteria.age_max = max.max(min);
        self.refilter();
    }
}
