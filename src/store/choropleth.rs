//! Choropleth Store
//! Owned state, actions and derived getters consumed by the rendering layer.

use super::pipeline::{self, DerivedView};
use super::selection::SelectionState;
use crate::charts::{BivariatePalette, ColorLookup};
use crate::config::{BinningConfig, Config, DataConfig};
use crate::data::{
    BinnedRecord, DataProcessor, JoinedRecord, LoadedTables, LoaderError, LongRecord,
    TableLoader, WideRecord, YearValue,
};
use crate::stats::Thresholds;
use std::sync::mpsc::{channel, Receiver};
use std::thread;
use tracing::{debug, error, info};

/// Messages from a background load.
#[derive(Debug)]
pub enum LoadResult {
    Progress(String),
    Complete(LoadedTables),
    Error(String),
}

/// State behind the bivariate map.
///
/// Tables stay `None` until loaded; every getter then returns empty data.
#[derive(Debug, Clone, Default)]
pub struct ChoroplethStore {
    selection: SelectionState,
    income: Option<Vec<WideRecord>>,
    education: Option<Vec<WideRecord>>,
    income_long: Vec<LongRecord>,
    edu_long: Vec<LongRecord>,
    palette: BivariatePalette,
    binning: BinningConfig,
}

impl ChoroplethStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            selection: SelectionState::with_year(config.selection.year),
            palette: config.palette.clone(),
            binning: config.binning.clone(),
            ..Self::default()
        }
    }

    // ---- loading ----

    /// Load both CSV tables and derive their long forms.
    pub fn load_data(&mut self, data: &DataConfig) -> Result<(), LoaderError> {
        let tables = TableLoader::load_pair(&data.income_csv, &data.education_csv)?;
        self.set_tables(tables);
        Ok(())
    }

    /// Replace both tables with already loaded rows.
    pub fn set_tables(&mut self, tables: LoadedTables) {
        self.income_long = DataProcessor::to_long(&tables.income);
        self.edu_long = DataProcessor::to_long(&tables.education);
        info!(
            income_rows = tables.income.len(),
            education_rows = tables.education.len(),
            income_cells = self.income_long.len(),
            education_cells = self.edu_long.len(),
            "Tables loaded"
        );
        self.income = Some(tables.income);
        self.education = Some(tables.education);
    }

    pub fn is_loaded(&self) -> bool {
        self.income.is_some() && self.education.is_some()
    }

    /// Load both tables on a background thread. Fire-and-forget: no retry,
    /// no cancellation. Feed the receiver to [`Self::check_load_results`].
    pub fn load_data_in_background(data: DataConfig) -> Receiver<LoadResult> {
        let (tx, rx) = channel();

        thread::spawn(move || {
            let _ = tx.send(LoadResult::Progress("Reading CSV files...".to_string()));

            match TableLoader::load_pair(&data.income_csv, &data.education_csv) {
                Ok(tables) => {
                    let _ = tx.send(LoadResult::Complete(tables));
                }
                Err(e) => {
                    let _ = tx.send(LoadResult::Error(e.to_string()));
                }
            }
        });

        rx
    }

    /// Drain pending load messages. Returns `true` once the load finished,
    /// whether it succeeded or not.
    pub fn check_load_results(&mut self, rx: &Receiver<LoadResult>) -> bool {
        loop {
            match rx.try_recv() {
                Ok(LoadResult::Progress(status)) => debug!(status = %status, "Load progress"),
                Ok(LoadResult::Complete(tables)) => {
                    self.set_tables(tables);
                    return true;
                }
                Ok(LoadResult::Error(e)) => {
                    error!(error = %e, "Failed to load tables");
                    return true;
                }
                Err(std::sync::mpsc::TryRecvError::Empty) => return false,
                Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                    error!("Loader thread exited without a result");
                    return true;
                }
            }
        }
    }

    // ---- actions ----

    pub fn change_selected_year(&mut self, year: i32) {
        debug!(year, "Selected year changed");
        self.selection.selected_year = year;
    }

    /// Append a state to the selection; duplicates are kept.
    pub fn change_selected_state(&mut self, state: impl Into<String>) {
        self.selection.selected_states.push(state.into());
    }

    pub fn set_highlighted_state(&mut self, state: Option<String>) {
        self.selection.highlighted_state = state;
    }

    // ---- state ----

    pub fn selected_year(&self) -> i32 {
        self.selection.selected_year
    }

    pub fn selected_states(&self) -> &[String] {
        &self.selection.selected_states
    }

    pub fn highlighted_state(&self) -> Option<&str> {
        self.selection.highlighted_state.as_deref()
    }

    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    pub fn palette(&self) -> &BivariatePalette {
        &self.palette
    }

    pub fn income_table(&self) -> &[WideRecord] {
        self.income.as_deref().unwrap_or_default()
    }

    pub fn education_table(&self) -> &[WideRecord] {
        self.education.as_deref().unwrap_or_default()
    }

    // ---- getters ----

    /// Income rows that carry the selected year, projected onto it.
    pub fn filtered_income(&self) -> Vec<YearValue> {
        DataProcessor::filter_wide_by_year(self.income_table(), self.selected_year())
    }

    /// Education rows that carry the selected year, projected onto it.
    pub fn filtered_education(&self) -> Vec<YearValue> {
        DataProcessor::filter_wide_by_year(self.education_table(), self.selected_year())
    }

    pub fn income_by_year(&self) -> Vec<LongRecord> {
        DataProcessor::filter_by_year(&self.income_long, self.selected_year())
    }

    pub fn edu_by_year(&self) -> Vec<LongRecord> {
        DataProcessor::filter_by_year(&self.edu_long, self.selected_year())
    }

    pub fn joined_by_year(&self) -> Vec<JoinedRecord> {
        pipeline::join_by_year(&self.income_by_year(), &self.edu_by_year())
    }

    pub fn income_thresholds(&self) -> Thresholds {
        pipeline::thresholds_for(&self.joined_by_year(), &self.binning).0
    }

    pub fn edu_thresholds(&self) -> Thresholds {
        pipeline::thresholds_for(&self.joined_by_year(), &self.binning).1
    }

    pub fn binned_by_year(&self) -> Vec<BinnedRecord> {
        self.derive().binned
    }

    /// State name to fill color; `#ccc` for states outside the binned set.
    pub fn color_by_state(&self) -> ColorLookup {
        self.derive().color_by_state()
    }

    /// Compute the full chain for the selected year in one pass.
    pub fn derive(&self) -> DerivedView {
        DerivedView::compute(
            self.selected_year(),
            &self.income_long,
            &self.edu_long,
            &self.binning,
            &self.palette,
        )
    }
}
