//! Store module - selection state, derivation pipeline and the store itself

mod choropleth;
mod pipeline;
mod selection;

pub use choropleth::{ChoroplethStore, LoadResult};
pub use pipeline::{bin_records, join_by_year, thresholds_for, DerivedView};
pub use selection::{SelectionState, DEFAULT_YEAR};
