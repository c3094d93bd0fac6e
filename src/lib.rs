//! # Choropleth Store
//!
//! State store behind a bivariate choropleth of US states: personal income
//! against the share of adults with a BA degree or higher, 2006-2019.
//!
//! ## Modules
//!
//! - [`data`]: CSV loading (Polars), record types, wide/long reshaping
//! - [`stats`]: threshold binning, fixed or quantile-derived
//! - [`charts`]: the 3x3 bivariate palette and per-state color lookup
//! - [`store`]: selection state, derivation pipeline, [`ChoroplethStore`]
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use choropleth_store::{ChoroplethStore, Config};
//!
//! let config = Config::default();
//! let mut store = ChoroplethStore::from_config(&config);
//! store.load_data(&config.data)?;
//!
//! store.change_selected_year(2019);
//! for record in store.binned_by_year() {
//!     println!("{} -> {}", record.state, record.color);
//! }
//!
//! let color = store.color_by_state();
//! assert_eq!(color.color_of("Atlantis"), "#ccc");
//! # Ok::<(), choropleth_store::LoaderError>(())
//! ```

pub mod charts;
pub mod config;
pub mod data;
pub mod stats;
pub mod store;

pub use charts::{BivariatePalette, ColorLookup, DEFAULT_COLOR};
pub use config::{BinningConfig, Config, ConfigError, DataConfig, LoggingConfig};
pub use data::{
    BinnedRecord, DataProcessor, JoinedRecord, LoadedTables, LoaderError, LongRecord,
    TableLoader, WideRecord, YearValue,
};
pub use stats::{bin, ThresholdMode, Thresholds};
pub use store::{ChoroplethStore, DerivedView, LoadResult, SelectionState};
