//! Data module - CSV loading, record types and reshaping

mod loader;
mod processor;
mod records;

pub use loader::{LoadedTables, LoaderError, TableLoader, STATE_COLUMN};
pub use processor::DataProcessor;
pub use records::{BinnedRecord, JoinedRecord, LongRecord, WideRecord, YearValue};
