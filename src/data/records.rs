//! Record types shared by the loader, the derivation pipeline and the
//! rendering layer.

use serde::Serialize;
use std::collections::BTreeMap;

/// One row of a wide table: a state name plus one value per year column.
///
/// Cells that could not be read as numbers are stored as `NaN`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WideRecord {
    pub state: String,
    pub values: BTreeMap<i32, f64>,
}

impl WideRecord {
    pub fn new(state: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            values: BTreeMap::new(),
        }
    }

    /// Builder-style helper for a single year cell.
    pub fn with_value(mut self, year: i32, value: f64) -> Self {
        self.values.insert(year, value);
        self
    }

    pub fn value(&self, year: i32) -> Option<f64> {
        self.values.get(&year).copied()
    }
}

/// Long format: one `(state, year, value)` triple per cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongRecord {
    pub state: String,
    pub year: i32,
    pub value: f64,
}

impl LongRecord {
    pub fn new(state: impl Into<String>, year: i32, value: f64) -> Self {
        Self {
            state: state.into(),
            year,
            value,
        }
    }
}

/// A wide row projected onto a single year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearValue {
    pub state: String,
    pub value: f64,
}

/// Income and education values of one state for the selected year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedRecord {
    pub state: String,
    pub income: f64,
    pub edu: f64,
}

/// A joined record annotated with its bin indices and palette color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinnedRecord {
    pub state: String,
    pub income: f64,
    pub edu: f64,
    /// Income bin (0..=2)
    pub bi: usize,
    /// Education bin (0..=2)
    pub bj: usize,
    pub color: String,
}
