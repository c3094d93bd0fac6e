//! Bivariate Palette Module
//! The 3x3 color matrix and the per-state color lookup.

use crate::data::BinnedRecord;
use crate::stats::BIN_COUNT;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fill for states without a binned record.
pub const DEFAULT_COLOR: &str = "#ccc";

/// Row 0 is the highest income bin, column 0 the lowest education bin.
pub const BIVARIATE_COLORS: [[&str; BIN_COUNT]; BIN_COUNT] = [
    ["#c62aa9", "#851aa8", "#1302a6"],
    ["#d996c9", "#9292c8", "#4590c7"],
    ["#eae6dd", "#a1d4d5", "#5bc0ca"],
];

/// 3x3 color matrix indexed by (income bin, education bin).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BivariatePalette {
    colors: [[String; BIN_COUNT]; BIN_COUNT],
}

impl Default for BivariatePalette {
    fn default() -> Self {
        Self::new(BIVARIATE_COLORS.map(|row| row.map(str::to_string)))
    }
}

impl BivariatePalette {
    pub fn new(colors: [[String; BIN_COUNT]; BIN_COUNT]) -> Self {
        Self { colors }
    }

    /// Color for income bin `bi` and education bin `bj`.
    ///
    /// Rows are inverted so the highest income bin reads from row 0.
    pub fn color_lookup(&self, bi: usize, bj: usize) -> &str {
        let row = (BIN_COUNT - 1).saturating_sub(bi);
        &self.colors[row][bj.min(BIN_COUNT - 1)]
    }
}

/// Maps a state name to its fill color for the current binned set.
#[derive(Debug, Clone, Default)]
pub struct ColorLookup {
    colors: HashMap<String, String>,
}

impl ColorLookup {
    /// Later records for the same state replace earlier ones.
    pub fn from_binned(records: &[BinnedRecord]) -> Self {
        let colors = records
            .iter()
            .map(|r| (r.state.clone(), r.color.clone()))
            .collect();
        Self { colors }
    }

    /// Color of `state`, or [`DEFAULT_COLOR`] when unknown or blank.
    pub fn color_of(&self, state: &str) -> &str {
        self.colors
            .get(state)
            .map(String::as_str)
            .filter(|c| !c.is_empty())
            .unwrap_or(DEFAULT_COLOR)
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Consume into a plain closure for rendering callbacks.
    pub fn into_fn(self) -> impl Fn(&str) -> String {
        move |state: &str| self.color_of(state).to_string()
    }
}
