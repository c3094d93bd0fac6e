//! User selection held by the store.

use serde::Serialize;

/// Year shown before the user picks one.
pub const DEFAULT_YEAR: i32 = 2006;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub selected_year: i32,
    /// Append-only; duplicates are kept.
    pub selected_states: Vec<String>,
    pub highlighted_state: Option<String>,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::with_year(DEFAULT_YEAR)
    }
}

impl SelectionState {
    pub fn with_year(year: i32) -> Self {
        Self {
            selected_year: year,
            selected_states: Vec::new(),
            highlighted_state: None,
        }
    }
}
