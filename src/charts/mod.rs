//! Charts module - bivariate palette and color lookup

mod palette;

pub use palette::{BivariatePalette, ColorLookup, BIVARIATE_COLORS, DEFAULT_COLOR};
