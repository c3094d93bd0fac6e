//! Stats module - threshold binning

mod binning;

pub use binning::{
    bin, quantile_thresholds, resolve_thresholds, ThresholdMode, Thresholds, BIN_COUNT,
    EDU_THRESHOLDS, INCOME_THRESHOLDS,
};
