//! Binning Module
//! Three-way bins over a pair of thresholds, fixed or quantile-derived.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics};

/// Number of bins per variable.
pub const BIN_COUNT: usize = 3;

/// Default income thresholds (USD).
pub const INCOME_THRESHOLDS: Thresholds = Thresholds::new(45_000.0, 65_000.0);

/// Default education thresholds (% with a BA degree or higher).
pub const EDU_THRESHOLDS: Thresholds = Thresholds::new(30.0, 50.0);

/// Lower and upper cut points. Serialized as a two-element array.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Thresholds {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }

    pub fn bin(&self, value: f64) -> usize {
        bin(value, *self)
    }
}

impl From<[f64; 2]> for Thresholds {
    fn from([low, high]: [f64; 2]) -> Self {
        Self::new(low, high)
    }
}

impl From<Thresholds> for [f64; 2] {
    fn from(t: Thresholds) -> Self {
        [t.low, t.high]
    }
}

/// How thresholds are chosen for the selected year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdMode {
    /// Configured constants
    #[default]
    Fixed,
    /// 1/3 and 2/3 quantiles of the year's joined values
    Quantile,
}

/// Bin a value: 0 below `low`, 1 in `[low, high)`, 2 otherwise.
///
/// `NaN` fails both comparisons and lands in bin 2.
pub fn bin(value: f64, thresholds: Thresholds) -> usize {
    if value < thresholds.low {
        0
    } else if value < thresholds.high {
        1
    } else {
        2
    }
}

/// Tercile cut points of the finite values, or `fallback` when there are none.
pub fn quantile_thresholds(values: &[f64], fallback: Thresholds) -> Thresholds {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() {
        return fallback;
    }

    let mut data = Data::new(finite);
    Thresholds::new(data.quantile(1.0 / 3.0), data.quantile(2.0 / 3.0))
}

/// Resolve the thresholds for one variable under `mode`.
pub fn resolve_thresholds(mode: ThresholdMode, values: &[f64], fixed: Thresholds) -> Thresholds {
    match mode {
        ThresholdMode::Fixed => fixed,
        ThresholdMode::Quantile => quantile_thresholds(values, fixed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_boundaries() {
        let t = Thresholds::new(30.0, 50.0);
        assert_eq!(bin(29.999, t), 0);
        assert_eq!(bin(30.0, t), 1);
        assert_eq!(bin(49.999, t), 1);
        assert_eq!(bin(50.0, t), 2);
        assert_eq!(bin(50.001, t), 2);
    }

    #[test]
    fn test_bin_is_monotonic() {
        let t = INCOME_THRESHOLDS;
        let mut previous = 0;
        for step in 0..200 {
            let b = t.bin(step as f64 * 500.0);
            assert!(b >= previous);
            previous = b;
        }
        assert_eq!(previous, 2);
    }

    #[test]
    fn test_nan_lands_in_top_bin() {
        assert_eq!(bin(f64::NAN, EDU_THRESHOLDS), 2);
    }

    #[test]
    fn test_default_thresholds() {
        assert_eq!(INCOME_THRESHOLDS, Thresholds::new(45_000.0, 65_000.0));
        assert_eq!(EDU_THRESHOLDS, Thresholds::new(30.0, 50.0));
    }

    #[test]
    fn test_quantile_thresholds_empty_falls_back() {
        let t = quantile_thresholds(&[f64::NAN], EDU_THRESHOLDS);
        assert_eq!(t, EDU_THRESHOLDS);
    }

    #[test]
    fn test_quantile_thresholds_constant_values() {
        let t = quantile_thresholds(&[42.0, 42.0, 42.0, 42.0], EDU_THRESHOLDS);
        assert_eq!(t, Thresholds::new(42.0, 42.0));
    }

    #[test]
    fn test_quantile_thresholds_are_ordered_within_range() {
        let values: Vec<f64> = (1..=30).map(|v| v as f64 * 1_000.0).collect();
        let t = quantile_thresholds(&values, INCOME_THRESHOLDS);
        assert!(t.low <= t.high);
        assert!(t.low >= 1_000.0 && t.high <= 30_000.0);
        assert!(t.low > 5_000.0 && t.high < 25_000.0);
    }

    #[test]
    fn test_resolve_fixed_ignores_values() {
        let t = resolve_thresholds(ThresholdMode::Fixed, &[1.0, 2.0, 3.0], EDU_THRESHOLDS);
        assert_eq!(t, EDU_THRESHOLDS);
    }

    #[test]
    fn test_thresholds_serde_as_array() {
        let json = serde_json::to_string(&INCOME_THRESHOLDS).unwrap();
        assert_eq!(json, "[45000.0,65000.0]");
        let parsed: Thresholds = serde_json::from_str("[1.5,2.5]").unwrap();
        assert_eq!(parsed, Thresholds::new(1.5, 2.5));
    }
}
