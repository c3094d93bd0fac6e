//! Derivation Pipeline
//! Year filter -> join -> thresholds -> bins -> colors, recomputed on read.

use crate::charts::{BivariatePalette, ColorLookup};
use crate::config::BinningConfig;
use crate::data::{BinnedRecord, DataProcessor, JoinedRecord, LongRecord};
use crate::stats::{resolve_thresholds, Thresholds};
use serde::Serialize;
use std::collections::HashMap;

/// Inner join of income and education values by state.
///
/// Output follows the first appearance of each state in `income`. A state
/// repeated within one input keeps its last value.
pub fn join_by_year(income: &[LongRecord], education: &[LongRecord]) -> Vec<JoinedRecord> {
    let mut order: Vec<&str> = Vec::new();
    let mut income_by_state: HashMap<&str, f64> = HashMap::new();
    for record in income {
        if income_by_state
            .insert(record.state.as_str(), record.value)
            .is_none()
        {
            order.push(record.state.as_str());
        }
    }

    let edu_by_state: HashMap<&str, f64> = education
        .iter()
        .map(|r| (r.state.as_str(), r.value))
        .collect();

    order
        .into_iter()
        .filter_map(|state| {
            let edu = edu_by_state.get(state)?;
            Some(JoinedRecord {
                state: state.to_string(),
                income: income_by_state[state],
                edu: *edu,
            })
        })
        .collect()
}

/// Annotate joined records with bin indices and palette colors.
pub fn bin_records(
    joined: &[JoinedRecord],
    income_thresholds: Thresholds,
    edu_thresholds: Thresholds,
    palette: &BivariatePalette,
) -> Vec<BinnedRecord> {
    joined
        .iter()
        .map(|d| {
            let bi = income_thresholds.bin(d.income);
            let bj = edu_thresholds.bin(d.edu);
            BinnedRecord {
                state: d.state.clone(),
                income: d.income,
                edu: d.edu,
                bi,
                bj,
                color: palette.color_lookup(bi, bj).to_string(),
            }
        })
        .collect()
}

/// Every derived value for one selected year.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedView {
    pub year: i32,
    pub income_by_year: Vec<LongRecord>,
    pub edu_by_year: Vec<LongRecord>,
    pub joined: Vec<JoinedRecord>,
    pub income_thresholds: Thresholds,
    pub edu_thresholds: Thresholds,
    pub binned: Vec<BinnedRecord>,
}

impl DerivedView {
    /// Run the whole chain once over the long tables.
    pub fn compute(
        year: i32,
        income_long: &[LongRecord],
        edu_long: &[LongRecord],
        binning: &BinningConfig,
        palette: &BivariatePalette,
    ) -> Self {
        let income_by_year = DataProcessor::filter_by_year(income_long, year);
        let edu_by_year = DataProcessor::filter_by_year(edu_long, year);
        let joined = join_by_year(&income_by_year, &edu_by_year);

        let (income_thresholds, edu_thresholds) = thresholds_for(&joined, binning);
        let binned = bin_records(&joined, income_thresholds, edu_thresholds, palette);

        Self {
            year,
            income_by_year,
            edu_by_year,
            joined,
            income_thresholds,
            edu_thresholds,
            binned,
        }
    }

    pub fn color_by_state(&self) -> ColorLookup {
        ColorLookup::from_binned(&self.binned)
    }
}

/// Income and education thresholds for a joined year.
pub fn thresholds_for(joined: &[JoinedRecord], binning: &BinningConfig) -> (Thresholds, Thresholds) {
    let incomes: Vec<f64> = joined.iter().map(|d| d.income).collect();
    let edus: Vec<f64> = joined.iter().map(|d| d.edu).collect();
    (
        resolve_thresholds(binning.mode, &incomes, binning.income),
        resolve_thresholds(binning.mode, &edus, binning.education),
    )
}
