//! Data Processor Module
//! Reshapes wide year tables to long format and projects them onto a year.

use super::records::{LongRecord, WideRecord, YearValue};
use std::collections::HashMap;

/// Stateless reshaping operations over loaded tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Transform wide rows to long format (stack operation).
    ///
    /// Emits one record per `(row, year column)`; `NaN` cells are kept.
    pub fn to_long(rows: &[WideRecord]) -> Vec<LongRecord> {
        rows.iter()
            .flat_map(|row| {
                row.values
                    .iter()
                    .map(move |(&year, &value)| LongRecord::new(row.state.clone(), year, value))
            })
            .collect()
    }

    /// Keep the long records of a single year.
    pub fn filter_by_year(records: &[LongRecord], year: i32) -> Vec<LongRecord> {
        records
            .iter()
            .filter(|record| record.year == year)
            .cloned()
            .collect()
    }

    /// Project wide rows that carry a column for `year` onto that year.
    pub fn filter_wide_by_year(rows: &[WideRecord], year: i32) -> Vec<YearValue> {
        rows.iter()
            .filter_map(|row| {
                row.value(year).map(|value| YearValue {
                    state: row.state.clone(),
                    value,
                })
            })
            .collect()
    }

    /// Pivot long records back to wide rows, one row per state in
    /// first-seen order. A repeated `(state, year)` keeps the last value.
    pub fn pivot_to_wide(records: &[LongRecord]) -> Vec<WideRecord> {
        let mut rows: Vec<WideRecord> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for record in records {
            let slot = *index.entry(record.state.as_str()).or_insert_with(|| {
                rows.push(WideRecord::new(record.state.clone()));
                rows.len() - 1
            });
            rows[slot].values.insert(record.year, record.value);
        }

        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rows() -> Vec<WideRecord> {
        vec![
            WideRecord::new("Alabama")
                .with_value(2006, 31_000.0)
                .with_value(2007, 32_500.0),
            WideRecord::new("Alaska")
                .with_value(2006, 52_000.0)
                .with_value(2007, f64::NAN),
            WideRecord::new("Arizona").with_value(2007, 35_000.0),
        ]
    }

    #[test]
    fn test_to_long_emits_one_record_per_cell() {
        let long = DataProcessor::to_long(&sample_rows());
        assert_eq!(long.len(), 5);
        assert!(long.contains(&LongRecord::new("Alabama", 2007, 32_500.0)));
        assert!(long.contains(&LongRecord::new("Arizona", 2007, 35_000.0)));
    }

    #[test]
    fn test_to_long_keeps_nan_cells() {
        let long = DataProcessor::to_long(&sample_rows());
        let alaska_2007 = long
            .iter()
            .find(|r| r.state == "Alaska" && r.year == 2007)
            .unwrap();
        assert!(alaska_2007.value.is_nan());
    }

    #[test]
    fn test_to_long_empty() {
        assert!(DataProcessor::to_long(&[]).is_empty());
    }

    #[test]
    fn test_filter_by_year() {
        let long = DataProcessor::to_long(&sample_rows());
        let year_2006 = DataProcessor::filter_by_year(&long, 2006);
        assert_eq!(year_2006.len(), 2);
        assert!(year_2006.iter().all(|r| r.year == 2006));
    }

    #[test]
    fn test_filter_by_missing_year_is_empty() {
        let long = DataProcessor::to_long(&sample_rows());
        assert!(DataProcessor::filter_by_year(&long, 1999).is_empty());
        assert!(DataProcessor::filter_by_year(&long, 2020).is_empty());
    }

    #[test]
    fn test_filter_wide_by_year_skips_rows_without_column() {
        let projected = DataProcessor::filter_wide_by_year(&sample_rows(), 2006);
        let states: Vec<&str> = projected.iter().map(|v| v.state.as_str()).collect();
        assert_eq!(states, vec!["Alabama", "Alaska"]);
        assert_eq!(projected[1].value, 52_000.0);
    }

    #[test]
    fn test_pivot_reconstructs_numeric_cells() {
        let rows = vec![
            WideRecord::new("Ohio")
                .with_value(2006, 41_000.0)
                .with_value(2019, 50_123.5),
            WideRecord::new("Utah")
                .with_value(2006, 38_000.0)
                .with_value(2019, 49_000.0),
        ];

        let pivoted = DataProcessor::pivot_to_wide(&DataProcessor::to_long(&rows));
        assert_eq!(pivoted, rows);
    }

    #[test]
    fn test_pivot_last_value_wins() {
        let records = vec![
            LongRecord::new("Iowa", 2010, 1.0),
            LongRecord::new("Iowa", 2010, 2.0),
        ];
        let pivoted = DataProcessor::pivot_to_wide(&records);
        assert_eq!(pivoted.len(), 1);
        assert_eq!(pivoted[0].value(2010), Some(2.0));
    }
}
