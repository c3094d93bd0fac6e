//! CSV Data Loader Module
//! Loads wide `State, <year>...` tables using Polars.

use super::records::WideRecord;
use polars::prelude::*;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Name of the column holding the state name.
pub const STATE_COLUMN: &str = "State";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing `State` column in {0}")]
    MissingStateColumn(String),
    #[error("No data rows in {0}")]
    NoData(String),
}

/// Both tables the store consumes.
#[derive(Debug, Clone, Default)]
pub struct LoadedTables {
    pub income: Vec<WideRecord>,
    pub education: Vec<WideRecord>,
}

/// Loads wide year tables from CSV files.
pub struct TableLoader;

impl TableLoader {
    /// Load a single wide CSV file.
    pub fn load_csv(file_path: &Path) -> Result<Vec<WideRecord>, LoaderError> {
        debug!(path = %file_path.display(), "Reading CSV");

        let df = LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(10000))
            .with_ignore_errors(true)
            .finish()?
            .collect()?;

        let source = file_path.display().to_string();
        let rows = Self::records_from_frame(&df, &source)?;
        if rows.is_empty() {
            return Err(LoaderError::NoData(source));
        }
        info!(
            path = %file_path.display(),
            rows = rows.len(),
            columns = df.width(),
            "Loaded table"
        );
        Ok(rows)
    }

    /// Load the income and education tables in parallel.
    pub fn load_pair(income: &Path, education: &Path) -> Result<LoadedTables, LoaderError> {
        let (income, education) =
            rayon::join(|| Self::load_csv(income), || Self::load_csv(education));

        Ok(LoadedTables {
            income: income?,
            education: education?,
        })
    }

    /// Convert a DataFrame into wide records.
    ///
    /// Every column except `State` whose header parses as an integer is a
    /// year column; other columns are skipped. Empty cells are left out of
    /// the record; present cells that cannot be cast to a float become
    /// `NaN`. Rows without a state name are dropped.
    pub fn records_from_frame(df: &DataFrame, source: &str) -> Result<Vec<WideRecord>, LoaderError> {
        let states = df
            .column(STATE_COLUMN)
            .map_err(|_| LoaderError::MissingStateColumn(source.to_string()))?
            .cast(&DataType::String)?;
        let states = states.str()?;

        let mut year_columns: Vec<(i32, BooleanChunked, Float64Chunked)> = Vec::new();
        for column in df.get_columns() {
            let name = column.name().as_str();
            if name == STATE_COLUMN {
                continue;
            }
            match name.trim().parse::<i32>() {
                Ok(year) => {
                    let values = column.cast(&DataType::Float64)?;
                    year_columns.push((year, column.is_null(), values.f64()?.clone()));
                }
                Err(_) => warn!(source, column = name, "Skipping non-year column"),
            }
        }

        let mut rows = Vec::with_capacity(df.height());
        for i in 0..df.height() {
            let Some(state) = states.get(i) else {
                warn!(source, row = i, "Skipping row without state name");
                continue;
            };

            let mut record = WideRecord::new(state);
            for (year, missing, values) in &year_columns {
                if missing.get(i).unwrap_or(true) {
                    continue;
                }
                record
                    .values
                    .insert(*year, values.get(i).unwrap_or(f64::NAN));
            }
            rows.push(record);
        }

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("State".into(), vec!["Alabama", "Alaska", "Arizona"]),
            Column::new("2006".into(), vec![31_000.0, 52_000.0, 38_500.0]),
            Column::new("2007".into(), vec!["32000", "n/a", "39000"]),
            Column::new("2008".into(), vec![Some(33_000.0), None, Some(40_000.0)]),
            Column::new("Notes".into(), vec!["a", "b", "c"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_records_from_frame() {
        let rows = TableLoader::records_from_frame(&frame(), "test").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].state, "Alabama");
        assert_eq!(rows[0].value(2006), Some(31_000.0));
        assert_eq!(rows[0].value(2007), Some(32_000.0));
        assert_eq!(rows[2].value(2007), Some(39_000.0));
    }

    #[test]
    fn test_non_numeric_cell_becomes_nan() {
        let rows = TableLoader::records_from_frame(&frame(), "test").unwrap();
        assert!(rows[1].value(2007).unwrap().is_nan());
    }

    #[test]
    fn test_non_year_columns_are_skipped() {
        let rows = TableLoader::records_from_frame(&frame(), "test").unwrap();
        assert!(rows.iter().all(|r| r.values.len() <= 3));
        assert!(rows.iter().all(|r| r.value(2006).is_some()));
    }

    #[test]
    fn test_empty_cell_is_left_out() {
        let rows = TableLoader::records_from_frame(&frame(), "test").unwrap();
        assert_eq!(rows[0].value(2008), Some(33_000.0));
        assert_eq!(rows[1].value(2008), None);
        assert_eq!(rows[1].values.len(), 2);
    }

    #[test]
    fn test_state_names_are_kept_verbatim() {
        let df = DataFrame::new(vec![
            Column::new("State".into(), vec!["\"Quoted\" State"]),
            Column::new("2006".into(), vec![1.0]),
        ])
        .unwrap();
        let rows = TableLoader::records_from_frame(&df, "test").unwrap();
        assert_eq!(rows[0].state, "\"Quoted\" State");
    }

    #[test]
    fn test_load_csv_with_empty_cell() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "State,2006").unwrap();
        writeln!(file, "Ohio,").unwrap();
        writeln!(file, "Utah,30000").unwrap();
        file.flush().unwrap();

        let rows = TableLoader::load_csv(file.path()).unwrap();
        assert_eq!(rows[0].state, "Ohio");
        assert_eq!(rows[0].value(2006), None);
        assert_eq!(rows[1].value(2006), Some(30_000.0));
    }

    #[test]
    fn test_load_csv_without_rows() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "State,2006,2007").unwrap();
        file.flush().unwrap();

        let err = TableLoader::load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::NoData(_)));
    }

    #[test]
    fn test_missing_state_column() {
        let df = DataFrame::new(vec![Column::new("2006".into(), vec![1.0, 2.0])]).unwrap();
        let err = TableLoader::records_from_frame(&df, "income.csv").unwrap_err();
        assert!(matches!(err, LoaderError::MissingStateColumn(ref s) if s == "income.csv"));
    }

    #[test]
    fn test_load_csv_from_file() {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(file, "State,2006,2007").unwrap();
        writeln!(file, "Ohio,41000,42000").unwrap();
        writeln!(file, "Utah,38000,39500").unwrap();
        file.flush().unwrap();

        let rows = TableLoader::load_csv(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].state, "Utah");
        assert_eq!(rows[1].value(2007), Some(39_500.0));
    }

    #[test]
    fn test_load_csv_missing_file() {
        let result = TableLoader::load_csv(Path::new("/nonexistent/income.csv"));
        assert!(result.is_err());
    }
}
