//! Loading of the flat academic data file and typed access to its cells.
//!
//! The file is read with every column as text: assessment cells carry
//! suppression markers (`***`, `^`) that must survive until the numeric
//! coercion step decides they are missing values.

use std::path::{Path, PathBuf};

use polars::prelude::*;
use tracing::{debug, info, instrument};

use crate::error::{AnalysisError, Result};

pub const YEAR: &str = "Year";
pub const CORPORATION_ID: &str = "Corporation ID";
pub const CORPORATION_NAME: &str = "Corporation Name";
pub const SCHOOL_ID: &str = "School ID";
pub const SCHOOL_NAME: &str = "School Name";
pub const LOW_GRADE: &str = "Low Grade";
pub const HIGH_GRADE: &str = "High Grade";

/// File name of the K-8 academic data inside the data directory.
pub const ACADEMIC_K8_FILE: &str = "academic_data_k8.csv";

const REQUIRED_COLUMNS: [&str; 7] = [
    YEAR,
    CORPORATION_ID,
    CORPORATION_NAME,
    SCHOOL_ID,
    SCHOOL_NAME,
    LOW_GRADE,
    HIGH_GRADE,
];

/// Location of the academic data files.
#[derive(Debug, Clone)]
pub struct AcademicDataSource {
    data_dir: PathBuf,
}

impl AcademicDataSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn k8_path(&self) -> PathBuf {
        self.data_dir.join(ACADEMIC_K8_FILE)
    }

    /// Reads the whole K-8 academic file.
    pub fn load_k8(&self) -> Result<DataFrame> {
        load_academic_data(&self.k8_path())
    }
}

/// Reads an academic CSV file with all columns as strings and checks that the
/// identifying columns are present.
#[instrument]
pub fn load_academic_data(path: &Path) -> Result<DataFrame> {
    if !path.is_file() {
        return Err(AnalysisError::DataFile(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    for column in REQUIRED_COLUMNS {
        if !has_column(&df, column) {
            return Err(AnalysisError::MissingColumn(column.to_string()));
        }
    }

    info!(
        "Loaded {} academic rows with {} columns from {}",
        df.height(),
        df.width(),
        path.display()
    );
    Ok(df)
}

pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.get_column_names().iter().any(|c| c.as_str() == name)
}

/// Column values as owned strings; nulls become `None`.
pub fn string_values(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df.column(name)?.as_materialized_series().cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(|s| s.trim().to_string()))
        .collect())
}

/// Column values coerced to numbers. Anything that does not parse (including
/// the `***` and `^` suppression markers) becomes `None`.
pub fn numeric_values(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df.column(name)?.as_materialized_series();
    let values = match series.dtype() {
        DataType::String => series
            .str()?
            .into_iter()
            .map(|v| v.and_then(|s| s.trim().parse::<f64>().ok()))
            .collect(),
        _ => series
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .collect(),
    };
    Ok(values)
}

/// Identifier column parsed as integers. Identifiers are whole numbers even
/// when a spreadsheet export wrote them as `123.0`. Blank or malformed cells
/// become `None` and never match a selection.
pub fn id_values(df: &DataFrame, name: &str) -> Result<Vec<Option<i64>>> {
    Ok(string_values(df, name)?
        .into_iter()
        .map(|v| v.as_deref().and_then(parse_id))
        .collect())
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.parse::<i64>()
        .ok()
        .or_else(|| raw.parse::<f64>().ok().filter(|f| f.fract() == 0.0).map(|f| f as i64))
}

/// Rows whose `Year` equals `year`.
pub fn filter_year(df: &DataFrame, year: &str) -> Result<DataFrame> {
    let filtered = df
        .clone()
        .lazy()
        .filter(col(YEAR).cast(DataType::String).eq(lit(year.to_string())))
        .collect()?;
    debug!("{} rows for year {}", filtered.height(), year);
    Ok(filtered)
}

/// Rows whose integer id in `column` is one of `ids`, in file order.
pub fn filter_ids(df: &DataFrame, column: &str, ids: &[i64]) -> Result<DataFrame> {
    let mask: BooleanChunked = id_values(df, column)?
        .into_iter()
        .map(|id| id.is_some_and(|id| ids.contains(&id)))
        .collect();
    Ok(df.filter(&mask)?)
}
