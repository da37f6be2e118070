//! Turns raw per-school assessment counts into proficiency rates.

use polars::prelude::*;
use tracing::{debug, instrument, trace};

use crate::categories::{
    INFO_CATEGORIES, IREAD_PASS_N, IREAD_PROFICIENT, IREAD_TEST_N, PROFICIENT_SUFFIX,
    TOTAL_PROFICIENT_SUFFIX, TOTAL_TESTED_SUFFIX, is_proficiency_column,
};
use crate::dataset::{SCHOOL_ID, has_column, numeric_values};
use crate::error::Result;

/// `proficient / tested`, or `None` when either count is missing or nobody was tested.
pub fn proficiency_rate(proficient: Option<f64>, tested: Option<f64>) -> Option<f64> {
    match (proficient, tested) {
        (Some(p), Some(t)) if t > 0.0 => Some(p / t),
        _ => None,
    }
}

fn rate_series(df: &DataFrame, name: &str, proficient: &str, tested: &str) -> Result<Series> {
    let proficient = numeric_values(df, proficient)?;
    let tested = numeric_values(df, tested)?;
    let rates: Vec<Option<f64>> = proficient
        .into_iter()
        .zip(tested)
        .map(|(p, t)| proficiency_rate(p, t))
        .collect();
    Ok(Series::new(name.into(), rates))
}

/// Builds the display frame for a set of school rows: one row per school with
/// the info categories followed by every proficiency column that has at least
/// one value.
///
/// Proficiency columns come from `Total Tested` / `Total Proficient` pairs and
/// from the IREAD pass/test counts. Columns that already hold a rate are
/// coerced to numbers and kept when no count pair produced the same name.
#[instrument(skip(raw), fields(rows = raw.height()))]
pub fn process_k8_academic_data(raw: &DataFrame) -> Result<DataFrame> {
    let mut columns: Vec<Column> = Vec::new();
    for name in INFO_CATEGORIES.iter().chain(std::iter::once(&SCHOOL_ID)) {
        if has_column(raw, name) {
            columns.push(raw.column(name)?.clone());
        }
    }

    let mut rates: Vec<Series> = Vec::new();
    let names: Vec<String> = raw
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .collect();

    for name in &names {
        let Some(prefix) = name.strip_suffix(TOTAL_TESTED_SUFFIX) else {
            continue;
        };
        let proficient = format!("{}{}", prefix, TOTAL_PROFICIENT_SUFFIX);
        if !has_column(raw, &proficient) {
            trace!("No proficient count for {}", name);
            continue;
        }
        let rate_name = format!("{}{}", prefix, PROFICIENT_SUFFIX);
        rates.push(rate_series(raw, &rate_name, &proficient, name)?);
    }

    if has_column(raw, IREAD_PASS_N) && has_column(raw, IREAD_TEST_N) {
        rates.push(rate_series(raw, IREAD_PROFICIENT, IREAD_PASS_N, IREAD_TEST_N)?);
    }

    for name in names.iter().filter(|n| is_proficiency_column(n)) {
        if rates.iter().any(|s| s.name().as_str() == name.as_str()) {
            continue;
        }
        rates.push(Series::new(name.as_str().into(), numeric_values(raw, name)?));
    }

    let before = rates.len();
    rates.retain(|s| s.null_count() < s.len());
    debug!(
        "Computed {} proficiency columns, dropped {} without data",
        rates.len(),
        before - rates.len()
    );

    columns.extend(rates.into_iter().map(Column::from));
    Ok(DataFrame::new(columns)?)
}

/// Names of the proficiency columns of a processed frame.
pub fn proficiency_columns(df: &DataFrame) -> Vec<String> {
    df.get_column_names()
        .iter()
        .map(|c| c.to_string())
        .filter(|c| is_proficiency_column(c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{HIGH_GRADE, LOW_GRADE, SCHOOL_NAME};

    fn raw_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(SCHOOL_ID.into(), vec!["1", "2"]).into(),
            Series::new(SCHOOL_NAME.into(), vec!["Alpha", "Beta"]).into(),
            Series::new(LOW_GRADE.into(), vec!["KG", "06"]).into(),
            Series::new(HIGH_GRADE.into(), vec!["05", "08"]).into(),
            Series::new("School Total|ELA Total Tested".into(), vec!["200", "50"]).into(),
            Series::new("School Total|ELA Total Proficient".into(), vec!["100", "***"]).into(),
            Series::new("Black|Math Total Tested".into(), vec!["0", "^"]).into(),
            Series::new("Black|Math Total Proficient".into(), vec!["0", "^"]).into(),
            Series::new(IREAD_TEST_N.into(), vec!["40", "10"]).into(),
            Series::new(IREAD_PASS_N.into(), vec!["30", "9"]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_proficiency_rate() {
        assert_eq!(proficiency_rate(Some(5.0), Some(10.0)), Some(0.5));
        assert_eq!(proficiency_rate(Some(5.0), Some(0.0)), None);
        assert_eq!(proficiency_rate(None, Some(10.0)), None);
        assert_eq!(proficiency_rate(Some(1.0), None), None);
    }

    #[test]
    fn test_process_computes_rates_and_drops_empty_columns() {
        let processed = process_k8_academic_data(&raw_frame()).unwrap();

        let columns = proficiency_columns(&processed);
        assert_eq!(
            columns,
            vec!["School Total|ELA Proficient %".to_string(), IREAD_PROFICIENT.to_string()]
        );

        let ela = numeric_values(&processed, "School Total|ELA Proficient %").unwrap();
        assert_eq!(ela, vec![Some(0.5), None]);

        let iread = numeric_values(&processed, IREAD_PROFICIENT).unwrap();
        assert_eq!(iread, vec![Some(0.75), Some(0.9)]);

        assert!(has_column(&processed, SCHOOL_NAME));
        assert!(has_column(&processed, LOW_GRADE));
        assert!(has_column(&processed, HIGH_GRADE));
    }

    #[test]
    fn test_process_keeps_precomputed_rates() {
        let raw = DataFrame::new(vec![
            Series::new(SCHOOL_NAME.into(), vec!["Alpha"]).into(),
            Series::new("Hispanic|ELA Proficient %".into(), vec!["0.42"]).into(),
        ])
        .unwrap();

        let processed = process_k8_academic_data(&raw).unwrap();
        let values = numeric_values(&processed, "Hispanic|ELA Proficient %").unwrap();
        assert_eq!(values, vec![Some(0.42)]);
    }

    #[test]
    fn test_process_empty_selection_has_no_proficiency() {
        let empty = raw_frame().head(Some(0));
        let processed = process_k8_academic_data(&empty).unwrap();
        assert_eq!(processed.height(), 0);
        assert!(proficiency_columns(&processed).is_empty());
    }
}
