//! Chart and table descriptions built from processed frames.

use common::{ChartKind, ChartSeries, ComparisonTable, Figure};
use polars::prelude::*;

use crate::categories::category_name;
use crate::dataset::numeric_values;
use crate::error::Result;
use crate::labels::school_labels;

/// Table cell for a missing value.
pub const SUPPRESSED: &str = "***";

/// `0.4567` -> `45.67%`
pub fn format_percentage(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.2}%", v * 100.0),
        _ => SUPPRESSED.to_string(),
    }
}

/// One bar per school for a single proficiency column.
pub fn make_bar_chart(df: &DataFrame, category: &str, title: &str) -> Result<Figure> {
    Ok(Figure::Chart {
        title: title.to_string(),
        kind: ChartKind::Bar,
        categories: school_labels(df)?,
        series: vec![ChartSeries {
            name: category_name(category).to_string(),
            values: numeric_values(df, category)?,
        }],
    })
}

/// Schools along the x axis, one bar series per category.
pub fn make_group_bar_chart(df: &DataFrame, categories: &[String], title: &str) -> Result<Figure> {
    let series = categories
        .iter()
        .map(|category| {
            Ok(ChartSeries {
                name: category_name(category).to_string(),
                values: numeric_values(df, category)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Figure::Chart {
        title: title.to_string(),
        kind: ChartKind::GroupedBar,
        categories: school_labels(df)?,
        series,
    })
}

/// Table with a `School Name` column followed by one column per category.
///
/// `value_header` replaces the category headers when set, which only makes
/// sense for a single category.
pub fn create_comparison_table(
    df: &DataFrame,
    categories: &[String],
    value_header: Option<&str>,
) -> Result<ComparisonTable> {
    let mut headers = vec!["School Name".to_string()];
    match value_header {
        Some(header) => headers.push(header.to_string()),
        None => headers.extend(categories.iter().map(|c| category_name(c).to_string())),
    }

    let labels = school_labels(df)?;
    let columns = categories
        .iter()
        .map(|category| numeric_values(df, category))
        .collect::<Result<Vec<_>>>()?;

    let rows = labels
        .into_iter()
        .enumerate()
        .map(|(row, label)| {
            let mut cells = Vec::with_capacity(columns.len() + 1);
            cells.push(label);
            cells.extend(columns.iter().map(|values| format_percentage(values[row])));
            cells
        })
        .collect();

    Ok(ComparisonTable { headers, rows })
}
