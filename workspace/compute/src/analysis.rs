//! Assembly of the academic analysis page: three single-category comparisons
//! and four grouped comparisons, each falling back to a placeholder when the
//! data for it is absent.

use common::{AcademicAnalysis, ComparisonPanel, ComparisonTable, Figure, NoDataPage};
use polars::prelude::*;
use tracing::{debug, info, instrument};

use crate::categories::{
    INFO_CATEGORIES, IREAD_PROFICIENT, SCHOOL_TOTAL, StudentGroup, Subject, group_headers,
    proficiency_column,
};
use crate::dataset::{SCHOOL_ID, filter_ids, filter_year, has_column};
use crate::error::Result;
use crate::figures::{create_comparison_table, make_bar_chart, make_group_bar_chart};
use crate::labels::{chart_label, identify_missing_categories};
use crate::process::{process_k8_academic_data, proficiency_columns};

pub const PAGE_TITLE: &str = "Academic Analysis";
pub const NO_DATA_MESSAGE: &str = "No Available Data with a sufficient n-size.";

/// Year whose data is shown for the requested one. 2020 has no assessment
/// data, so 2019 stands in for it.
pub fn display_year(year: &str) -> &str {
    if year == "2020" { "2019" } else { year }
}

fn info_and(df: &DataFrame, extra: &[String]) -> Result<DataFrame> {
    let selection: Vec<String> = INFO_CATEGORIES
        .iter()
        .map(|c| c.to_string())
        .chain(extra.iter().cloned())
        .filter(|c| has_column(df, c))
        .collect();
    Ok(df.select(selection)?)
}

/// Bar chart and table for one proficiency column, or a placeholder pair when
/// the column is absent.
pub fn single_category_panel(
    processed: &DataFrame,
    category: &str,
    title: &str,
) -> Result<ComparisonPanel> {
    if !has_column(processed, category) {
        debug!("No '{}' column, rendering placeholder", category);
        return Ok(ComparisonPanel {
            visible: true,
            figure: Figure::no_data(title),
            table: Some(ComparisonTable::no_data(&["Proficiency"])),
            missing_categories: String::new(),
            missing_schools: String::new(),
        });
    }

    let categories = vec![category.to_string()];
    let data = info_and(processed, &categories)?;
    Ok(ComparisonPanel {
        visible: true,
        figure: make_bar_chart(&data, category, title)?,
        table: Some(create_comparison_table(&data, &categories, Some("Proficiency"))?),
        missing_categories: String::new(),
        missing_schools: String::new(),
    })
}

/// Grouped bar chart of a subject broken down by ethnicity or subgroup.
pub fn grouped_panel(
    processed: &DataFrame,
    group: StudentGroup,
    subject: Subject,
) -> Result<ComparisonPanel> {
    let headers = group_headers(group, subject);
    let data = info_and(processed, &headers)?;

    if data.width() <= INFO_CATEGORIES.len() {
        let title = format!(
            "Comparison: {} Proficiency by {}",
            subject.as_str(),
            group.as_str()
        );
        debug!("No {} data, rendering placeholder", title);
        return Ok(ComparisonPanel::placeholder(title));
    }

    let missing = identify_missing_categories(&data, &headers)?;
    let label = chart_label(&missing.categories);
    Ok(ComparisonPanel {
        visible: true,
        figure: make_group_bar_chart(&missing.data, &missing.categories, &label)?,
        table: Some(create_comparison_table(&missing.data, &missing.categories, None)?),
        missing_categories: missing.category_string,
        missing_schools: missing.school_string,
    })
}

/// Builds every panel of the analysis page for the given schools.
///
/// `raw` is the full academic file; rows are selected by year and school id
/// before processing.
#[instrument(skip(raw), fields(rows = raw.height()))]
pub fn build_academic_analysis(
    raw: &DataFrame,
    year: &str,
    schools: &[i64],
) -> Result<AcademicAnalysis> {
    let year = display_year(year);
    let selected = filter_ids(&filter_year(raw, year)?, SCHOOL_ID, schools)?;
    let processed = process_k8_academic_data(&selected)?;

    let has_data = processed.height() > 0 && !proficiency_columns(&processed).is_empty();
    info!(
        "Academic analysis for {} schools in {}: {} rows, data available: {}",
        schools.len(),
        year,
        processed.height(),
        has_data
    );

    Ok(AcademicAnalysis {
        year: year.to_string(),
        main_container_visible: has_data,
        empty_container_visible: !has_data,
        no_data: NoDataPage::new(PAGE_TITLE, NO_DATA_MESSAGE),
        ela_proficiency: single_category_panel(
            &processed,
            &proficiency_column(SCHOOL_TOTAL, Subject::Ela),
            "Comparison: Current Year ELA Proficiency",
        )?,
        math_proficiency: single_category_panel(
            &processed,
            &proficiency_column(SCHOOL_TOTAL, Subject::Math),
            "Comparison: Current Year Math Proficiency",
        )?,
        iread_proficiency: single_category_panel(
            &processed,
            IREAD_PROFICIENT,
            "Comparison: Current Year IREAD Proficiency",
        )?,
        ela_by_ethnicity: grouped_panel(&processed, StudentGroup::Ethnicity, Subject::Ela)?,
        math_by_ethnicity: grouped_panel(&processed, StudentGroup::Ethnicity, Subject::Math)?,
        ela_by_subgroup: grouped_panel(&processed, StudentGroup::Subgroup, Subject::Ela)?,
        math_by_subgroup: grouped_panel(&processed, StudentGroup::Subgroup, Subject::Math)?,
    })
}
