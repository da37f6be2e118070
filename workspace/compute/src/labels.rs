use polars::prelude::*;

use crate::categories::{ETHNICITY, SUBGROUP, category_name, is_proficiency_column};
use crate::dataset::{HIGH_GRADE, LOW_GRADE, SCHOOL_NAME, has_column, numeric_values, string_values};
use crate::error::Result;

/// `Alpha Elementary (KG-05)`; the grade span is left off when unknown.
pub fn school_label(name: &str, low_grade: Option<&str>, high_grade: Option<&str>) -> String {
    match (low_grade, high_grade) {
        (Some(low), Some(high)) if !low.is_empty() && !high.is_empty() => {
            format!("{} ({}-{})", name, low, high)
        }
        _ => name.to_string(),
    }
}

/// Labels for every row of a frame carrying the info categories.
pub fn school_labels(df: &DataFrame) -> Result<Vec<String>> {
    let names = string_values(df, SCHOOL_NAME)?;
    let lows = optional_strings(df, LOW_GRADE)?;
    let highs = optional_strings(df, HIGH_GRADE)?;

    Ok(names
        .iter()
        .zip(lows.iter().zip(highs.iter()))
        .map(|(name, (low, high))| {
            school_label(
                name.as_deref().unwrap_or_default(),
                low.as_deref(),
                high.as_deref(),
            )
        })
        .collect())
}

fn optional_strings(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    if has_column(df, name) {
        string_values(df, name)
    } else {
        Ok(vec![None; df.height()])
    }
}

/// Outcome of removing empty categories and schools from a grouped comparison.
#[derive(Debug, Clone)]
pub struct MissingCategories {
    /// Frame restricted to schools with at least one value
    pub data: DataFrame,
    /// Category columns left in `data`, in header order
    pub categories: Vec<String>,
    /// Human readable list of requested categories with no data, or empty
    pub category_string: String,
    /// Human readable list of schools dropped for having no data, or empty
    pub school_string: String,
}

/// Splits the requested `headers` into those with data and those without, and
/// drops the schools that have no value in any remaining category.
pub fn identify_missing_categories(df: &DataFrame, headers: &[String]) -> Result<MissingCategories> {
    let mut categories = Vec::new();
    let mut missing = Vec::new();
    for header in headers {
        let has_data = has_column(df, header)
            && numeric_values(df, header)?.iter().any(|v| v.is_some());
        if has_data {
            categories.push(header.clone());
        } else {
            missing.push(category_name(header).to_string());
        }
    }

    let mut columns: Vec<Vec<Option<f64>>> = Vec::with_capacity(categories.len());
    for category in &categories {
        columns.push(numeric_values(df, category)?);
    }
    let keep: Vec<bool> = (0..df.height())
        .map(|row| columns.iter().any(|values| values[row].is_some()))
        .collect();

    let names = string_values(df, SCHOOL_NAME)?;
    let dropped: Vec<String> = names
        .iter()
        .zip(&keep)
        .filter(|(_, keep)| !**keep)
        .map(|(name, _)| name.clone().unwrap_or_default())
        .collect();

    let mask: BooleanChunked = keep.into_iter().collect();
    let mut selection: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|c| c.to_string())
        .filter(|c| !is_proficiency_column(c))
        .collect();
    selection.extend(categories.iter().cloned());
    let data = df.select(selection)?.filter(&mask)?;

    let category_string = if missing.is_empty() {
        String::new()
    } else {
        format!("Data not available for: {}.", missing.join(", "))
    };
    let school_string = if dropped.is_empty() {
        String::new()
    } else {
        format!("Insufficient n-size or no data: {}.", dropped.join(", "))
    };

    Ok(MissingCategories {
        data,
        categories,
        category_string,
        school_string,
    })
}

/// Chart title for a grouped comparison, worked out from the category
/// columns it holds: `Comparison: ELA Proficiency by Ethnicity`.
pub fn chart_label(categories: &[String]) -> String {
    let Some(first) = categories.first() else {
        return "Comparison".to_string();
    };
    let subject = if first.contains("|Math") { "Math" } else { "ELA" };
    let group = if categories
        .iter()
        .all(|c| ETHNICITY.contains(&category_name(c)))
    {
        "Ethnicity"
    } else if categories.iter().all(|c| SUBGROUP.contains(&category_name(c))) {
        "Subgroup"
    } else {
        "Category"
    };
    format!("Comparison: {} Proficiency by {}", subject, group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::{StudentGroup, Subject, group_headers};

    fn grouped_frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(SCHOOL_NAME.into(), vec!["Alpha", "Beta", "Gamma"]).into(),
            Series::new(LOW_GRADE.into(), vec!["KG", "06", "KG"]).into(),
            Series::new(HIGH_GRADE.into(), vec!["05", "08", "08"]).into(),
            Series::new("Black|ELA Proficient %".into(), vec![Some(0.3), None, Some(0.5)]).into(),
            Series::new("White|ELA Proficient %".into(), vec![Some(0.6), None, None]).into(),
            Series::new("Asian|ELA Proficient %".into(), vec![None::<f64>, None, None]).into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_school_label() {
        assert_eq!(school_label("Alpha", Some("KG"), Some("05")), "Alpha (KG-05)");
        assert_eq!(school_label("Alpha", None, Some("05")), "Alpha");
        assert_eq!(school_label("Alpha", Some(""), Some("05")), "Alpha");
    }

    #[test]
    fn test_school_labels_from_frame() {
        let labels = school_labels(&grouped_frame()).unwrap();
        assert_eq!(labels, vec!["Alpha (KG-05)", "Beta (06-08)", "Gamma (KG-08)"]);
    }

    #[test]
    fn test_identify_missing_categories() {
        let headers = group_headers(StudentGroup::Ethnicity, Subject::Ela);
        let result = identify_missing_categories(&grouped_frame(), &headers).unwrap();

        assert_eq!(
            result.categories,
            vec!["Black|ELA Proficient %".to_string(), "White|ELA Proficient %".to_string()]
        );
        assert_eq!(result.data.height(), 2);
        assert_eq!(
            string_values(&result.data, SCHOOL_NAME).unwrap(),
            vec![Some("Alpha".to_string()), Some("Gamma".to_string())]
        );
        assert!(!has_column(&result.data, "Asian|ELA Proficient %"));
        assert!(result.category_string.contains("Asian"));
        assert!(result.category_string.contains("American Indian"));
        assert!(!result.category_string.contains("Black"));
        assert_eq!(result.school_string, "Insufficient n-size or no data: Beta.");
    }

    #[test]
    fn test_chart_label() {
        let ethnicity = group_headers(StudentGroup::Ethnicity, Subject::Math);
        assert_eq!(chart_label(&ethnicity), "Comparison: Math Proficiency by Ethnicity");

        let subgroup = group_headers(StudentGroup::Subgroup, Subject::Ela);
        assert_eq!(chart_label(&subgroup[1..3]), "Comparison: ELA Proficiency by Subgroup");
    }
}
