//! Options of the year, corporation and school selectors.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use common::{CorporationDropdown, DropdownOption, SchoolDropdown};
use polars::prelude::*;
use tracing::{debug, instrument};

use crate::dataset::{
    CORPORATION_ID, CORPORATION_NAME, SCHOOL_ID, SCHOOL_NAME, YEAR, filter_ids, filter_year,
    id_values, string_values,
};
use crate::error::Result;

/// Distinct years of the academic file, newest first.
pub fn academic_years(df: &DataFrame) -> Result<Vec<String>> {
    let years: BTreeSet<(i64, String)> = string_values(df, YEAR)?
        .into_iter()
        .flatten()
        .filter(|y| !y.is_empty())
        .map(|y| (y.parse::<i64>().unwrap_or(i64::MIN), y))
        .collect();
    Ok(years.into_iter().rev().map(|(_, y)| y).collect())
}

/// `{label: name, value: id}` options sorted by label. When one label maps to
/// several ids the last row wins. Rows without a name or id are skipped.
fn sorted_options(names: Vec<Option<String>>, ids: Vec<Option<i64>>) -> Vec<DropdownOption> {
    let by_name: BTreeMap<String, i64> = names
        .into_iter()
        .zip(ids)
        .filter_map(|(name, id)| Some((name?, id?)))
        .collect();
    by_name
        .into_iter()
        .map(|(label, value)| DropdownOption::new(label, value))
        .collect()
}

/// Corporations with records in `year`. The current selection is passed through.
#[instrument(skip(df))]
pub fn corporation_dropdown(
    df: &DataFrame,
    year: &str,
    selected: &[i64],
) -> Result<CorporationDropdown> {
    let rows = filter_year(df, year)?;
    let options = sorted_options(
        string_values(&rows, CORPORATION_NAME)?,
        id_values(&rows, CORPORATION_ID)?,
    );
    debug!("{} corporations for year {}", options.len(), year);

    Ok(CorporationDropdown {
        options,
        value: selected.to_vec(),
    })
}

/// Schools of the selected corporations. A corporation that runs a single
/// school gets that school added to the selection.
#[instrument(skip(df))]
pub fn school_dropdown(
    df: &DataFrame,
    corporations: &[i64],
    selected: &[i64],
) -> Result<SchoolDropdown> {
    let rows = filter_ids(df, CORPORATION_ID, corporations)?;
    let school_ids = id_values(&rows, SCHOOL_ID)?;
    let corporation_ids = id_values(&rows, CORPORATION_ID)?;

    let mut schools_per_corporation: HashMap<i64, BTreeSet<i64>> = HashMap::new();
    for (corporation, school) in corporation_ids.iter().zip(&school_ids) {
        if let (Some(corporation), Some(school)) = (corporation, school) {
            schools_per_corporation
                .entry(*corporation)
                .or_default()
                .insert(*school);
        }
    }

    let options = sorted_options(string_values(&rows, SCHOOL_NAME)?, school_ids);

    let mut value = selected.to_vec();
    for corporation in corporations {
        let Some(schools) = schools_per_corporation.get(corporation) else {
            debug!("Corporation {} has no schools", corporation);
            continue;
        };
        if let (1, Some(&school)) = (schools.len(), schools.first()) {
            if !value.contains(&school) {
                debug!("Auto-selecting school {} of corporation {}", school, corporation);
                value.push(school);
            }
        }
    }

    Ok(SchoolDropdown { options, value })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::new(vec![
            Series::new(YEAR.into(), vec!["2021", "2022", "2022", "2022", "2019", "2022"]).into(),
            Series::new(CORPORATION_ID.into(), vec!["10", "10", "10", "20", "20", "30"]).into(),
            Series::new(
                CORPORATION_NAME.into(),
                vec!["Zeta Schools", "Zeta Schools", "Zeta Schools", "Alpha Charter", "Alpha Charter", "Mid Corp"],
            )
            .into(),
            Series::new(SCHOOL_ID.into(), vec!["101", "101", "102", "201", "201", "301"]).into(),
            Series::new(
                SCHOOL_NAME.into(),
                vec!["North", "North", "East", "Alpha One", "Alpha One", "Middle"],
            )
            .into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_years_newest_first() {
        assert_eq!(academic_years(&frame()).unwrap(), vec!["2022", "2021", "2019"]);
    }

    #[test]
    fn test_corporation_options_sorted_by_name() {
        let dropdown = corporation_dropdown(&frame(), "2022", &[]).unwrap();
        assert_eq!(
            dropdown.options,
            vec![
                DropdownOption::new("Alpha Charter", 20),
                DropdownOption::new("Mid Corp", 30),
                DropdownOption::new("Zeta Schools", 10),
            ]
        );
        assert!(dropdown.value.is_empty());

        let dropdown = corporation_dropdown(&frame(), "2019", &[20, 10]).unwrap();
        assert_eq!(dropdown.options, vec![DropdownOption::new("Alpha Charter", 20)]);
        assert_eq!(dropdown.value, vec![20, 10]);
    }

    #[test]
    fn test_school_options_and_auto_selection() {
        let dropdown = school_dropdown(&frame(), &[10, 20], &[102]).unwrap();

        assert_eq!(
            dropdown.options,
            vec![
                DropdownOption::new("Alpha One", 201),
                DropdownOption::new("East", 102),
                DropdownOption::new("North", 101),
            ]
        );
        // Corporation 20 runs one school, corporation 10 runs two
        assert_eq!(dropdown.value, vec![102, 201]);
    }

    #[test]
    fn test_school_dropdown_ignores_unknown_corporation() {
        let dropdown = school_dropdown(&frame(), &[999], &[]).unwrap();
        assert!(dropdown.options.is_empty());
        assert!(dropdown.value.is_empty());
    }

    #[test]
    fn test_rows_with_blank_ids_are_skipped() {
        let df = DataFrame::new(vec![
            Series::new(YEAR.into(), vec!["2022", "2022"]).into(),
            Series::new(CORPORATION_ID.into(), vec![Some("10"), None]).into(),
            Series::new(CORPORATION_NAME.into(), vec!["Zeta Schools", "Unknown"]).into(),
            Series::new(SCHOOL_ID.into(), vec![Some("101"), Some("")]).into(),
            Series::new(SCHOOL_NAME.into(), vec!["North", "Orphan"]).into(),
        ])
        .unwrap();

        let corporations = corporation_dropdown(&df, "2022", &[]).unwrap();
        assert_eq!(corporations.options, vec![DropdownOption::new("Zeta Schools", 10)]);

        let schools = school_dropdown(&df, &[10], &[]).unwrap();
        assert_eq!(schools.options, vec![DropdownOption::new("North", 101)]);
        assert_eq!(schools.value, vec![101]);
    }

    #[test]
    fn test_auto_selected_school_not_duplicated() {
        let dropdown = school_dropdown(&frame(), &[30], &[301]).unwrap();
        assert_eq!(dropdown.value, vec![301]);
    }
}
