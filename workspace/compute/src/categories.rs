//! Category and column naming of the academic data.
//!
//! Proficiency columns are named `<Category>|<Subject> Proficient %`, derived
//! from the `<Category>|<Subject> Total Tested` / `Total Proficient` count
//! pairs of the raw file.

use crate::dataset::{HIGH_GRADE, LOW_GRADE, SCHOOL_NAME};

/// Columns that describe a school rather than measure it.
pub const INFO_CATEGORIES: [&str; 3] = [SCHOOL_NAME, LOW_GRADE, HIGH_GRADE];

pub const ETHNICITY: [&str; 7] = [
    "American Indian",
    "Asian",
    "Black",
    "Hispanic",
    "Multiracial",
    "Native Hawaiian or Other Pacific Islander",
    "White",
];

pub const SUBGROUP: [&str; 6] = [
    "Special Education",
    "General Education",
    "Paid Meals",
    "Free/Reduced Price Meals",
    "English Language Learners",
    "Non-English Language Learners",
];

pub const SCHOOL_TOTAL: &str = "School Total";

pub const TOTAL_TESTED_SUFFIX: &str = " Total Tested";
pub const TOTAL_PROFICIENT_SUFFIX: &str = " Total Proficient";
pub const PROFICIENT_SUFFIX: &str = " Proficient %";

pub const IREAD_PASS_N: &str = "IREAD Pass N";
pub const IREAD_TEST_N: &str = "IREAD Test N";
pub const IREAD_PROFICIENT: &str = "IREAD Proficient %";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Ela,
    Math,
}

impl Subject {
    pub fn as_str(&self) -> &'static str {
        match self {
            Subject::Ela => "ELA",
            Subject::Math => "Math",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentGroup {
    Ethnicity,
    Subgroup,
}

impl StudentGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            StudentGroup::Ethnicity => "Ethnicity",
            StudentGroup::Subgroup => "Subgroup",
        }
    }

    pub fn members(&self) -> &'static [&'static str] {
        match self {
            StudentGroup::Ethnicity => &ETHNICITY,
            StudentGroup::Subgroup => &SUBGROUP,
        }
    }
}

/// `School Total|ELA Proficient %` and friends.
pub fn proficiency_column(category: &str, subject: Subject) -> String {
    format!("{}|{}{}", category, subject.as_str(), PROFICIENT_SUFFIX)
}

/// Proficiency column names for every member of `group`, in display order.
pub fn group_headers(group: StudentGroup, subject: Subject) -> Vec<String> {
    group
        .members()
        .iter()
        .map(|member| proficiency_column(member, subject))
        .collect()
}

/// The category part of a proficiency column: `Black|ELA Proficient %` -> `Black`.
pub fn category_name(column: &str) -> &str {
    column.split('|').next().unwrap_or(column)
}

pub fn is_proficiency_column(column: &str) -> bool {
    column.ends_with(PROFICIENT_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_naming() {
        assert_eq!(
            proficiency_column(SCHOOL_TOTAL, Subject::Ela),
            "School Total|ELA Proficient %"
        );
        assert_eq!(category_name("Paid Meals|Math Proficient %"), "Paid Meals");
        assert_eq!(category_name(IREAD_PROFICIENT), IREAD_PROFICIENT);
        assert!(is_proficiency_column(IREAD_PROFICIENT));
        assert!(!is_proficiency_column(SCHOOL_NAME));
    }

    #[test]
    fn test_group_headers_follow_member_order() {
        let headers = group_headers(StudentGroup::Subgroup, Subject::Math);
        assert_eq!(headers.len(), SUBGROUP.len());
        assert_eq!(headers[0], "Special Education|Math Proficient %");
        assert_eq!(headers[5], "Non-English Language Learners|Math Proficient %");
    }
}
