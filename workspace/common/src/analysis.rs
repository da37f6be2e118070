use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::figures::{ComparisonTable, Figure};

/// Message block shown instead of the analysis page when nothing can be drawn.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NoDataPage {
    pub title: String,
    pub message: String,
}

impl NoDataPage {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// A chart with its table and the notes about what was left out of it.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ComparisonPanel {
    /// Whether the panel's container should be displayed
    pub visible: bool,
    pub figure: Figure,
    pub table: Option<ComparisonTable>,
    /// Requested categories with no data, empty when none
    pub missing_categories: String,
    /// Selected schools with no data in any category, empty when none
    pub missing_schools: String,
}

impl ComparisonPanel {
    /// A hidden panel holding only a placeholder figure.
    pub fn placeholder(title: impl Into<String>) -> Self {
        Self {
            visible: false,
            figure: Figure::no_data(title),
            table: None,
            missing_categories: String::new(),
            missing_schools: String::new(),
        }
    }
}

/// Everything the academic analysis page displays for one year and school set.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AcademicAnalysis {
    /// Year the data was taken from (may differ from the requested one)
    pub year: String,
    pub main_container_visible: bool,
    pub empty_container_visible: bool,
    pub no_data: NoDataPage,
    pub ela_proficiency: ComparisonPanel,
    pub math_proficiency: ComparisonPanel,
    pub iread_proficiency: ComparisonPanel,
    pub ela_by_ethnicity: ComparisonPanel,
    pub math_by_ethnicity: ComparisonPanel,
    pub ela_by_subgroup: ComparisonPanel,
    pub math_by_subgroup: ComparisonPanel,
}
