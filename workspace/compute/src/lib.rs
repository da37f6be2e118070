//! Academic data processing for the dashboard: loading the flat files,
//! computing proficiency rates and assembling chart/table descriptions.

pub mod analysis;
pub mod categories;
pub mod dataset;
pub mod dropdowns;
pub mod error;
pub mod figures;
pub mod labels;
pub mod process;

pub use analysis::build_academic_analysis;
pub use dataset::AcademicDataSource;
pub use dropdowns::{academic_years, corporation_dropdown, school_dropdown};
pub use error::{AnalysisError, Result};
