//! Common transport-layer types shared between the compute crate and the server.
//! Everything here is plain serializable data: the server hands these shapes to
//! the browser, which is responsible for drawing them.

mod analysis;
mod dropdowns;
mod figures;

pub use analysis::{AcademicAnalysis, ComparisonPanel, NoDataPage};
pub use dropdowns::{CorporationDropdown, DropdownOption, SchoolDropdown};
pub use figures::{ChartKind, ChartSeries, ComparisonTable, Figure};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}
