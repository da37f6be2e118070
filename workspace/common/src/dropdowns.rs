use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single `{label, value}` entry of a dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct DropdownOption {
    pub label: String,
    pub value: i64,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: i64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Options and current selection of the corporation dropdown.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct CorporationDropdown {
    pub options: Vec<DropdownOption>,
    pub value: Vec<i64>,
}

/// Options and current selection of the school dropdown.
///
/// `value` may contain schools the caller never picked: a corporation with a
/// single school gets that school selected automatically.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct SchoolDropdown {
    pub options: Vec<DropdownOption>,
    pub value: Vec<i64>,
}
