use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Placeholder height used for "no data" figures.
pub const NO_DATA_FIGURE_HEIGHT: u32 = 200;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Bar,
    GroupedBar,
}

/// One named series of a chart. `values` lines up with the chart's `categories`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ChartSeries {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

/// Description of a figure the client should draw.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Figure {
    Chart {
        title: String,
        kind: ChartKind,
        /// X axis labels (school labels)
        categories: Vec<String>,
        series: Vec<ChartSeries>,
    },
    /// Empty figure carrying only a title
    NoData { title: String, height: u32 },
}

impl Figure {
    pub fn no_data(title: impl Into<String>) -> Self {
        Figure::NoData {
            title: title.into(),
            height: NO_DATA_FIGURE_HEIGHT,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Figure::Chart { title, .. } | Figure::NoData { title, .. } => title,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Figure::NoData { .. })
    }
}

/// Tabular companion of a chart. Every row has `headers.len()` cells.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq, Default)]
pub struct ComparisonTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl ComparisonTable {
    /// Table with the given headers and a single "no data" row.
    pub fn no_data(headers: &[&str]) -> Self {
        let mut headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        headers.insert(0, "School Name".to_string());
        let mut row = vec![String::new(); headers.len()];
        row[0] = "No Data to Display".to_string();
        Self {
            headers,
            rows: vec![row],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_data_figure_serializes_with_type_tag() {
        let figure = Figure::no_data("Comparison: Current Year ELA Proficiency");
        let json = serde_json::to_value(&figure).unwrap();

        assert_eq!(json["type"], "no_data");
        assert_eq!(json["height"], 200);
        assert!(figure.is_placeholder());
    }

    #[test]
    fn test_no_data_table_shape() {
        let table = ComparisonTable::no_data(&["Proficiency"]);

        assert_eq!(table.headers, vec!["School Name", "Proficiency"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].len(), 2);
        assert_eq!(table.rows[0][0], "No Data to Display");
    }
}
