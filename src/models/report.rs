//! Generated tabular reports.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::table::{SortKey, TableRow};

/// Report kinds offered by the reports center.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    #[default]
    Enrollment,
    Revenue,
    Usage,
    Onboarding,
    ParentRequests,
}

impl ReportType {
    pub const ALL: [ReportType; 5] = [
        ReportType::Enrollment,
        ReportType::Revenue,
        ReportType::Usage,
        ReportType::Onboarding,
        ReportType::ParentRequests,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ReportType::Enrollment => "Enrollment",
            ReportType::Revenue => "Revenue",
            ReportType::Usage => "Platform usage",
            ReportType::Onboarding => "Onboarding funnel",
            ReportType::ParentRequests => "Parent requests",
        }
    }

    /// Identifier used in the query string and export file names.
    pub fn slug(&self) -> &'static str {
        match self {
            ReportType::Enrollment => "enrollment",
            ReportType::Revenue => "revenue",
            ReportType::Usage => "usage",
            ReportType::Onboarding => "onboarding",
            ReportType::ParentRequests => "parent_requests",
        }
    }
}

/// Parameters of a report run.
#[derive(Debug, Clone)]
pub struct ReportQuery {
    pub report_type: ReportType,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", self.report_type.slug().to_string()),
            ("from", self.from.format("%Y-%m-%d").to_string()),
            ("to", self.to.format("%Y-%m-%d").to_string()),
        ]
    }
}

/// Report result: column headers plus rows of opaque JSON cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    #[serde(default)]
    pub title: String,
    pub columns: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Render one JSON cell as display text.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => if *b { "Yes" } else { "No" }.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

impl TableRow for Vec<Value> {
    fn search_text(&self) -> String {
        self.iter().map(cell_text).collect::<Vec<_>>().join(" ")
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match self.get(column) {
            None | Some(Value::Null) => SortKey::Empty,
            Some(Value::Number(n)) => n.as_f64().map(SortKey::Number).unwrap_or(SortKey::Empty),
            Some(Value::Bool(b)) => SortKey::Bool(*b),
            Some(other) => SortKey::text(&cell_text(other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell_text(&json!(null)), "");
        assert_eq!(cell_text(&json!("Oak")), "Oak");
        assert_eq!(cell_text(&json!(12.5)), "12.5");
        assert_eq!(cell_text(&json!(true)), "Yes");
        assert_eq!(cell_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn test_numeric_cells_sort_numerically() {
        let small = vec![json!("a"), json!(9)];
        let large = vec![json!("b"), json!(10)];
        assert!(small.sort_key(1).compare(&large.sort_key(1)).is_lt());
        assert_eq!(small.sort_key(5), SortKey::Empty);
    }

    #[test]
    fn test_query_params() {
        let query = ReportQuery {
            report_type: ReportType::ParentRequests,
            from: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2025, 1, 31).unwrap(),
        };
        assert_eq!(query.to_params()[0], ("type", "parent_requests".to_string()));
        assert_eq!(query.to_params()[2], ("to", "2025-01-31".to_string()));
    }

    #[test]
    fn test_decode_report() {
        let json = r#"{"title":"Revenue","columns":["School","Amount"],"rows":[["Oak",120.0],["Elm",null]]}"#;
        let report: Report = serde_json::from_str(json).unwrap();
        assert_eq!(report.columns.len(), 2);
        assert_eq!(report.rows[1][1], Value::Null);
    }
}
