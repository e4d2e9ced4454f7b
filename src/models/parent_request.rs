//! Requests submitted by parents to their school.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{flexible_id, flexible_opt_id};
use crate::table::{SortKey, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Pending,
    InReview,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl RequestStatus {
    /// Statuses an operator can move a request to.
    pub const SETTABLE: [RequestStatus; 4] = [
        RequestStatus::Pending,
        RequestStatus::InReview,
        RequestStatus::Approved,
        RequestStatus::Rejected,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "Pending",
            RequestStatus::InReview => "In review",
            RequestStatus::Approved => "Approved",
            RequestStatus::Rejected => "Rejected",
            RequestStatus::Unknown => "Unknown",
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, RequestStatus::Approved | RequestStatus::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentRequest {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    #[serde(default, deserialize_with = "flexible_opt_id")]
    pub school_id: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub parent_name: Option<String>,
    pub submission_date: DateTime<Utc>,
    #[serde(rename = "type")]
    pub request_type: String,
    #[serde(default)]
    pub status: RequestStatus,
    #[serde(default)]
    pub details: String,
}

impl ParentRequest {
    pub const COLUMNS: [&'static str; 6] = ["Submitted", "School", "Parent", "Type", "Status", "Details"];
}

impl TableRow for ParentRequest {
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {}",
            self.school_name.as_deref().unwrap_or(""),
            self.parent_name.as_deref().unwrap_or(""),
            self.request_type,
            self.details
        )
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::Date(self.submission_date),
            1 => SortKey::opt_text(self.school_name.as_deref()),
            2 => SortKey::opt_text(self.parent_name.as_deref()),
            3 => SortKey::text(&self.request_type),
            4 => SortKey::text(self.status.name()),
            _ => SortKey::text(&self.details),
        }
    }
}

/// Body of a status change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequestStatus {
    pub status: RequestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_request() {
        let json = r#"{
            "id": "r1",
            "schoolId": 4,
            "submissionDate": "2025-02-10T09:00:00Z",
            "type": "transfer",
            "status": "in_review",
            "details": "Moving in March"
        }"#;
        let req: ParentRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.school_id.as_deref(), Some("4"));
        assert_eq!(req.request_type, "transfer");
        assert_eq!(req.status, RequestStatus::InReview);
        assert!(!req.status.is_closed());
    }

    #[test]
    fn test_status_body() {
        let body = UpdateRequestStatus {
            status: RequestStatus::InReview,
            note: None,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"status":"in_review"}"#);
    }
}
