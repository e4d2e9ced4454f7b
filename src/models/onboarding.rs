//! School onboarding requests and the public trial signup.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{flexible_id, flexible_opt_id};
use crate::table::{SortKey, TableRow};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnboardingStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    #[serde(other)]
    Unknown,
}

impl OnboardingStatus {
    pub fn name(&self) -> &'static str {
        match self {
            OnboardingStatus::Pending => "pending",
            OnboardingStatus::Approved => "approved",
            OnboardingStatus::Rejected => "rejected",
            OnboardingStatus::Unknown => "unknown",
        }
    }
}

/// A school asking to join the platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingRequest {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub school_name: String,
    #[serde(default)]
    pub contact_name: String,
    #[serde(default)]
    pub contact_email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub requested_plan: Option<String>,
    #[serde(default)]
    pub status: OnboardingStatus,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

impl OnboardingRequest {
    pub const COLUMNS: [&'static str; 6] = ["School", "Contact", "Email", "Plan", "Status", "Submitted"];

    pub fn is_pending(&self) -> bool {
        self.status == OnboardingStatus::Pending
    }
}

impl TableRow for OnboardingRequest {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.school_name, self.contact_name, self.contact_email)
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::text(&self.school_name),
            1 => SortKey::text(&self.contact_name),
            2 => SortKey::text(&self.contact_email),
            3 => SortKey::opt_text(self.requested_plan.as_deref()),
            4 => SortKey::text(self.status.name()),
            _ => self.submitted_at.map(SortKey::Date).unwrap_or(SortKey::Empty),
        }
    }
}

/// Body of a rejection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectOnboarding {
    pub reason: String,
}

/// Body of `POST /superadmin/public/onboard`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrialSignup {
    pub school_name: String,
    pub contact_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub student_count: Option<u32>,
}

impl TrialSignup {
    /// Names of required fields left blank.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.school_name.trim().is_empty() {
            missing.push("school name");
        }
        if self.contact_name.trim().is_empty() {
            missing.push("contact name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        missing
    }
}

/// Acknowledgement of a public signup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OnboardResponse {
    #[serde(default, deserialize_with = "flexible_opt_id")]
    pub request_id: Option<String>,
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_request() {
        let json = r#"{"id":5,"schoolName":"Maple","contactName":"Jo","contactEmail":"jo@maple.org","status":"approved"}"#;
        let req: OnboardingRequest = serde_json::from_str(json).unwrap();

        assert_eq!(req.id, "5");
        assert_eq!(req.status, OnboardingStatus::Approved);
        assert!(!req.is_pending());
    }

    #[test]
    fn test_signup_missing_fields() {
        let signup = TrialSignup {
            school_name: "Maple".to_string(),
            email: "  ".to_string(),
            ..Default::default()
        };
        assert_eq!(signup.missing_fields(), vec!["contact name", "email"]);
    }

    #[test]
    fn test_signup_skips_empty_optionals() {
        let signup = TrialSignup {
            school_name: "Maple".to_string(),
            contact_name: "Jo".to_string(),
            email: "jo@maple.org".to_string(),
            student_count: Some(250),
            ..Default::default()
        };
        let json = serde_json::to_value(&signup).unwrap();

        assert_eq!(json["studentCount"], 250);
        assert!(json.get("phone").is_none());
    }
}
