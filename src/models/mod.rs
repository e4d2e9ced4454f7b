//! Records exchanged with the platform API.
//!
//! The wire format is camelCase JSON. Fields the console can live without
//! carry `#[serde(default)]` so sparse responses still decode.

pub mod audit;
pub mod calendar;
pub mod dashboard;
pub mod onboarding;
pub mod parent_request;
pub mod report;
pub mod role;
pub mod school;
pub mod school_admin;
pub mod security;

pub use audit::{AuditLogEntry, AuditQuery, RiskLevel};
pub use calendar::{CreateEvent, EventType, SchoolEvent};
pub use dashboard::DashboardStats;
pub use onboarding::{OnboardResponse, OnboardingRequest, OnboardingStatus, RejectOnboarding, TrialSignup};
pub use parent_request::{ParentRequest, RequestStatus, UpdateRequestStatus};
pub use report::{Report, ReportQuery, ReportType};
pub use role::{Role, RoleInput};
pub use school::{BalanceCredit, ChangePlan, CreateSchool, Plan, School};
pub use school_admin::{CreateSchoolAdmin, SchoolAdmin, UpdateSchoolAdmin};
pub use security::{MfaCode, MfaSetup, MfaStatus, SecurityPolicy, SsoConfig, SsoProvider};

use serde::{Deserialize, Deserializer};

/// Accept record ids sent either as JSON strings or numbers.
pub(crate) fn flexible_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!("invalid id: {other}"))),
    }
}

/// Optional variant of [`flexible_id`].
pub(crate) fn flexible_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let id = flexible_id(deserializer)?;
    Ok(if id.is_empty() { None } else { Some(id) })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct WithId {
        #[serde(deserialize_with = "flexible_id")]
        id: String,
    }

    #[test]
    fn test_flexible_id() {
        let s: WithId = serde_json::from_str(r#"{"id":"a1"}"#).unwrap();
        assert_eq!(s.id, "a1");

        let n: WithId = serde_json::from_str(r#"{"id":42}"#).unwrap();
        assert_eq!(n.id, "42");

        assert!(serde_json::from_str::<WithId>(r#"{"id":[1]}"#).is_err());
    }
}
