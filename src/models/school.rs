//! Schools (tenants) and subscription plans.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flexible_id;
use crate::table::{SortKey, TableRow};

/// A tenant school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct School {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub plan: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl School {
    pub const COLUMNS: [&'static str; 5] = ["Name", "Plan", "Balance", "Status", "Created"];
}

impl TableRow for School {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.plan, self.status.as_deref().unwrap_or(""))
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::text(&self.name),
            1 => SortKey::text(&self.plan),
            2 => SortKey::Number(self.balance),
            3 => SortKey::opt_text(self.status.as_deref()),
            _ => self.created_at.map(SortKey::Date).unwrap_or(SortKey::Empty),
        }
    }
}

/// Subscription plan offered to schools.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub price_monthly: f64,
    #[serde(default)]
    pub max_students: Option<u32>,
}

impl Plan {
    /// Label for plan pickers, e.g. "Standard (49.00/mo)".
    pub fn label(&self) -> String {
        format!("{} ({:.2}/mo)", self.name, self.price_monthly)
    }
}

/// Body of `POST /superadmin/schools/create`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchool {
    pub name: String,
    pub subdomain: String,
    pub plan_id: String,
    pub admin_name: String,
    pub admin_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Body of a plan change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePlan {
    pub plan_id: String,
}

/// Manual balance adjustment recorded against a school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceCredit {
    pub amount: f64,
    #[serde(default)]
    pub note: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal_school() {
        let school: School = serde_json::from_str(r#"{"id":7,"name":"Oak Primary","plan":"basic","balance":12.5}"#).unwrap();

        assert_eq!(school.id, "7");
        assert_eq!(school.plan, "basic");
        assert_eq!(school.balance, 12.5);
        assert!(school.status.is_none());
        assert!(school.created_at.is_none());
    }

    #[test]
    fn test_create_school_camel_case() {
        let body = CreateSchool {
            name: "Oak".to_string(),
            subdomain: "oak".to_string(),
            plan_id: "p1".to_string(),
            admin_name: "Ana".to_string(),
            admin_email: "ana@oak.edu".to_string(),
            country: None,
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["planId"], "p1");
        assert_eq!(json["adminEmail"], "ana@oak.edu");
        assert!(json.get("country").is_none());
    }

    #[test]
    fn test_plan_label() {
        let plan = Plan {
            id: "1".to_string(),
            name: "Standard".to_string(),
            price_monthly: 49.0,
            max_students: None,
        };
        assert_eq!(plan.label(), "Standard (49.00/mo)");
    }
}
