//! Audit log entries.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{flexible_id, flexible_opt_id};
use crate::table::{SortKey, TableRow};

/// Risk classification assigned by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
    #[default]
    #[serde(other)]
    Unknown,
}

impl RiskLevel {
    pub const FILTERS: [RiskLevel; 4] = [RiskLevel::Low, RiskLevel::Medium, RiskLevel::High, RiskLevel::Critical];

    pub fn name(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
            RiskLevel::Critical => "critical",
            RiskLevel::Unknown => "unknown",
        }
    }

    fn rank(&self) -> u8 {
        match self {
            RiskLevel::Unknown => 0,
            RiskLevel::Low => 1,
            RiskLevel::Medium => 2,
            RiskLevel::High => 3,
            RiskLevel::Critical => 4,
        }
    }
}

/// One audited action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditLogEntry {
    #[serde(deserialize_with = "flexible_id", default)]
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub action: String,
    #[serde(default, deserialize_with = "flexible_opt_id")]
    pub user_id: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
    #[serde(default)]
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

impl AuditLogEntry {
    pub const COLUMNS: [&'static str; 6] = ["Time", "Action", "User", "IP Address", "Risk", "Details"];

    /// Details flattened to one line of text.
    pub fn details_text(&self) -> String {
        match &self.details {
            None | Some(serde_json::Value::Null) => String::new(),
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }
}

impl TableRow for AuditLogEntry {
    fn search_text(&self) -> String {
        format!(
            "{} {} {} {} {}",
            self.action,
            self.user_id.as_deref().unwrap_or(""),
            self.ip_address.as_deref().unwrap_or(""),
            self.user_agent.as_deref().unwrap_or(""),
            self.details_text()
        )
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::Date(self.timestamp),
            1 => SortKey::text(&self.action),
            2 => SortKey::opt_text(self.user_id.as_deref()),
            3 => SortKey::opt_text(self.ip_address.as_deref()),
            4 => SortKey::Number(self.risk_level.rank() as f64),
            _ => SortKey::text(&self.details_text()),
        }
    }
}

/// Server-side filters for the audit log listing.
#[derive(Debug, Clone, Default)]
pub struct AuditQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub risk_level: Option<RiskLevel>,
}

impl AuditQuery {
    /// Query-string pairs, omitting unset filters.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(("from", from.format("%Y-%m-%d").to_string()));
        }
        if let Some(to) = self.to {
            params.push(("to", to.format("%Y-%m-%d").to_string()));
        }
        if let Some(risk) = self.risk_level {
            params.push(("riskLevel", risk.name().to_string()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entry() {
        let json = r#"{
            "id": "a1",
            "timestamp": "2025-03-01T08:30:00Z",
            "action": "school.create",
            "userId": "u9",
            "ipAddress": "10.0.0.1",
            "userAgent": "Mozilla/5.0",
            "riskLevel": "high",
            "details": {"schoolId": 3}
        }"#;
        let entry: AuditLogEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.risk_level, RiskLevel::High);
        assert_eq!(entry.ip_address.as_deref(), Some("10.0.0.1"));
        assert_eq!(entry.details_text(), r#"{"schoolId":3}"#);
    }

    #[test]
    fn test_numeric_user_id() {
        let json = r#"{"id":7,"timestamp":"2025-03-01T08:30:00Z","action":"login","userId":42}"#;
        let entry: AuditLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.id, "7");
        assert_eq!(entry.user_id.as_deref(), Some("42"));

        let json = r#"{"timestamp":"2025-03-01T08:30:00Z","action":"login","userId":null}"#;
        let entry: AuditLogEntry = serde_json::from_str(json).unwrap();
        assert!(entry.user_id.is_none());
    }

    #[test]
    fn test_unknown_risk_level_tolerated() {
        let json = r#"{"timestamp":"2025-03-01T08:30:00Z","action":"x","riskLevel":"severe"}"#;
        let entry: AuditLogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.risk_level, RiskLevel::Unknown);
    }

    #[test]
    fn test_risk_sorts_by_severity() {
        let low = AuditLogEntry {
            id: "1".to_string(),
            timestamp: Utc::now(),
            action: "a".to_string(),
            user_id: None,
            ip_address: None,
            user_agent: None,
            risk_level: RiskLevel::Low,
            details: None,
        };
        let critical = AuditLogEntry {
            risk_level: RiskLevel::Critical,
            ..low.clone()
        };
        assert!(low.sort_key(4).compare(&critical.sort_key(4)).is_lt());
    }

    #[test]
    fn test_query_params() {
        let query = AuditQuery {
            from: NaiveDate::from_ymd_opt(2025, 1, 1),
            to: None,
            risk_level: Some(RiskLevel::Critical),
        };
        assert_eq!(
            query.to_params(),
            vec![("from", "2025-01-01".to_string()), ("riskLevel", "critical".to_string())]
        );
        assert!(AuditQuery::default().to_params().is_empty());
    }
}
