//! Administrators of a single school.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::flexible_id;
use crate::table::{SortKey, TableRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolAdmin {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

impl SchoolAdmin {
    pub const COLUMNS: [&'static str; 4] = ["Name", "Email", "Active", "Last Login"];
}

impl TableRow for SchoolAdmin {
    fn search_text(&self) -> String {
        format!("{} {}", self.name, self.email)
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::text(&self.name),
            1 => SortKey::text(&self.email),
            2 => SortKey::Bool(self.is_active),
            _ => self.last_login.map(SortKey::Date).unwrap_or(SortKey::Empty),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSchoolAdmin {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSchoolAdmin {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_active_by_default() {
        let admin: SchoolAdmin = serde_json::from_str(r#"{"id":1,"name":"Ana","email":"ana@oak.edu"}"#).unwrap();
        assert!(admin.is_active);
        assert!(admin.last_login.is_none());
    }
}
