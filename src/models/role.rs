//! Platform roles.

use serde::{Deserialize, Serialize};

use super::flexible_id;
use crate::table::{SortKey, TableRow};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub user_count: u32,
    #[serde(default)]
    pub permissions: Vec<String>,
}

impl Role {
    pub const COLUMNS: [&'static str; 4] = ["Name", "Description", "Users", "Permissions"];
}

impl TableRow for Role {
    fn search_text(&self) -> String {
        format!("{} {} {}", self.name, self.description, self.permissions.join(" "))
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::text(&self.name),
            1 => SortKey::text(&self.description),
            2 => SortKey::Number(self.user_count as f64),
            _ => SortKey::Number(self.permissions.len() as f64),
        }
    }
}

/// Body for creating or updating a role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInput {
    pub name: String,
    pub description: String,
    pub permissions: Vec<String>,
}

/// Split a comma or newline separated permission list.
pub fn parse_permissions(input: &str) -> Vec<String> {
    input
        .split([',', '\n'])
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_permissions() {
        assert_eq!(
            parse_permissions("schools.read, schools.write\n\n billing.read ,"),
            vec!["schools.read", "schools.write", "billing.read"]
        );
        assert!(parse_permissions(" , ").is_empty());
    }

    #[test]
    fn test_decode_role_defaults() {
        let role: Role = serde_json::from_str(r#"{"id":"r","name":"Support"}"#).unwrap();
        assert_eq!(role.user_count, 0);
        assert!(role.permissions.is_empty());
    }
}
