//! Platform calendar events.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{flexible_id, flexible_opt_id};
use crate::table::{SortKey, TableRow};

/// Kind of calendar entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Holiday,
    Exam,
    Meeting,
    #[default]
    Event,
    #[serde(other)]
    Other,
}

impl EventType {
    pub const ALL: [EventType; 4] = [EventType::Holiday, EventType::Exam, EventType::Meeting, EventType::Event];

    pub fn name(&self) -> &'static str {
        match self {
            EventType::Holiday => "Holiday",
            EventType::Exam => "Exam",
            EventType::Meeting => "Meeting",
            EventType::Event => "Event",
            EventType::Other => "Other",
        }
    }
}

/// A dated calendar entry, optionally scoped to one school.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolEvent {
    #[serde(deserialize_with = "flexible_id")]
    pub id: String,
    pub date: NaiveDate,
    pub title: String,
    /// Start time as "HH:MM", absent for all-day events.
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub event_type: EventType,
    #[serde(default, deserialize_with = "flexible_opt_id")]
    pub school_id: Option<String>,
}

impl TableRow for SchoolEvent {
    fn search_text(&self) -> String {
        format!("{} {}", self.title, self.event_type.name())
    }

    fn sort_key(&self, column: usize) -> SortKey {
        match column {
            0 => SortKey::Day(self.date),
            1 => SortKey::opt_text(self.time.as_deref()),
            2 => SortKey::text(&self.title),
            _ => SortKey::text(self.event_type.name()),
        }
    }
}

/// Body for creating a calendar event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEvent {
    pub date: NaiveDate,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    pub event_type: EventType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub school_id: Option<String>,
}

/// Check a "HH:MM" time string.
pub fn is_valid_time(input: &str) -> bool {
    chrono::NaiveTime::parse_from_str(input.trim(), "%H:%M").is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_event() {
        let json = r#"{"id":1,"date":"2025-09-01","title":"First day","eventType":"event","schoolId":12}"#;
        let event: SchoolEvent = serde_json::from_str(json).unwrap();

        assert_eq!(event.id, "1");
        assert_eq!(event.date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(event.event_type, EventType::Event);
        assert_eq!(event.school_id.as_deref(), Some("12"));
        assert!(event.time.is_none());
    }

    #[test]
    fn test_unknown_event_type() {
        let json = r#"{"id":"e","date":"2025-09-01","title":"Trip","eventType":"excursion"}"#;
        let event: SchoolEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event.event_type, EventType::Other);
    }

    #[test]
    fn test_time_validation() {
        assert!(is_valid_time("08:30"));
        assert!(is_valid_time(" 23:59 "));
        assert!(!is_valid_time("24:00"));
        assert!(!is_valid_time("8.30"));
    }
}
