use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Idle,
    Offline,
}

impl EmployeeStatus {
    pub fn label(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Idle => "idle",
            EmployeeStatus::Offline => "offline",
        }
    }
}

/// A monitored user/workstation pair. The list is replaced wholesale on every
/// successful fetch; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub username: String,
    pub computer_name: String,
    pub status: EmployeeStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
}

/// One recorded window/process usage sample. Shared by the recent-activity
/// feed and the per-employee activity table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub computer_name: Option<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_title: Option<String>,
    pub process_name: String,
    pub duration: u64,
}

/// Accumulated seconds per application name. The backend sends this unordered;
/// display order is imposed client-side.
pub type AppUsage = HashMap<String, u64>;

#[derive(Debug, Clone, Copy)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn last_hours(hours: i64) -> Self {
        let to = Utc::now();
        Self {
            from: to - Duration::hours(hours),
            to,
        }
    }

    /// Default range when nothing was chosen: yesterday to now.
    pub fn last_24h() -> Self {
        Self::last_hours(24)
    }

    pub fn as_query(&self) -> [(&'static str, String); 2] {
        [
            ("from", self.from.to_rfc3339()),
            ("to", self.to.to_rfc3339()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_lowercase_wire_names() {
        let status: EmployeeStatus = serde_json::from_str("\"idle\"").unwrap();
        assert_eq!(status, EmployeeStatus::Idle);
        assert_eq!(
            serde_json::to_string(&EmployeeStatus::Active).unwrap(),
            "\"active\""
        );
    }

    #[test]
    fn employee_parses_without_last_seen() {
        let employee: Employee = serde_json::from_str(
            r#"{"username":"alice","computer_name":"WS-01","status":"active"}"#,
        )
        .unwrap();
        assert_eq!(employee.username, "alice");
        assert!(employee.last_seen.is_none());
    }

    #[test]
    fn activity_event_tolerates_missing_window_title() {
        let event: ActivityEvent = serde_json::from_str(
            r#"{"username":"bob","timestamp":"2024-05-01T10:00:00Z","process_name":"firefox","duration":42}"#,
        )
        .unwrap();
        assert!(event.window_title.is_none());
        assert_eq!(event.duration, 42);
    }

    #[test]
    fn time_range_query_is_rfc3339() {
        let range = TimeRange::last_24h();
        assert!(range.from < range.to);
        let [(from_key, from), (to_key, to)] = range.as_query();
        assert_eq!(from_key, "from");
        assert_eq!(to_key, "to");
        assert!(from.contains('T'));
        assert!(to.contains('T'));
    }
}
