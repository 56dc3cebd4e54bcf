//! Pure projections from dashboard state to typed row descriptors. Nothing in
//! here touches the terminal; `ui` turns these into widgets. Same state in,
//! same rows out.

use crate::state::DashboardState;
use staff_monitor_common::{
    format_duration, format_time, ActivityEvent, Employee, EmployeeStatus,
};

/// The recent feed shows at most this many entries, in backend order.
pub const RECENT_LIMIT: usize = 20;

pub const UNTITLED_WINDOW: &str = "(untitled)";

#[derive(Debug, Clone, PartialEq)]
pub struct EmployeeRow {
    pub username: String,
    pub computer_name: String,
    pub status: EmployeeStatus,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub username: String,
    pub time: String,
    pub window: String,
    pub process: String,
    pub duration: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub active: usize,
    pub idle: usize,
    pub offline: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UsageBar {
    pub app: String,
    pub duration: String,
    /// Linear against the largest entry, 0-100.
    pub percent: u16,
}

/// Per-employee activity panel contents.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailView {
    NoSelection,
    Loading,
    NoData,
    Rows(Vec<ActivityRow>),
}

/// Per-employee usage chart contents.
#[derive(Debug, Clone, PartialEq)]
pub enum UsageView {
    NoSelection,
    Loading,
    NoData,
    Bars(Vec<UsageBar>),
}

/// Search filter first, then status filter. Both are order-independent so the
/// sequence only matters for matching the reference behavior.
pub fn employee_rows(state: &DashboardState) -> Vec<EmployeeRow> {
    let term = state.search.to_lowercase();

    state
        .employees
        .iter()
        .filter(|e| {
            term.is_empty()
                || e.username.to_lowercase().contains(&term)
                || e.computer_name.to_lowercase().contains(&term)
        })
        .filter(|e| state.status_filter.matches(e.status))
        .map(|e| EmployeeRow {
            username: e.username.clone(),
            computer_name: e.computer_name.clone(),
            status: e.status,
            selected: state.selected.as_deref() == Some(e.username.as_str()),
        })
        .collect()
}

pub fn summary(employees: &[Employee]) -> Summary {
    let mut counts = Summary {
        total: employees.len(),
        ..Summary::default()
    };
    for employee in employees {
        match employee.status {
            EmployeeStatus::Active => counts.active += 1,
            EmployeeStatus::Idle => counts.idle += 1,
            EmployeeStatus::Offline => counts.offline += 1,
        }
    }
    counts
}

pub fn recent_rows(activities: &[ActivityEvent]) -> Vec<ActivityRow> {
    activities.iter().take(RECENT_LIMIT).map(activity_row).collect()
}

fn activity_row(event: &ActivityEvent) -> ActivityRow {
    let window = event
        .window_title
        .as_deref()
        .filter(|title| !title.is_empty())
        .unwrap_or(UNTITLED_WINDOW)
        .to_string();

    ActivityRow {
        username: event.username.clone(),
        time: format_time(event.timestamp),
        window,
        process: event.process_name.clone(),
        duration: format_duration(event.duration),
    }
}

pub fn detail_view(state: &DashboardState) -> DetailView {
    if state.selected.is_none() {
        return DetailView::NoSelection;
    }
    match &state.detail {
        None => DetailView::Loading,
        Some(rows) if rows.is_empty() => DetailView::NoData,
        Some(rows) => DetailView::Rows(rows.iter().map(activity_row).collect()),
    }
}

pub fn usage_view(state: &DashboardState) -> UsageView {
    if state.selected.is_none() {
        return UsageView::NoSelection;
    }
    let usage = match &state.usage {
        None => return UsageView::Loading,
        Some(map) if map.is_empty() => return UsageView::NoData,
        Some(map) => map,
    };

    // Non-empty here, so max is always at least 1 and the scaling below
    // cannot divide by zero.
    let max = usage.values().copied().max().unwrap_or(0).max(1);

    let mut entries: Vec<(&String, u64)> = usage.iter().map(|(app, &d)| (app, d)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    UsageView::Bars(
        entries
            .into_iter()
            .map(|(app, duration)| UsageBar {
                app: app.clone(),
                duration: format_duration(duration),
                percent: (duration * 100 / max) as u16,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchOutcome;
    use crate::state::StatusFilter;
    use chrono::Utc;
    use staff_monitor_common::AppUsage;

    fn employee(username: &str, computer: &str, status: EmployeeStatus) -> Employee {
        Employee {
            username: username.to_string(),
            computer_name: computer.to_string(),
            status,
            last_seen: None,
        }
    }

    fn event(username: &str, title: Option<&str>, duration: u64) -> ActivityEvent {
        ActivityEvent {
            username: username.to_string(),
            computer_name: None,
            timestamp: Utc::now(),
            window_title: title.map(|t| t.to_string()),
            process_name: "firefox".to_string(),
            duration,
        }
    }

    fn state_with_employees(employees: Vec<Employee>) -> DashboardState {
        let mut state = DashboardState::new(24);
        state.apply(FetchOutcome::Employees { seq: 1, employees });
        state
    }

    #[test]
    fn search_matches_username_and_computer_name() {
        let mut state = state_with_employees(vec![
            employee("alice", "WS-01", EmployeeStatus::Active),
            employee("bob", "ALICE-PC", EmployeeStatus::Active),
            employee("carol", "WS-03", EmployeeStatus::Active),
        ]);
        state.search = "ali".to_string();

        let rows = employee_rows(&state);
        let names: Vec<&str> = rows.iter().map(|r| r.username.as_str()).collect();
        assert_eq!(names, vec!["alice", "bob"]);
    }

    #[test]
    fn search_only_returns_the_matching_employee() {
        let mut state = state_with_employees(vec![
            employee("alice", "WS-01", EmployeeStatus::Active),
            employee("bob", "WS-02", EmployeeStatus::Offline),
        ]);
        state.search = "ali".to_string();

        let rows = employee_rows(&state);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "alice");
    }

    #[test]
    fn filters_commute() {
        let employees = vec![
            employee("alice", "WS-01", EmployeeStatus::Active),
            employee("alina", "WS-02", EmployeeStatus::Idle),
            employee("bob", "WS-03", EmployeeStatus::Active),
            employee("alfred", "WS-04", EmployeeStatus::Active),
        ];

        // search then status, as employee_rows applies them
        let mut state = state_with_employees(employees.clone());
        state.search = "al".to_string();
        state.status_filter = StatusFilter::Active;
        let combined = employee_rows(&state);

        // status then search, done by hand
        let by_status: Vec<Employee> = employees
            .into_iter()
            .filter(|e| e.status == EmployeeStatus::Active)
            .collect();
        let mut state2 = state_with_employees(by_status);
        state2.search = "al".to_string();
        let reversed = employee_rows(&state2);

        assert_eq!(combined, reversed);
    }

    #[test]
    fn selected_row_is_marked() {
        let mut state = state_with_employees(vec![
            employee("alice", "WS-01", EmployeeStatus::Active),
            employee("bob", "WS-02", EmployeeStatus::Idle),
        ]);
        state.select("bob".to_string());

        let rows = employee_rows(&state);
        assert!(!rows[0].selected);
        assert!(rows[1].selected);
    }

    #[test]
    fn summary_counts_add_up() {
        let state = state_with_employees(vec![
            employee("a", "1", EmployeeStatus::Active),
            employee("b", "2", EmployeeStatus::Active),
            employee("c", "3", EmployeeStatus::Idle),
            employee("d", "4", EmployeeStatus::Offline),
        ]);
        let counts = summary(&state.employees);
        assert_eq!(counts.total, 4);
        assert_eq!(counts.active, 2);
        assert_eq!(counts.idle, 1);
        assert_eq!(counts.offline, 1);
        assert_eq!(counts.total, counts.active + counts.idle + counts.offline);
    }

    #[test]
    fn recent_feed_is_capped_and_keeps_backend_order() {
        let activities: Vec<ActivityEvent> = (0..30)
            .map(|i| event(&format!("user{}", i), Some("w"), i))
            .collect();
        let rows = recent_rows(&activities);
        assert_eq!(rows.len(), RECENT_LIMIT);
        assert_eq!(rows[0].username, "user0");
        assert_eq!(rows[19].username, "user19");
    }

    #[test]
    fn missing_window_title_gets_a_placeholder() {
        let rows = recent_rows(&[event("alice", None, 5), event("bob", Some(""), 5)]);
        assert_eq!(rows[0].window, UNTITLED_WINDOW);
        assert_eq!(rows[1].window, UNTITLED_WINDOW);
    }

    #[test]
    fn detail_view_distinguishes_empty_states() {
        let mut state = DashboardState::new(24);
        assert_eq!(detail_view(&state), DetailView::NoSelection);

        state.select("alice".to_string());
        assert_eq!(detail_view(&state), DetailView::Loading);

        state.apply(FetchOutcome::EmployeeActivity {
            seq: 1,
            username: "alice".to_string(),
            rows: vec![],
        });
        assert_eq!(detail_view(&state), DetailView::NoData);

        state.apply(FetchOutcome::EmployeeActivity {
            seq: 2,
            username: "alice".to_string(),
            rows: vec![event("alice", Some("editor"), 90)],
        });
        match detail_view(&state) {
            DetailView::Rows(rows) => {
                assert_eq!(rows.len(), 1);
                assert_eq!(rows[0].duration, "1m 30s");
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn usage_bars_are_sorted_and_scaled_against_the_max() {
        let mut state = DashboardState::new(24);
        state.select("alice".to_string());

        let mut usage = AppUsage::new();
        usage.insert("A".to_string(), 100);
        usage.insert("B".to_string(), 50);
        state.apply(FetchOutcome::EmployeeStats {
            seq: 1,
            username: "alice".to_string(),
            usage,
        });

        match usage_view(&state) {
            UsageView::Bars(bars) => {
                assert_eq!(bars.len(), 2);
                assert_eq!(bars[0].app, "A");
                assert_eq!(bars[0].percent, 100);
                assert_eq!(bars[1].app, "B");
                assert_eq!(bars[1].percent, 50);
            }
            other => panic!("unexpected view: {:?}", other),
        }
    }

    #[test]
    fn empty_usage_renders_the_placeholder_not_a_chart() {
        let mut state = DashboardState::new(24);
        state.select("alice".to_string());
        state.apply(FetchOutcome::EmployeeStats {
            seq: 1,
            username: "alice".to_string(),
            usage: AppUsage::new(),
        });
        assert_eq!(usage_view(&state), UsageView::NoData);
    }
}
