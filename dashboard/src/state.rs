use crate::fetch::FetchOutcome;
use chrono::{DateTime, Local};
use staff_monitor_common::{ActivityEvent, AppUsage, Employee, EmployeeStatus, TimeRange};

/// Selectable time ranges for the per-employee panels, in hours.
pub const RANGE_PRESETS: [i64; 3] = [24, 24 * 7, 24 * 30];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Employees,
    Activity,
}

impl Tab {
    pub fn next(self) -> Self {
        match self {
            Tab::Employees => Tab::Activity,
            Tab::Activity => Tab::Employees,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Employees => 0,
            Tab::Activity => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Active,
    Idle,
    Offline,
}

impl StatusFilter {
    pub fn matches(self, status: EmployeeStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => status == EmployeeStatus::Active,
            StatusFilter::Idle => status == EmployeeStatus::Idle,
            StatusFilter::Offline => status == EmployeeStatus::Offline,
        }
    }

    pub fn next(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Active,
            StatusFilter::Active => StatusFilter::Idle,
            StatusFilter::Idle => StatusFilter::Offline,
            StatusFilter::Offline => StatusFilter::All,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            StatusFilter::All => StatusFilter::Offline,
            StatusFilter::Active => StatusFilter::All,
            StatusFilter::Idle => StatusFilter::Active,
            StatusFilter::Offline => StatusFilter::Idle,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Idle => "idle",
            StatusFilter::Offline => "offline",
        }
    }
}

/// All mutable client state. Lives on the UI thread; fetch tasks never touch
/// it directly, they send `FetchOutcome`s that get applied between frames.
pub struct DashboardState {
    pub employees: Vec<Employee>,
    pub activities: Vec<ActivityEvent>,
    /// Username of the selected employee. Deliberately not revalidated when
    /// the list refreshes: an employee that disappears simply loses its
    /// highlight, the detail panels keep querying it.
    pub selected: Option<String>,
    /// Activity snapshot for the selected employee. `None` while no fetch
    /// has landed yet, `Some(empty)` when the server had nothing.
    pub detail: Option<Vec<ActivityEvent>>,
    pub usage: Option<AppUsage>,
    pub search: String,
    pub status_filter: StatusFilter,
    pub tab: Tab,
    pub cursor: usize,
    range_index: usize,
    pub clock: DateTime<Local>,
    employees_seq: u64,
    recent_seq: u64,
    detail_seq: u64,
    stats_seq: u64,
}

impl DashboardState {
    pub fn new(range_hours: i64) -> Self {
        let range_index = RANGE_PRESETS
            .iter()
            .position(|&h| h == range_hours)
            .unwrap_or(0);

        Self {
            employees: Vec::new(),
            activities: Vec::new(),
            selected: None,
            detail: None,
            usage: None,
            search: String::new(),
            status_filter: StatusFilter::All,
            tab: Tab::Employees,
            cursor: 0,
            range_index,
            clock: Local::now(),
            employees_seq: 0,
            recent_seq: 0,
            detail_seq: 0,
            stats_seq: 0,
        }
    }

    /// Applies one completed fetch. Collections are replaced wholesale, and
    /// an outcome older than the newest already-applied one for the same
    /// endpoint is dropped, so overlapping requests resolve in request order.
    pub fn apply(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Employees { seq, employees } => {
                if seq <= self.employees_seq {
                    return;
                }
                self.employees_seq = seq;
                self.employees = employees;
            }
            FetchOutcome::RecentActivity { seq, activities } => {
                if seq <= self.recent_seq {
                    return;
                }
                self.recent_seq = seq;
                self.activities = activities;
            }
            FetchOutcome::EmployeeActivity {
                seq,
                username,
                rows,
            } => {
                if seq <= self.detail_seq {
                    return;
                }
                self.detail_seq = seq;
                if self.selected.as_deref() == Some(username.as_str()) {
                    self.detail = Some(rows);
                }
            }
            FetchOutcome::EmployeeStats {
                seq,
                username,
                usage,
            } => {
                if seq <= self.stats_seq {
                    return;
                }
                self.stats_seq = seq;
                if self.selected.as_deref() == Some(username.as_str()) {
                    self.usage = Some(usage);
                }
            }
        }
    }

    pub fn select(&mut self, username: String) {
        self.selected = Some(username);
        // Cleared so the panels show "loading" until the new fetches land
        self.detail = None;
        self.usage = None;
    }

    pub fn range_hours(&self) -> i64 {
        RANGE_PRESETS[self.range_index]
    }

    pub fn range(&self) -> TimeRange {
        TimeRange::last_hours(self.range_hours())
    }

    pub fn cycle_range(&mut self, forward: bool) {
        let len = RANGE_PRESETS.len();
        self.range_index = if forward {
            (self.range_index + 1) % len
        } else {
            (self.range_index + len - 1) % len
        };
    }

    pub fn tick_clock(&mut self) {
        self.clock = Local::now();
    }

    pub fn move_cursor(&mut self, delta: i64, visible_rows: usize) {
        if visible_rows == 0 {
            self.cursor = 0;
            return;
        }
        let max = visible_rows - 1;
        let next = self.cursor as i64 + delta;
        self.cursor = next.clamp(0, max as i64) as usize;
    }
}
