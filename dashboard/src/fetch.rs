use staff_monitor_common::{ActivityEvent, AppUsage, Employee, MonitorApi, TimeRange};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};
use tracing::warn;

/// Result of one completed fetch, tagged with the request sequence number of
/// its endpoint so late responses can be told apart from fresh ones.
#[derive(Debug)]
pub enum FetchOutcome {
    Employees {
        seq: u64,
        employees: Vec<Employee>,
    },
    RecentActivity {
        seq: u64,
        activities: Vec<ActivityEvent>,
    },
    EmployeeActivity {
        seq: u64,
        username: String,
        rows: Vec<ActivityEvent>,
    },
    EmployeeStats {
        seq: u64,
        username: String,
        usage: AppUsage,
    },
}

/// Fire-and-forget fetch plumbing. Each call stamps the request with the next
/// per-endpoint sequence number and spawns a task on the runtime; the task
/// never fails the caller. Any API error is logged and delivered as an empty
/// payload, which the state layer applies like any other result.
pub struct Fetcher {
    api: Arc<dyn MonitorApi + Send + Sync>,
    handle: Handle,
    tx: UnboundedSender<FetchOutcome>,
    employees_seq: u64,
    recent_seq: u64,
    detail_seq: u64,
    stats_seq: u64,
}

impl Fetcher {
    pub fn new(
        api: Arc<dyn MonitorApi + Send + Sync>,
        handle: Handle,
    ) -> (Self, UnboundedReceiver<FetchOutcome>) {
        let (tx, rx) = unbounded_channel();
        let fetcher = Self {
            api,
            handle,
            tx,
            employees_seq: 0,
            recent_seq: 0,
            detail_seq: 0,
            stats_seq: 0,
        };
        (fetcher, rx)
    }

    pub fn fetch_employees(&mut self) {
        self.employees_seq += 1;
        let seq = self.employees_seq;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.handle.spawn(async move {
            let employees = match api.employees().await {
                Ok(list) => list,
                Err(err) => {
                    warn!(error = %err, "employee list fetch failed");
                    Vec::new()
                }
            };
            let _ = tx.send(FetchOutcome::Employees { seq, employees });
        });
    }

    pub fn fetch_recent_activity(&mut self) {
        self.recent_seq += 1;
        let seq = self.recent_seq;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.handle.spawn(async move {
            let activities = match api.recent_activity().await {
                Ok(list) => list,
                Err(err) => {
                    warn!(error = %err, "recent activity fetch failed");
                    Vec::new()
                }
            };
            let _ = tx.send(FetchOutcome::RecentActivity { seq, activities });
        });
    }

    pub fn fetch_employee_activity(&mut self, username: String, range: TimeRange) {
        self.detail_seq += 1;
        let seq = self.detail_seq;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.handle.spawn(async move {
            let rows = match api.employee_activity(&username, &range).await {
                Ok(list) => list,
                Err(err) => {
                    warn!(error = %err, username = %username, "employee activity fetch failed");
                    Vec::new()
                }
            };
            let _ = tx.send(FetchOutcome::EmployeeActivity {
                seq,
                username,
                rows,
            });
        });
    }

    pub fn fetch_employee_stats(&mut self, username: String, range: TimeRange) {
        self.stats_seq += 1;
        let seq = self.stats_seq;
        let api = Arc::clone(&self.api);
        let tx = self.tx.clone();

        self.handle.spawn(async move {
            let usage = match api.employee_stats(&username, &range).await {
                Ok(map) => map,
                Err(err) => {
                    warn!(error = %err, username = %username, "employee stats fetch failed");
                    AppUsage::new()
                }
            };
            let _ = tx.send(FetchOutcome::EmployeeStats {
                seq,
                username,
                usage,
            });
        });
    }
}
