use crate::models::{ActivityEvent, AppUsage, Employee, TimeRange};
use async_trait::async_trait;
use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while talking to the monitoring server.
/// All three cases are handled the same way by callers: log and fall back
/// to an empty collection.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server returned {0}")]
    BadStatus(StatusCode),
    #[error("malformed response body: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Read-only view of the monitoring server. A trait so the dashboard can be
/// driven by a mock in tests.
#[async_trait]
pub trait MonitorApi {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError>;

    async fn recent_activity(&self) -> Result<Vec<ActivityEvent>, ApiError>;

    async fn employee_activity(
        &self,
        username: &str,
        range: &TimeRange,
    ) -> Result<Vec<ActivityEvent>, ApiError>;

    async fn employee_stats(
        &self,
        username: &str,
        range: &TimeRange,
    ) -> Result<AppUsage, ApiError>;
}

mod http;
pub use http::HttpMonitorApi;
