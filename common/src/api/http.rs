use super::{ApiError, MonitorApi};
use crate::models::{ActivityEvent, AppUsage, Employee, TimeRange};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// `MonitorApi` over plain HTTP GETs against the server's JSON endpoints.
pub struct HttpMonitorApi {
    client: Client,
    base_url: String,
}

impl HttpMonitorApi {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    // Status is checked before decoding so a non-2xx answer and a garbled
    // body stay distinguishable in the logs.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let response = self.client.get(&url).query(query).send().await?;

        if !response.status().is_success() {
            return Err(ApiError::BadStatus(response.status()));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MonitorApi for HttpMonitorApi {
    async fn employees(&self) -> Result<Vec<Employee>, ApiError> {
        self.get_json(format!("{}/api/employees", self.base_url), &[])
            .await
    }

    async fn recent_activity(&self) -> Result<Vec<ActivityEvent>, ApiError> {
        self.get_json(format!("{}/api/activity/recent", self.base_url), &[])
            .await
    }

    async fn employee_activity(
        &self,
        username: &str,
        range: &TimeRange,
    ) -> Result<Vec<ActivityEvent>, ApiError> {
        self.get_json(
            format!("{}/api/activity/{}", self.base_url, username),
            &range.as_query(),
        )
        .await
    }

    async fn employee_stats(
        &self,
        username: &str,
        range: &TimeRange,
    ) -> Result<AppUsage, ApiError> {
        self.get_json(
            format!("{}/api/stats/{}", self.base_url, username),
            &range.as_query(),
        )
        .await
    }
}
