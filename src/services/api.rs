use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use crate::error::DisplayError;
use crate::models::{
    content::ContentItem,
    schedule::{DayOfWeek, ScheduleEntry},
    settings::DisplaySettings,
};

/// The three read endpoints the display polls.
#[async_trait]
pub trait ContentSource: Send + Sync {
    async fn items(&self) -> Result<Vec<ContentItem>, DisplayError>;
    async fn settings(&self) -> Result<DisplaySettings, DisplayError>;
    /// Entries for `day`, sorted by start time on the server.
    async fn schedule(&self, day: DayOfWeek) -> Result<Vec<ScheduleEntry>, DisplayError>;
}

pub struct HttpContentSource {
    client: Client,
    base_url: String,
}

impl HttpContentSource {
    /// `base_url` points at the API root, e.g. `http://campus.local/api`.
    /// No request timeout is set; the transport default applies.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        request: RequestBuilder,
    ) -> Result<T, DisplayError> {
        let response = request
            .send()
            .await
            .map_err(|e| DisplayError::network(endpoint, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DisplayError::network(endpoint, format!("HTTP {status}")));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DisplayError::network(endpoint, e.to_string()))?;

        serde_json::from_slice(&body).map_err(|source| DisplayError::Parse {
            endpoint: endpoint.to_string(),
            source,
        })
    }
}

#[async_trait]
impl ContentSource for HttpContentSource {
    async fn items(&self) -> Result<Vec<ContentItem>, DisplayError> {
        let url = self.url("items");
        self.fetch_json(&url, self.client.get(&url)).await
    }

    async fn settings(&self) -> Result<DisplaySettings, DisplayError> {
        let url = self.url("settings");
        self.fetch_json(&url, self.client.get(&url)).await
    }

    async fn schedule(&self, day: DayOfWeek) -> Result<Vec<ScheduleEntry>, DisplayError> {
        let url = self.url("schedules");
        let request = self.client.get(&url).query(&[("day", day.english_name())]);
        self.fetch_json(&url, request).await
    }
}
