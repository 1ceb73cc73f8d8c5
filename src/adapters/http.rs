use crate::core::{ConfigProvider, CourseSet, CourseSource};
use crate::domain::model::CourseDocument;
use crate::utils::error::{CourseError, Result};
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// Fetches `{ "courses": [...] }` from a URL.
///
/// There is no retry. Without a configured timeout a request that never
/// resolves keeps the view loading.
pub struct HttpCourseSource {
    client: Client,
    url: String,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
}

impl HttpCourseSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            url: url.into(),
            headers: HashMap::new(),
            timeout: None,
        }
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            client: Client::new(),
            url: config.source_url().to_string(),
            headers: config.request_headers(),
            timeout: config.request_timeout(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl CourseSource for HttpCourseSource {
    async fn fetch(&self) -> Result<CourseSet> {
        let mut request = self.client.get(&self.url);

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", self.url);
        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("API response status: {}", status);

        if !status.is_success() {
            return Err(CourseError::HttpStatus {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let body = response.bytes().await?;
        let document: CourseDocument = serde_json::from_slice(&body)?;
        tracing::debug!("Decoded {} course entries", document.courses.len());

        Ok(document.courses)
    }
}
