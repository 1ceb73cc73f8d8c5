use crate::domain::model::{CourseSet, FilterCriteria, Frame};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Provider of the raw course document.
#[async_trait]
pub trait CourseSource: Send + Sync {
    async fn fetch(&self) -> Result<CourseSet>;
}

/// Render substrate. Receives a complete frame on every state change.
pub trait RenderSink {
    fn render(&mut self, frame: &Frame);
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_url(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn request_timeout(&self) -> Option<Duration>;
    fn request_headers(&self) -> HashMap<String, String> {
        HashMap::new()
    }
    fn initial_criteria(&self) -> FilterCriteria;
    fn output_filename(&self, format: &str) -> String {
        format!("courses.{}", format)
    }
}
