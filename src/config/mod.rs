pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, FilterCriteria, YearFilter};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use std::time::Duration;

pub const DEFAULT_SOURCE_URL: &str = "https://lyle-medina.github.io/first-repo/courses.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, clap::Parser)]
#[command(name = "course-table")]
#[command(about = "Render a course list as a searchable HTML table with per-year totals")]
pub struct CliConfig {
    #[arg(long, default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "html")]
    pub formats: Vec<String>,

    #[arg(long, default_value = "", help = "Initial search term")]
    pub search: String,

    #[arg(long, default_value = "all", help = "Initial year filter, or 'all'")]
    pub year: String,

    #[arg(long, help = "Request timeout; waits indefinitely when unset")]
    pub timeout_seconds: Option<u64>,

    #[arg(long, default_value = "Subjects")]
    pub title: String,

    #[arg(long, help = "Read search/filter events from stdin after loading")]
    pub interactive: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn source_url(&self) -> &str {
        &self.source_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    fn initial_criteria(&self) -> FilterCriteria {
        FilterCriteria::new(self.search.clone(), YearFilter::from_token(&self.year))
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source_url", &self.source_url)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_formats("formats", &self.formats)?;
        if let Some(timeout) = self.timeout_seconds {
            validation::validate_positive_number("timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
