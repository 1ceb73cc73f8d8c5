use crate::config::DEFAULT_SOURCE_URL;
use crate::core::{ConfigProvider, FilterCriteria, YearFilter};
use crate::utils::error::{CourseError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub page: PageConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub view: ViewConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    pub timeout_seconds: Option<u64>,
    pub headers: Option<HashMap<String, String>>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_seconds: None,
            headers: None,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_SOURCE_URL.to_string()
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewConfig {
    pub search: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
    pub formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub html: Option<String>,
    pub csv: Option<String>,
    pub json: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CourseError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${COURSES_URL})，未設定的保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CourseError::ConfigError {
            message: format!("Invalid env var pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn title(&self) -> &str {
        &self.page.name
    }
}

impl ConfigProvider for TomlConfig {
    fn source_url(&self) -> &str {
        &self.source.endpoint
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn output_formats(&self) -> &[String] {
        &self.output.formats
    }

    fn request_timeout(&self) -> Option<Duration> {
        self.source.timeout_seconds.map(Duration::from_secs)
    }

    fn request_headers(&self) -> HashMap<String, String> {
        self.source.headers.clone().unwrap_or_default()
    }

    fn initial_criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            self.view.search.clone().unwrap_or_default(),
            self.view
                .year
                .as_deref()
                .map(YearFilter::from_token)
                .unwrap_or_default(),
        )
    }

    fn output_filename(&self, format: &str) -> String {
        let custom = self.output.filenames.as_ref().and_then(|names| match format {
            "html" => names.html.clone(),
            "csv" => names.csv.clone(),
            "json" => names.json.clone(),
            _ => None,
        });
        custom.unwrap_or_else(|| format!("courses.{}", format))
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("source.endpoint", &self.source.endpoint)?;
        validation::validate_path("output.path", &self.output.path)?;
        validation::validate_formats("output.formats", &self.output.formats)?;
        if let Some(timeout) = self.source.timeout_seconds {
            validation::validate_positive_number("source.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
