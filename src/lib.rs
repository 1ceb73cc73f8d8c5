pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{export::Exporter, html::HtmlSink, http::HttpCourseSource, storage::LocalStorage};
pub use app::runner::{run, RunReport};
pub use config::toml_config::TomlConfig;
pub use crate::core::view::{ViewController, ViewEvent, ViewState};
pub use domain::model::{CourseRecord, CourseSet, Credit, FilterCriteria, Frame, Summary, YearFilter};
pub use utils::error::{CourseError, Result};
