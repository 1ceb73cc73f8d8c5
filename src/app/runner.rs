use crate::adapters::console::{parse_line, ConsoleInput};
use crate::adapters::export::Exporter;
use crate::adapters::http::HttpCourseSource;
use crate::adapters::storage::LocalStorage;
use crate::core::view::ViewController;
use crate::core::{ConfigProvider, CourseSource, Frame, RenderSink, Storage};
use crate::utils::error::{CourseError, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Outcome of one page session.
#[derive(Debug)]
pub struct RunReport {
    /// Artifact paths from the last export.
    pub written: Vec<String>,
    pub frame: Frame,
    /// Set when the fetch failed; the error page has still been written.
    pub load_error: Option<CourseError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.load_error.is_none()
    }
}

/// Fetch over HTTP and write artifacts under the configured output path.
pub async fn run<C, R, I>(config: &C, title: &str, sink: R, input: Option<I>) -> Result<RunReport>
where
    C: ConfigProvider,
    R: RenderSink,
    I: AsyncBufRead + Unpin,
{
    let source = HttpCourseSource::from_config(config);
    let storage = LocalStorage::new(config.output_path().to_string());
    run_with(config, source, Exporter::new(storage, title), sink, input).await
}

/// Session loop: load once, apply the initial criteria, then one event per
/// input line. Artifacts are rewritten in full after every state change.
pub async fn run_with<C, S, St, R, I>(
    config: &C,
    source: S,
    exporter: Exporter<St>,
    sink: R,
    input: Option<I>,
) -> Result<RunReport>
where
    C: ConfigProvider,
    S: CourseSource,
    St: Storage,
    R: RenderSink,
    I: AsyncBufRead + Unpin,
{
    let mut controller = ViewController::new(source, sink);

    tracing::info!("🚀 Loading courses from {}", config.source_url());
    if let Err(e) = controller.load().await {
        let written = exporter.export(&controller.frame(), config).await?;
        return Ok(RunReport {
            written,
            frame: controller.frame(),
            load_error: Some(e),
        });
    }

    controller.apply(&config.initial_criteria());
    let mut written = exporter.export(&controller.frame(), config).await?;

    if let Some(input) = input {
        tracing::info!("⌨️ Interactive mode: type to search, :year <label>, :all, :clear, :quit");
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            match parse_line(&line) {
                ConsoleInput::Quit => break,
                ConsoleInput::Event(event) => {
                    controller.dispatch(event);
                    written = exporter.export(&controller.frame(), config).await?;
                }
            }
        }
    }

    Ok(RunReport {
        written,
        frame: controller.frame(),
        load_error: None,
    })
}
