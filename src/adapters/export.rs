use crate::adapters::html::render_document;
use crate::core::{ConfigProvider, Frame, RowDescriptor, Storage};
use crate::utils::error::{CourseError, Result};

/// Writes the current frame as the configured output artifacts.
pub struct Exporter<S: Storage> {
    storage: S,
    title: String,
}

impl<S: Storage> Exporter<S> {
    pub fn new(storage: S, title: impl Into<String>) -> Self {
        Self {
            storage,
            title: title.into(),
        }
    }

    pub fn encode(&self, frame: &Frame, format: &str) -> Result<Vec<u8>> {
        match format {
            "html" => Ok(render_document(frame, &self.title).into_bytes()),
            "csv" => to_csv(frame),
            "json" => Ok(serde_json::to_vec_pretty(frame)?),
            other => Err(CourseError::InvalidConfigValueError {
                field: "output.formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format".to_string(),
            }),
        }
    }

    /// Returns the paths written, in format order.
    pub async fn export<C: ConfigProvider>(&self, frame: &Frame, config: &C) -> Result<Vec<String>> {
        let mut written = Vec::new();

        for format in config.output_formats() {
            let data = self.encode(frame, format)?;
            let filename = config.output_filename(format);

            tracing::debug!("Writing {} ({} bytes) to storage", filename, data.len());
            self.storage.write_file(&filename, &data).await?;

            written.push(format!("{}/{}", config.output_path(), filename));
        }

        Ok(written)
    }
}

/// Data rows only; dividers and non-table frames yield just the header.
pub fn to_csv(frame: &Frame) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["term", "code", "description", "credit"])?;

    if let Frame::Table(view) = frame {
        for row in &view.rows {
            if let RowDescriptor::Course {
                term,
                code,
                description,
                credit,
            } = row
            {
                writer.write_record([term, code, description, credit])?;
            }
        }
    }

    writer
        .into_inner()
        .map_err(|e| CourseError::Io(e.into_error()))
}
