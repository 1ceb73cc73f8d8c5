use crate::core::{Frame, RenderSink, RowDescriptor, TableView};
use crate::domain::model::format_credits;
use std::fmt::Write;

const COLUMNS: usize = 4;

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Renders a standalone HTML page for a frame.
pub fn render_document(frame: &Frame, title: &str) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_document(&mut out, frame, title);
    out
}

fn write_document(out: &mut String, frame: &Frame, title: &str) -> std::fmt::Result {
    writeln!(out, "<!DOCTYPE html>")?;
    writeln!(out, "<html lang=\"en\">")?;
    writeln!(out, "<head>")?;
    writeln!(out, "<meta charset=\"utf-8\">")?;
    writeln!(out, "<title>{}</title>", escape(title))?;
    writeln!(out, "</head>")?;
    writeln!(out, "<body>")?;
    writeln!(out, "<h1>{}</h1>", escape(title))?;

    match frame {
        Frame::Loading => writeln!(out, "<p class=\"loading\">Loading subjects...</p>")?,
        Frame::Error { message } => {
            writeln!(out, "<p class=\"error\" role=\"alert\">{}</p>", escape(message))?
        }
        Frame::Table(view) => {
            write_controls(out, view)?;
            write_table(out, view)?;
            write_summary(out, view)?;
        }
    }

    writeln!(out, "</body>")?;
    writeln!(out, "</html>")
}

fn write_controls(out: &mut String, view: &TableView) -> std::fmt::Result {
    writeln!(
        out,
        "<input type=\"search\" id=\"searchInput\" placeholder=\"Search subjects\" value=\"{}\">",
        escape(&view.criteria.search)
    )?;
    writeln!(out, "<div class=\"year-filters\">")?;

    let active = view.criteria.year.token();
    let tokens = std::iter::once("all").chain(view.year_options.iter().map(String::as_str));
    for token in tokens {
        let class = if token == active { " class=\"active\"" } else { "" };
        writeln!(
            out,
            "<button data-year=\"{}\"{}>{}</button>",
            escape(token),
            class,
            escape(token)
        )?;
    }

    writeln!(out, "</div>")
}

fn write_table(out: &mut String, view: &TableView) -> std::fmt::Result {
    writeln!(out, "<table>")?;
    writeln!(
        out,
        "<thead><tr><th>Year / Sem</th><th>Code</th><th>Description</th><th>Credit</th></tr></thead>"
    )?;
    writeln!(out, "<tbody id=\"subjects-table\">")?;

    for row in &view.rows {
        match row {
            RowDescriptor::Divider { label } => writeln!(
                out,
                "<tr class=\"divider\"><td colspan=\"{}\">{}</td></tr>",
                COLUMNS,
                escape(label)
            )?,
            RowDescriptor::Course {
                term,
                code,
                description,
                credit,
            } => writeln!(
                out,
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(term),
                escape(code),
                escape(description),
                escape(credit)
            )?,
        }
    }

    writeln!(out, "</tbody>")?;
    writeln!(out, "</table>")
}

fn write_summary(out: &mut String, view: &TableView) -> std::fmt::Result {
    let summary = &view.summary;
    writeln!(out, "<section class=\"summary\">")?;
    writeln!(
        out,
        "<p>Total courses: <strong>{}</strong>, total credits: <strong>{}</strong></p>",
        summary.total_courses,
        summary.total_credits_display()
    )?;

    if !summary.by_year.is_empty() {
        writeln!(out, "<ul>")?;
        for year in &summary.by_year {
            writeln!(
                out,
                "<li>{}: {} courses, {} credits</li>",
                escape(&year.year_level),
                year.courses,
                format_credits(year.credits)
            )?;
        }
        writeln!(out, "</ul>")?;
    }

    writeln!(out, "</section>")
}

/// Render sink that keeps the latest page.
#[derive(Debug, Clone, Default)]
pub struct HtmlSink {
    title: String,
    document: String,
    renders: usize,
}

impl HtmlSink {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn document(&self) -> &str {
        &self.document
    }

    pub fn renders(&self) -> usize {
        self.renders
    }
}

impl RenderSink for HtmlSink {
    fn render(&mut self, frame: &Frame) {
        self.document = render_document(frame, &self.title);
        self.renders += 1;
    }
}
