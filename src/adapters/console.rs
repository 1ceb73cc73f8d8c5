use crate::core::view::ViewEvent;
use crate::core::{Frame, RenderSink, YearFilter};
use crate::domain::model::format_credits;
use std::io::Write;

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConsoleInput {
    Event(ViewEvent),
    Quit,
}

/// Plain text is the new search field value; `:year <label>`, `:all`,
/// `:clear` and `:quit` mirror the filter buttons.
pub fn parse_line(line: &str) -> ConsoleInput {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(command) = line.strip_prefix(':') else {
        return ConsoleInput::Event(ViewEvent::Search(line.to_string()));
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    match name {
        "q" | "quit" => ConsoleInput::Quit,
        "all" => ConsoleInput::Event(ViewEvent::SelectYear(YearFilter::All)),
        "year" if arg.is_empty() => {
            tracing::warn!("`:year` needs a year label, searching for {:?} instead", line);
            ConsoleInput::Event(ViewEvent::Search(line.to_string()))
        }
        "year" => ConsoleInput::Event(ViewEvent::SelectYear(YearFilter::from_token(arg))),
        "clear" => ConsoleInput::Event(ViewEvent::Search(String::new())),
        // unknown commands are searched for literally
        _ => ConsoleInput::Event(ViewEvent::Search(line.to_string())),
    }
}

/// Render sink that prints a one-line status per frame.
pub struct ConsoleSink<W: Write> {
    out: W,
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for ConsoleSink<W> {
    fn render(&mut self, frame: &Frame) {
        let result = match frame {
            Frame::Loading => writeln!(self.out, "⏳ Loading subjects..."),
            Frame::Error { message } => writeln!(self.out, "❌ {}", message),
            Frame::Table(view) => {
                let years: Vec<String> = view
                    .summary
                    .by_year
                    .iter()
                    .map(|y| format!("{} {}/{}", y.year_level, y.courses, format_credits(y.credits)))
                    .collect();
                writeln!(
                    self.out,
                    "📋 {} courses, {} credits [search: {:?}, year: {}] {}",
                    view.summary.total_courses,
                    view.summary.total_credits_display(),
                    view.criteria.search,
                    view.criteria.year.token(),
                    years.join(", ")
                )
            }
        };

        if let Err(e) = result {
            tracing::warn!("Could not write status line: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::view::ViewState;
    use crate::core::{CourseRecord, CourseSet};

    #[test]
    fn test_plain_text_is_search() {
        assert_eq!(
            parse_line("Data Structures\n"),
            ConsoleInput::Event(ViewEvent::Search("Data Structures".to_string()))
        );
        assert_eq!(
            parse_line(""),
            ConsoleInput::Event(ViewEvent::Search(String::new()))
        );
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse_line(":quit"), ConsoleInput::Quit);
        assert_eq!(parse_line(":q\r\n"), ConsoleInput::Quit);
        assert_eq!(
            parse_line(":year 2nd"),
            ConsoleInput::Event(ViewEvent::SelectYear(YearFilter::Year("2nd".to_string())))
        );
        assert_eq!(
            parse_line(":year all"),
            ConsoleInput::Event(ViewEvent::SelectYear(YearFilter::All))
        );
        assert_eq!(
            parse_line(":all"),
            ConsoleInput::Event(ViewEvent::SelectYear(YearFilter::All))
        );
        assert_eq!(
            parse_line(":clear"),
            ConsoleInput::Event(ViewEvent::Search(String::new()))
        );
    }

    #[test]
    fn test_unknown_command_is_searched_literally() {
        assert_eq!(
            parse_line(":cs101"),
            ConsoleInput::Event(ViewEvent::Search(":cs101".to_string()))
        );
    }

    #[test]
    fn test_year_without_label_is_searched_literally() {
        assert_eq!(
            parse_line(":year"),
            ConsoleInput::Event(ViewEvent::Search(":year".to_string()))
        );
        assert_eq!(
            parse_line(":year   "),
            ConsoleInput::Event(ViewEvent::Search(":year   ".to_string()))
        );
    }

    #[test]
    fn test_console_sink_status_lines() {
        let set = CourseSet::new(vec![
            CourseRecord::new("1st", "1st", "CS101", "Intro", "3"),
            CourseRecord::new("2nd", "1st", "CS201", "Data", "2.5"),
        ]);
        let mut sink = ConsoleSink::new(Vec::new());

        sink.render(&Frame::Loading);
        sink.render(&ViewState::loaded(&set).frame());
        sink.render(&Frame::Error {
            message: "Failed to load subjects".to_string(),
        });

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[1],
            "📋 2 courses, 5.5 credits [search: \"\", year: all] 1st 1/3.0, 2nd 1/2.5"
        );
        assert_eq!(lines[2], "❌ Failed to load subjects");
    }
}
