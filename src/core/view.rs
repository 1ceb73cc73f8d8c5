use crate::core::filter::apply_filters;
use crate::core::grouper::build_rows;
use crate::core::sorter::sort_courses;
use crate::core::summary::summarize;
use crate::core::{CourseSet, CourseSource, FilterCriteria, Frame, RenderSink, TableView, YearFilter};
use crate::utils::error::CourseError;

/// User input that re-derives the visible table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    /// Current value of the search field.
    Search(String),
    /// Year button carrying a year label or the "all" token.
    SelectYear(YearFilter),
}

/// Sorted full set plus the criteria currently applied to it.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedCourses {
    courses: CourseSet,
    criteria: FilterCriteria,
}

impl LoadedCourses {
    pub fn courses(&self) -> &CourseSet {
        &self.courses
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn visible(&self) -> CourseSet {
        apply_filters(&self.courses, &self.criteria)
    }

    fn year_options(&self) -> Vec<String> {
        let mut years: Vec<String> = Vec::new();
        for record in &self.courses {
            if !years.contains(&record.year_level) {
                years.push(record.year_level.clone());
            }
        }
        years
    }

    fn table(&self) -> TableView {
        let visible = self.visible();
        TableView {
            rows: build_rows(&visible),
            summary: summarize(&visible),
            year_options: self.year_options(),
            criteria: self.criteria.clone(),
        }
    }
}

/// Page state. `Error` is terminal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Loading,
    Loaded(LoadedCourses),
    Filtered(LoadedCourses),
    Error { message: String },
}

impl ViewState {
    /// Fetch succeeded: sort once and keep the result as the source of truth.
    pub fn loaded(courses: &CourseSet) -> Self {
        ViewState::Loaded(LoadedCourses {
            courses: sort_courses(courses),
            criteria: FilterCriteria::default(),
        })
    }

    pub fn failed(error: &CourseError) -> Self {
        ViewState::Error {
            message: error.user_friendly_message(),
        }
    }

    /// Recomputes from the full set on every event; never narrows the
    /// currently displayed subset.
    pub fn handle(self, event: ViewEvent) -> Self {
        match self {
            ViewState::Loaded(mut loaded) | ViewState::Filtered(mut loaded) => {
                match event {
                    ViewEvent::Search(term) => loaded.criteria.search = term,
                    ViewEvent::SelectYear(year) => loaded.criteria.year = year,
                }
                ViewState::Filtered(loaded)
            }
            other => {
                tracing::warn!("Ignoring {:?} while the view is {}", event, other.name());
                other
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Loaded(_) => "loaded",
            ViewState::Filtered(_) => "filtered",
            ViewState::Error { .. } => "error",
        }
    }

    pub fn courses(&self) -> Option<&LoadedCourses> {
        match self {
            ViewState::Loaded(loaded) | ViewState::Filtered(loaded) => Some(loaded),
            _ => None,
        }
    }

    pub fn frame(&self) -> Frame {
        match self {
            ViewState::Loading => Frame::Loading,
            ViewState::Loaded(loaded) | ViewState::Filtered(loaded) => Frame::Table(loaded.table()),
            ViewState::Error { message } => Frame::Error {
                message: message.clone(),
            },
        }
    }
}

/// Drives fetch, render and the filter inputs over an owned [`ViewState`].
pub struct ViewController<S: CourseSource, R: RenderSink> {
    source: S,
    sink: R,
    state: ViewState,
}

impl<S: CourseSource, R: RenderSink> ViewController<S, R> {
    pub fn new(source: S, sink: R) -> Self {
        Self {
            source,
            sink,
            state: ViewState::Loading,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn sink(&self) -> &R {
        &self.sink
    }

    pub fn into_sink(self) -> R {
        self.sink
    }

    /// The single suspension point: fetch the course document once.
    ///
    /// Only acts while `Loading`; a failure lands in the terminal `Error` state
    /// and is returned so callers can pick an exit status.
    pub async fn load(&mut self) -> Result<(), CourseError> {
        if !matches!(self.state, ViewState::Loading) {
            tracing::warn!("load() called while view is {}, ignoring", self.state.name());
            return Ok(());
        }

        self.sink.render(&Frame::Loading);

        match self.source.fetch().await {
            Ok(courses) => {
                tracing::info!("📚 Loaded {} courses", courses.len());
                self.transition(ViewState::loaded(&courses));
                Ok(())
            }
            Err(e) => {
                tracing::error!("❌ Error fetching the course document: {}", e);
                self.transition(ViewState::failed(&e));
                Err(e)
            }
        }
    }

    pub fn dispatch(&mut self, event: ViewEvent) {
        if !matches!(self.state, ViewState::Loaded(_) | ViewState::Filtered(_)) {
            tracing::warn!("Ignoring {:?} while the view is {}", event, self.state.name());
            return;
        }
        tracing::debug!("Applying {:?}", event);
        let next = std::mem::take(&mut self.state).handle(event);
        self.transition(next);
    }

    pub fn search(&mut self, term: impl Into<String>) {
        self.dispatch(ViewEvent::Search(term.into()));
    }

    pub fn select_year(&mut self, token: &str) {
        self.dispatch(ViewEvent::SelectYear(YearFilter::from_token(token)));
    }

    /// Applies a whole criteria set, as the binaries do for their initial flags.
    pub fn apply(&mut self, criteria: &FilterCriteria) {
        if criteria.is_identity() {
            return;
        }
        self.dispatch(ViewEvent::SelectYear(criteria.year.clone()));
        self.dispatch(ViewEvent::Search(criteria.search.clone()));
    }

    pub fn frame(&self) -> Frame {
        self.state.frame()
    }

    fn transition(&mut self, next: ViewState) {
        self.state = next;
        let frame = self.state.frame();
        if let Frame::Table(table) = &frame {
            tracing::debug!(
                "Rendering {} of {} courses ({} rows)",
                table.summary.total_courses,
                self.state.courses().map(|c| c.courses().len()).unwrap_or(0),
                table.rows.len()
            );
        }
        self.sink.render(&frame);
    }
}
