pub mod filter;
pub mod grouper;
pub mod sorter;
pub mod summary;
pub mod view;

pub use crate::domain::model::{
    CourseRecord, CourseSet, FilterCriteria, Frame, RowDescriptor, Summary, TableView,
    YearFilter, YearSummary,
};
pub use crate::domain::ports::{ConfigProvider, CourseSource, RenderSink, Storage};
pub use crate::utils::error::Result;
