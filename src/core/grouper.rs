use crate::core::{CourseRecord, CourseSet, RowDescriptor};

/// Contiguous run of records sharing a year label.
#[derive(Debug, Clone, PartialEq)]
pub struct YearGroup<'a> {
    pub year_level: &'a str,
    pub records: &'a [CourseRecord],
}

/// Splits an already-ordered set into year runs without reordering anything.
pub fn group_by_year(courses: &CourseSet) -> Vec<YearGroup<'_>> {
    courses
        .records()
        .chunk_by(|a, b| a.year_level == b.year_level)
        .map(|run| YearGroup {
            year_level: &run[0].year_level,
            records: run,
        })
        .collect()
}

/// Row sequence with a divider ahead of each year run.
pub fn build_rows(courses: &CourseSet) -> Vec<RowDescriptor> {
    let mut rows = Vec::with_capacity(courses.len() + 4);
    for group in group_by_year(courses) {
        rows.push(RowDescriptor::Divider {
            label: group.year_level.to_string(),
        });
        rows.extend(group.records.iter().map(RowDescriptor::course));
    }
    rows
}
