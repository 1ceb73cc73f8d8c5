use crate::core::{CourseRecord, CourseSet, FilterCriteria, YearFilter};

/// Case-insensitive substring match on code, description, year and semester.
pub fn matches_search(record: &CourseRecord, needle_lower: &str) -> bool {
    if needle_lower.is_empty() {
        return true;
    }
    [
        &record.code,
        &record.description,
        &record.year_level,
        &record.sem,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle_lower))
}

pub fn matches_year(record: &CourseRecord, year: &YearFilter) -> bool {
    match year {
        YearFilter::All => true,
        YearFilter::Year(label) => record.year_level == *label,
    }
}

pub fn filter_by_search(courses: &CourseSet, term: &str) -> CourseSet {
    let needle = term.to_lowercase();
    courses
        .iter()
        .filter(|r| matches_search(r, &needle))
        .cloned()
        .collect()
}

pub fn filter_by_year(courses: &CourseSet, year: &YearFilter) -> CourseSet {
    courses
        .iter()
        .filter(|r| matches_year(r, year))
        .cloned()
        .collect()
}

/// Applies both predicates in one pass, so the result does not depend on
/// which input the user touched first.
pub fn apply_filters(courses: &CourseSet, criteria: &FilterCriteria) -> CourseSet {
    let needle = criteria.search.to_lowercase();
    courses
        .iter()
        .filter(|r| matches_year(r, &criteria.year) && matches_search(r, &needle))
        .cloned()
        .collect()
}
