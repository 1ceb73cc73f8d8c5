use crate::core::{CourseRecord, CourseSet};
use std::cmp::Ordering;

/// Numeric order of an ordinal label such as "1st" or "Year 2".
///
/// Labels without digits sort after every label that has some.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelKey {
    Number(u64),
    NoDigits,
}

impl LabelKey {
    pub fn of(label: &str) -> Self {
        let digits: String = label.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.is_empty() {
            return LabelKey::NoDigits;
        }
        // too many digits for u64
        LabelKey::Number(digits.parse().unwrap_or(u64::MAX))
    }
}

impl Ord for LabelKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (LabelKey::Number(a), LabelKey::Number(b)) => a.cmp(b),
            (LabelKey::Number(_), LabelKey::NoDigits) => Ordering::Less,
            (LabelKey::NoDigits, LabelKey::Number(_)) => Ordering::Greater,
            (LabelKey::NoDigits, LabelKey::NoDigits) => Ordering::Equal,
        }
    }
}

impl PartialOrd for LabelKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub fn sort_key(record: &CourseRecord) -> (LabelKey, LabelKey) {
    (LabelKey::of(&record.year_level), LabelKey::of(&record.sem))
}

/// Returns a new set ordered by year level, then semester. Stable for equal keys.
pub fn sort_courses(courses: &CourseSet) -> CourseSet {
    let mut records = courses.records().to_vec();
    records.sort_by_cached_key(sort_key);
    CourseSet::new(records)
}

pub fn is_sorted(courses: &CourseSet) -> bool {
    courses
        .records()
        .windows(2)
        .all(|pair| sort_key(&pair[0]) <= sort_key(&pair[1]))
}
