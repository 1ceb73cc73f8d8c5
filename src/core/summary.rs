use crate::core::{CourseSet, Summary, YearSummary};

/// Totals over whatever set is currently displayed.
///
/// Credit sums keep full precision; rounding happens only when displayed.
/// Year groups appear in order of first encounter.
pub fn summarize(courses: &CourseSet) -> Summary {
    let mut summary = Summary {
        total_courses: courses.len(),
        ..Summary::default()
    };

    for record in courses {
        let credit = record.credit.contribution();
        if record.credit.value().is_none() && !record.credit.raw().is_empty() {
            tracing::debug!(
                "Credit '{}' of {} is not numeric, counting it as 0",
                record.credit.raw(),
                record.code
            );
        }
        summary.total_credits += credit;

        match summary
            .by_year
            .iter_mut()
            .find(|y| y.year_level == record.year_level)
        {
            Some(year) => {
                year.courses += 1;
                year.credits += credit;
            }
            None => summary.by_year.push(YearSummary {
                year_level: record.year_level.clone(),
                courses: 1,
                credits: credit,
            }),
        }
    }

    summary
}
