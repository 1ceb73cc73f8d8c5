use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// One curriculum entry as delivered by the course document.
///
/// Text fields tolerate numbers and booleans (stringified) and fall back to an
/// empty string when missing or `null`, so a sparse entry still renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    #[serde(default, deserialize_with = "lenient_text")]
    pub year_level: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub sem: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub code: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(default)]
    pub credit: Credit,
}

impl CourseRecord {
    pub fn new(
        year_level: impl Into<String>,
        sem: impl Into<String>,
        code: impl Into<String>,
        description: impl Into<String>,
        credit: impl Into<Credit>,
    ) -> Self {
        Self {
            year_level: year_level.into(),
            sem: sem.into(),
            code: code.into(),
            description: description.into(),
            credit: credit.into(),
        }
    }

    /// Composite "year / sem" label shown in the first column of a data row.
    pub fn term_label(&self) -> String {
        match (self.year_level.is_empty(), self.sem.is_empty()) {
            (false, false) => format!("{} / {}", self.year_level, self.sem),
            (false, true) => self.year_level.clone(),
            (true, false) => self.sem.clone(),
            (true, true) => String::new(),
        }
    }
}

fn lenient_text<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    })
}

/// Credit value as given (string or number) plus its numeric coercion.
///
/// A credit that is not a finite, non-negative number keeps its raw text for
/// display and contributes nothing to sums.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Credit {
    raw: String,
    value: Option<f64>,
}

impl Credit {
    pub fn parse(raw: &str) -> Self {
        let value = raw
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0);
        Self {
            raw: raw.to_string(),
            value,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Amount added to credit totals.
    pub fn contribution(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }
}

impl From<&str> for Credit {
    fn from(raw: &str) -> Self {
        Credit::parse(raw)
    }
}

impl From<String> for Credit {
    fn from(raw: String) -> Self {
        Credit::parse(&raw)
    }
}

impl From<f64> for Credit {
    fn from(value: f64) -> Self {
        let raw = value.to_string();
        Self {
            value: (value.is_finite() && value >= 0.0).then_some(value),
            raw,
        }
    }
}

impl From<u32> for Credit {
    fn from(value: u32) -> Self {
        Self {
            raw: value.to_string(),
            value: Some(f64::from(value)),
        }
    }
}

impl<'de> Deserialize<'de> for Credit {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Credit::parse(&s),
            Value::Number(n) => {
                let raw = n.to_string();
                let value = n.as_f64().filter(|v| v.is_finite() && *v >= 0.0);
                Credit { raw, value }
            }
            Value::Null => Credit::default(),
            other => {
                tracing::debug!("Credit value {} is not numeric, counting it as 0", other);
                Credit {
                    raw: other.to_string(),
                    value: None,
                }
            }
        })
    }
}

impl Serialize for Credit {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

/// Ordered course sequence. Every transformation yields a new set, the fetched
/// one stays the source of truth for resets.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseSet {
    records: Vec<CourseRecord>,
}

impl CourseSet {
    pub fn new(records: Vec<CourseRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[CourseRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CourseRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn codes(&self) -> Vec<&str> {
        self.records.iter().map(|r| r.code.as_str()).collect()
    }
}

impl FromIterator<CourseRecord> for CourseSet {
    fn from_iter<I: IntoIterator<Item = CourseRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a CourseSet {
    type Item = &'a CourseRecord;
    type IntoIter = std::slice::Iter<'a, CourseRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Top-level shape of the fetched JSON: `{ "courses": [...] }`.
#[derive(Debug, Clone, Deserialize)]
pub struct CourseDocument {
    pub courses: CourseSet,
}

/// Counts and credits for one year level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year_level: String,
    pub courses: usize,
    pub credits: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub total_courses: usize,
    pub total_credits: f64,
    /// Years in order of first appearance.
    pub by_year: Vec<YearSummary>,
}

impl Summary {
    pub fn year(&self, year_level: &str) -> Option<&YearSummary> {
        self.by_year.iter().find(|y| y.year_level == year_level)
    }

    pub fn courses_by_year(&self) -> Vec<(&str, usize)> {
        self.by_year
            .iter()
            .map(|y| (y.year_level.as_str(), y.courses))
            .collect()
    }

    pub fn credits_by_year(&self) -> Vec<(&str, f64)> {
        self.by_year
            .iter()
            .map(|y| (y.year_level.as_str(), y.credits))
            .collect()
    }

    pub fn total_credits_display(&self) -> String {
        format_credits(self.total_credits)
    }
}

/// One-decimal display form used for every credit figure.
pub fn format_credits(value: f64) -> String {
    format!("{:.1}", value)
}

/// A row handed to the render substrate.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowDescriptor {
    Divider {
        label: String,
    },
    Course {
        term: String,
        code: String,
        description: String,
        credit: String,
    },
}

impl RowDescriptor {
    pub fn course(record: &CourseRecord) -> Self {
        RowDescriptor::Course {
            term: record.term_label(),
            code: record.code.clone(),
            description: record.description.clone(),
            credit: record.credit.raw().to_string(),
        }
    }

    pub fn is_divider(&self) -> bool {
        matches!(self, RowDescriptor::Divider { .. })
    }
}

/// Year-level selection. `All` is the identity filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum YearFilter {
    #[default]
    All,
    Year(String),
}

impl YearFilter {
    pub const ALL_TOKEN: &'static str = "all";

    /// Button token to filter. Only the exact `"all"` token selects
    /// everything, so a year labelled "All" stays selectable.
    pub fn from_token(token: &str) -> Self {
        if token == Self::ALL_TOKEN {
            YearFilter::All
        } else {
            YearFilter::Year(token.to_string())
        }
    }

    pub fn token(&self) -> &str {
        match self {
            YearFilter::All => Self::ALL_TOKEN,
            YearFilter::Year(label) => label,
        }
    }

    pub fn is_identity(&self) -> bool {
        matches!(self, YearFilter::All)
    }
}

impl Serialize for YearFilter {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.token())
    }
}

/// Active search term and year selection.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct FilterCriteria {
    pub search: String,
    pub year: YearFilter,
}

impl FilterCriteria {
    pub fn new(search: impl Into<String>, year: YearFilter) -> Self {
        Self {
            search: search.into(),
            year,
        }
    }

    pub fn is_identity(&self) -> bool {
        self.search.is_empty() && self.year.is_identity()
    }
}

/// Everything a sink needs to draw the table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    pub rows: Vec<RowDescriptor>,
    pub summary: Summary,
    /// Distinct year labels of the full set, in sorted order.
    pub year_options: Vec<String>,
    pub criteria: FilterCriteria,
}

impl TableView {
    pub fn course_rows(&self) -> impl Iterator<Item = &RowDescriptor> {
        self.rows.iter().filter(|r| !r.is_divider())
    }
}

/// A full render of the current view state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Frame {
    Loading,
    Table(TableView),
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_accepts_string_and_number() {
        let json = serde_json::json!([
            {"year_level": "1st", "sem": "1st", "code": "A", "description": "x", "credit": "3"},
            {"year_level": "1st", "sem": "1st", "code": "B", "description": "y", "credit": 2.5}
        ]);

        let set: CourseSet = serde_json::from_value(json).unwrap();

        assert_eq!(set.records()[0].credit.value(), Some(3.0));
        assert_eq!(set.records()[0].credit.raw(), "3");
        assert_eq!(set.records()[1].credit.value(), Some(2.5));
        assert_eq!(set.records()[1].credit.raw(), "2.5");
    }

    #[test]
    fn test_non_numeric_credit_contributes_zero() {
        assert_eq!(Credit::parse("three").contribution(), 0.0);
        assert_eq!(Credit::parse("-2").contribution(), 0.0);
        assert_eq!(Credit::parse("").contribution(), 0.0);
        assert_eq!(Credit::parse(" 4 ").contribution(), 4.0);
        assert_eq!(Credit::parse("-2").raw(), "-2");
    }

    #[test]
    fn test_missing_and_null_fields_become_empty() {
        let json = serde_json::json!({"code": "CS101", "sem": null, "year_level": 1});

        let record: CourseRecord = serde_json::from_value(json).unwrap();

        assert_eq!(record.code, "CS101");
        assert_eq!(record.sem, "");
        assert_eq!(record.year_level, "1");
        assert_eq!(record.description, "");
        assert_eq!(record.credit.raw(), "");
        assert_eq!(record.credit.value(), None);
    }

    #[test]
    fn test_boolean_credit_keeps_raw_text() {
        let json = serde_json::json!({"code": "X", "credit": true});
        let record: CourseRecord = serde_json::from_value(json).unwrap();
        assert_eq!(record.credit.raw(), "true");
        assert_eq!(record.credit.contribution(), 0.0);
    }

    #[test]
    fn test_document_requires_courses_key() {
        let ok: CourseDocument = serde_json::from_str(r#"{"courses": []}"#).unwrap();
        assert!(ok.courses.is_empty());

        assert!(serde_json::from_str::<CourseDocument>(r#"{"subjects": []}"#).is_err());
    }

    #[test]
    fn test_term_label() {
        let record = CourseRecord::new("2nd", "1st", "CS201", "Data", "3");
        assert_eq!(record.term_label(), "2nd / 1st");

        let no_sem = CourseRecord::new("2nd", "", "CS201", "Data", "3");
        assert_eq!(no_sem.term_label(), "2nd");
    }

    #[test]
    fn test_year_filter_tokens() {
        assert_eq!(YearFilter::from_token("all"), YearFilter::All);
        assert_eq!(
            YearFilter::from_token("ALL"),
            YearFilter::Year("ALL".to_string())
        );
        assert_eq!(
            YearFilter::from_token("2nd"),
            YearFilter::Year("2nd".to_string())
        );
        assert_eq!(YearFilter::Year("3rd".to_string()).token(), "3rd");
    }

    #[test]
    fn test_format_credits_one_decimal() {
        assert_eq!(format_credits(6.0), "6.0");
        assert_eq!(format_credits(2.26), "2.3");
        assert_eq!(format_credits(0.0), "0.0");
    }
}
