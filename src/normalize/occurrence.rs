use crate::normalize::fields::{clean_course_name, clean_position, clean_teacher};
use crate::normalize::sections::{resolve_sections, SectionInfo, SectionRange};
use crate::normalize::weeks::WeekSet;
use std::fmt;

/// Fields as an adapter scraped them, before any cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    pub name: String,
    pub teacher: String,
    pub room: String,
    pub day: i64,
    pub sections: SectionInfo,
    pub weeks: WeekInfo,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WeekInfo {
    /// A dedicated week expression (`1-16周(单)`, `1,2,3`).
    Expression(String),
    /// Composite text in which only `周`-marked numbers are weeks.
    Marked(String),
}

impl WeekInfo {
    pub fn parse(&self) -> WeekSet {
        match self {
            WeekInfo::Expression(expr) => WeekSet::parse(expr),
            WeekInfo::Marked(text) => WeekSet::scan_marked(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOccurrence {
    pub name: String,
    pub teacher: String,
    pub room: String,
    pub day: u8,
    pub sections: SectionRange,
    pub weeks: WeekSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    EmptyName,
    DayOutOfRange(i64),
    InvalidSections(SectionRange),
    NoWeeks,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::EmptyName => write!(f, "empty course name"),
            Rejection::DayOutOfRange(day) => write!(f, "day {day} outside 1..=7"),
            Rejection::InvalidSections(range) => {
                write!(f, "invalid sections {}-{}", range.start, range.end)
            }
            Rejection::NoWeeks => write!(f, "no weeks"),
        }
    }
}

#[derive(Debug, Default)]
pub struct BuildOutcome {
    pub occurrences: Vec<RawOccurrence>,
    pub rejected: usize,
}

pub fn build_occurrence(fields: &RawFields) -> Result<RawOccurrence, Rejection> {
    let name = clean_course_name(&fields.name);
    if name.is_empty() {
        return Err(Rejection::EmptyName);
    }

    let day = match u8::try_from(fields.day) {
        Ok(day) if (1..=7).contains(&day) => day,
        _ => return Err(Rejection::DayOutOfRange(fields.day)),
    };

    let sections = resolve_sections(&fields.sections);
    if !sections.is_valid() {
        return Err(Rejection::InvalidSections(sections));
    }

    let weeks = fields.weeks.parse();
    if weeks.is_empty() {
        return Err(Rejection::NoWeeks);
    }

    Ok(RawOccurrence {
        name,
        teacher: clean_teacher(&fields.teacher),
        room: clean_position(&fields.room),
        day,
        sections,
        weeks,
    })
}

/// Validates every scraped row. Rejected rows are counted and dropped; a
/// partially broken page still yields whatever rows were usable.
pub fn build_occurrences(rows: Vec<RawFields>) -> BuildOutcome {
    let mut outcome = BuildOutcome::default();
    for fields in &rows {
        match build_occurrence(fields) {
            Ok(occurrence) => outcome.occurrences.push(occurrence),
            Err(rejection) => {
                tracing::debug!(
                    "[Import] Dropping occurrence {:?} on day {}: {}",
                    fields.name,
                    fields.day,
                    rejection
                );
                outcome.rejected += 1;
            }
        }
    }
    outcome
}
