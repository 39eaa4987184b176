use crate::types::{CourseRecord, ImportPayload, SemesterConfig, TimeSlot};
use chrono::NaiveDate;

pub const DEFAULT_TOTAL_WEEKS: u32 = 20;
pub const DEFAULT_CLASS_DURATION: u32 = 45;
pub const DEFAULT_BREAK_DURATION: u32 = 10;
pub const DEFAULT_FIRST_DAY_OF_WEEK: u8 = 1;

/// Semester facts a source could report on its own, alongside the course
/// table. Every field is optional; missing ones fall back to presets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SemesterDiscovery {
    pub time_slots: Option<Vec<TimeSlot>>,
    pub start_date: Option<NaiveDate>,
    pub total_weeks: Option<u32>,
}

impl SemesterDiscovery {
    /// Keeps every field already known and takes the rest from `other`.
    pub fn or(self, other: SemesterDiscovery) -> SemesterDiscovery {
        SemesterDiscovery {
            time_slots: self.time_slots.or(other.time_slots),
            start_date: self.start_date.or(other.start_date),
            total_weeks: self.total_weeks.or(other.total_weeks),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigDefaults {
    pub total_weeks: u32,
    pub class_duration: u32,
    pub break_duration: u32,
    pub first_day_of_week: u8,
}

impl Default for ConfigDefaults {
    fn default() -> Self {
        Self {
            total_weeks: DEFAULT_TOTAL_WEEKS,
            class_duration: DEFAULT_CLASS_DURATION,
            break_duration: DEFAULT_BREAK_DURATION,
            first_day_of_week: DEFAULT_FIRST_DAY_OF_WEEK,
        }
    }
}

pub struct OutputAssembler {
    preset_slots: Vec<TimeSlot>,
    defaults: ConfigDefaults,
}

impl OutputAssembler {
    pub fn new(preset_slots: Vec<TimeSlot>, defaults: ConfigDefaults) -> Self {
        Self {
            preset_slots,
            defaults,
        }
    }

    pub fn assemble(&self, courses: Vec<CourseRecord>, discovery: SemesterDiscovery) -> ImportPayload {
        let time_slots = self.time_slots(discovery.time_slots);
        let observed_weeks = max_observed_week(&courses);
        let semester_total_weeks = discovery
            .total_weeks
            .filter(|weeks| *weeks > 0)
            .or(observed_weeks)
            .unwrap_or(self.defaults.total_weeks);

        ImportPayload {
            courses,
            time_slots,
            config: SemesterConfig {
                semester_total_weeks,
                semester_start_date: discovery
                    .start_date
                    .map(|date| date.format("%Y-%m-%d").to_string()),
                default_class_duration: self.defaults.class_duration,
                default_break_duration: self.defaults.break_duration,
                first_day_of_week: self.defaults.first_day_of_week,
            },
        }
    }

    fn time_slots(&self, discovered: Option<Vec<TimeSlot>>) -> Vec<TimeSlot> {
        match discovered {
            Some(mut slots) if !slots.is_empty() => {
                slots.sort_by_key(|slot| slot.number);
                slots.dedup_by_key(|slot| slot.number);
                slots
            }
            _ => self.preset_slots.clone(),
        }
    }
}

pub fn max_observed_week(courses: &[CourseRecord]) -> Option<u32> {
    courses.iter().filter_map(|course| course.weeks.last_week()).max()
}

pub fn parse_start_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| format!("Expected YYYY-MM-DD, got {value:?}: {e}"))
}
