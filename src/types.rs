use crate::normalize::weeks::WeekSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Zhengfang,
    Chaoxing,
    Mtt,
    Imut,
}

/// One canonical schedule entry as handed to the persistence sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub name: String,
    pub teacher: String,
    pub position: String,
    pub day: u8,
    pub start_section: u32,
    pub end_section: u32,
    pub weeks: WeekSet,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub number: u32,
    pub start_time: String,
    pub end_time: String,
}

impl TimeSlot {
    pub fn new(number: u32, start_time: &str, end_time: &str) -> Self {
        Self {
            number,
            start_time: start_time.to_string(),
            end_time: end_time.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemesterConfig {
    pub semester_total_weeks: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub semester_start_date: Option<String>,
    pub default_class_duration: u32,
    pub default_break_duration: u32,
    pub first_day_of_week: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportPayload {
    pub courses: Vec<CourseRecord>,
    pub time_slots: Vec<TimeSlot>,
    pub config: SemesterConfig,
}

/// Job description posted to `/import`. Interactive choices (confirmation,
/// campus, start date) arrive here already resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportConfig {
    pub institution: String,
    pub data_url: String,
    pub semester_url: Option<String>,
    pub weeks_url: Option<String>,
    #[serde(default = "default_confirmed")]
    pub confirmed: bool,
    #[serde(default)]
    pub campus: Option<usize>,
    #[serde(default)]
    pub semester_start_date: Option<String>,
    #[serde(default)]
    pub allow_empty: bool,
    pub callback_base: String,
    pub callback_token: String,
}

fn default_confirmed() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizeRequest {
    pub institution: String,
    pub document: String,
    #[serde(default)]
    pub campus: Option<usize>,
}
