use crate::normalize::output::{ConfigDefaults, OutputAssembler};
use crate::types::{SourceKind, TimeSlot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

const EMBEDDED_SOURCES_JSON: &str = include_str!("../../configs/sources.json");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampusTimetable {
    pub label: String,
    pub slots: Vec<TimeSlot>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionConfig {
    pub name: String,
    pub source: SourceKind,
    #[serde(default)]
    pub timetables: Vec<CampusTimetable>,
    #[serde(default)]
    pub default_total_weeks: Option<u32>,
    /// Encoding of pages that do not declare a charset, e.g. `gbk`.
    #[serde(default)]
    pub encoding: Option<String>,
}

impl InstitutionConfig {
    /// The fixed timetable for the chosen campus, falling back to the first
    /// one when the index is absent or out of range.
    pub fn preset_time_slots(&self, campus: Option<usize>) -> Vec<TimeSlot> {
        campus
            .and_then(|index| self.timetables.get(index))
            .or_else(|| self.timetables.first())
            .map(|timetable| timetable.slots.clone())
            .unwrap_or_default()
    }

    pub fn assembler(&self, campus: Option<usize>) -> OutputAssembler {
        let mut defaults = ConfigDefaults::default();
        if let Some(total_weeks) = self.default_total_weeks {
            defaults.total_weeks = total_weeks;
        }
        OutputAssembler::new(self.preset_time_slots(campus), defaults)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    pub institutions: HashMap<String, InstitutionConfig>,
}

impl SourcesConfig {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let content =
            fs::read_to_string(path).map_err(|e| format!("Failed to read sources.json: {e}"))?;
        Self::from_json(&content)
    }

    /// Reads `sources.json` from `CONFIGS_PATH` when set, otherwise uses the
    /// copy compiled into the binary.
    pub fn load_default() -> Result<Self, String> {
        match std::env::var("CONFIGS_PATH") {
            Ok(dir) => Self::load_from_file(Path::new(&dir).join("sources.json")),
            Err(_) => Self::from_json(EMBEDDED_SOURCES_JSON),
        }
    }

    pub fn from_json(content: &str) -> Result<Self, String> {
        serde_json::from_str(content).map_err(|e| format!("Failed to parse sources.json: {e}"))
    }

    pub fn get(&self, institution: &str) -> Option<&InstitutionConfig> {
        self.institutions.get(institution)
    }
}
