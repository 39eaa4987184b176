#![allow(dead_code)]
use async_trait::async_trait;
use schedule_ingest::normalize::occurrence::RawOccurrence;
use schedule_ingest::normalize::sections::SectionRange;
use schedule_ingest::normalize::weeks::WeekSet;
use schedule_ingest::runtime::fetcher::Fetcher;
use schedule_ingest::runtime::logging::Logger;
use schedule_ingest::runtime::types::{ImportContext, ScheduleSink};
use schedule_ingest::types::{CourseRecord, ImportConfig, SemesterConfig, TimeSlot};
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

pub fn fixtures_dir() -> String {
    format!("{}/tests/fixtures", env!("CARGO_MANIFEST_DIR"))
}

pub fn load_fixture(filename: &str) -> String {
    let path = Path::new(&fixtures_dir()).join(filename);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

pub fn weeks(range: std::ops::RangeInclusive<u32>) -> WeekSet {
    range.collect()
}

pub fn occurrence(name: &str, day: u8, start: u32, end: u32, weeks: WeekSet) -> RawOccurrence {
    RawOccurrence {
        name: name.to_string(),
        teacher: "Li".to_string(),
        room: "C101".to_string(),
        day,
        sections: SectionRange { start, end },
        weeks,
    }
}

pub struct MockFetcher {
    pub fixtures: HashMap<String, String>,
    pub requested: Mutex<Vec<String>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self {
            fixtures: HashMap::new(),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn add_fixture(&mut self, url: &str, content: &str) {
        self.fixtures.insert(url.to_string(), content.to_string());
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> Result<String, String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.fixtures
            .get(url)
            .cloned()
            .ok_or_else(|| format!("MockFetcher: No fixture for URL: {}", url))
    }
}

/// Records every payload it is asked to save. `fail_on` names a stage
/// (`courses`, `time_slots` or `config`) that should fail instead.
#[derive(Default)]
pub struct MockSink {
    pub courses: Mutex<Vec<CourseRecord>>,
    pub time_slots: Mutex<Vec<TimeSlot>>,
    pub config: Mutex<Option<SemesterConfig>>,
    pub fail_on: Option<&'static str>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(stage: &'static str) -> Self {
        Self {
            fail_on: Some(stage),
            ..Self::default()
        }
    }

    fn check(&self, stage: &str) -> Result<(), String> {
        if self.fail_on == Some(stage) {
            Err(format!("MockSink: {stage} rejected"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ScheduleSink for MockSink {
    async fn save_courses(&self, courses: &[CourseRecord]) -> Result<(), String> {
        self.check("courses")?;
        *self.courses.lock().unwrap() = courses.to_vec();
        Ok(())
    }

    async fn save_time_slots(&self, time_slots: &[TimeSlot]) -> Result<(), String> {
        self.check("time_slots")?;
        *self.time_slots.lock().unwrap() = time_slots.to_vec();
        Ok(())
    }

    async fn save_config(&self, config: &SemesterConfig) -> Result<(), String> {
        self.check("config")?;
        *self.config.lock().unwrap() = Some(config.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct MockLogger {
    pub logs: Mutex<Vec<(String, String)>>,
}

impl MockLogger {
    pub fn messages(&self, level: &str) -> Vec<String> {
        self.logs
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| l == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

#[async_trait]
impl Logger for MockLogger {
    async fn log(&self, level: &str, message: &str, _context: Option<serde_json::Value>) {
        self.logs
            .lock()
            .unwrap()
            .push((level.to_string(), message.to_string()));
    }
}

pub fn create_test_context(
    fetcher: MockFetcher,
    sink: Arc<MockSink>,
    logger: Arc<MockLogger>,
) -> ImportContext {
    ImportContext {
        fetcher: Arc::new(fetcher),
        sink,
        logger,
    }
}

pub fn import_config(institution: &str, data_url: &str) -> ImportConfig {
    ImportConfig {
        institution: institution.to_string(),
        data_url: data_url.to_string(),
        semester_url: None,
        weeks_url: None,
        confirmed: true,
        campus: None,
        semester_start_date: None,
        allow_empty: false,
        callback_base: "http://localhost:8787".to_string(),
        callback_token: "test-token".to_string(),
    }
}
