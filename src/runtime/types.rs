use crate::runtime::fetcher::Fetcher;
use crate::runtime::logging::Logger;
use crate::types::{CourseRecord, SemesterConfig, TimeSlot};
use async_trait::async_trait;
use std::sync::Arc;

/// Durable storage for the three canonical payloads.
#[async_trait]
pub trait ScheduleSink: Send + Sync {
    async fn save_courses(&self, courses: &[CourseRecord]) -> Result<(), String>;
    async fn save_time_slots(&self, time_slots: &[TimeSlot]) -> Result<(), String>;
    async fn save_config(&self, config: &SemesterConfig) -> Result<(), String>;
}

pub struct ImportContext {
    pub fetcher: Arc<dyn Fetcher>,
    pub sink: Arc<dyn ScheduleSink>,
    pub logger: Arc<dyn Logger>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportReport {
    pub courses: usize,
    pub time_slots: usize,
    pub rejected: usize,
    pub total_weeks: u32,
}
