use crate::common::{import_config, load_fixture, MockFetcher};
use chrono::NaiveDate;
use schedule_ingest::sources::chaoxing::adapter::CHAOXING_ADAPTER;
use schedule_ingest::sources::SourceAdapter;
use schedule_ingest::types::TimeSlot;

const CALENDAR_URL: &str = "https://jw.example.edu.cn/admin/api/getZclistByXnxq?xnxq=2025-2026-1";

#[tokio::test]
async fn test_discovers_slots_start_date_and_length() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(CALENDAR_URL, &load_fixture("chaoxing_calendar.json"));
    let mut config = import_config("sxgcxy", "https://jw.example.edu.cn/sdpkkbList");
    config.semester_url = Some(CALENDAR_URL.to_string());

    let discovery = CHAOXING_ADAPTER
        .discover_semester(&fetcher, &config)
        .await
        .expect("discovery failed");

    let slots = discovery.time_slots.expect("time slots");
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0], TimeSlot::new(1, "08:00", "08:45"));
    assert_eq!(discovery.start_date, NaiveDate::from_ymd_opt(2025, 9, 1));
    assert_eq!(discovery.total_weeks, Some(18));
}

#[tokio::test]
async fn test_without_calendar_url_nothing_is_fetched() {
    let fetcher = MockFetcher::new();
    let config = import_config("sxgcxy", "https://jw.example.edu.cn/sdpkkbList");

    let discovery = CHAOXING_ADAPTER
        .discover_semester(&fetcher, &config)
        .await
        .unwrap();

    assert!(discovery.time_slots.is_none());
    assert!(fetcher.requested.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_calendar_envelope_is_an_error() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(CALENDAR_URL, r#"{"ret": 1, "msg": "参数错误"}"#);
    let mut config = import_config("sxgcxy", "https://jw.example.edu.cn/sdpkkbList");
    config.semester_url = Some(CALENDAR_URL.to_string());

    assert!(CHAOXING_ADAPTER
        .discover_semester(&fetcher, &config)
        .await
        .is_err());
}
