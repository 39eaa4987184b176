use crate::common::{import_config, load_fixture, MockFetcher};
use chrono::NaiveDate;
use schedule_ingest::sources::imut::adapter::IMUT_ADAPTER;
use schedule_ingest::sources::SourceAdapter;

const WEEKS_URL: &str = "http://jw.example.edu.cn/academic/manager/coursearrange/studentWeeklyTimetable.do";

#[tokio::test]
async fn test_week_selector_gives_length_and_start() {
    let mut fetcher = MockFetcher::new();
    fetcher.add_fixture(WEEKS_URL, &load_fixture("imut_weeks.html"));
    let mut config = import_config("imut", "http://jw.example.edu.cn/showTimetable.do");
    config.weeks_url = Some(WEEKS_URL.to_string());

    let discovery = IMUT_ADAPTER
        .discover_semester(&fetcher, &config)
        .await
        .expect("discovery failed");

    assert_eq!(discovery.total_weeks, Some(19));
    assert_eq!(discovery.start_date, NaiveDate::from_ymd_opt(2025, 9, 1));
    assert!(discovery.time_slots.is_none());
}

#[tokio::test]
async fn test_unreachable_week_page_is_an_error() {
    let fetcher = MockFetcher::new();
    let mut config = import_config("imut", "http://jw.example.edu.cn/showTimetable.do");
    config.weeks_url = Some(WEEKS_URL.to_string());

    assert!(IMUT_ADAPTER
        .discover_semester(&fetcher, &config)
        .await
        .is_err());
}
