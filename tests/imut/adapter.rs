use crate::common::load_fixture;
use schedule_ingest::runtime::orchestrator::normalize_document;
use schedule_ingest::sources::imut::adapter::IMUT_ADAPTER;
use schedule_ingest::sources::SourceAdapter;
use schedule_ingest::types::TimeSlot;

#[test]
fn test_adapter_merges_rows_into_blocks() {
    let outcome =
        normalize_document(&IMUT_ADAPTER, &load_fixture("imut.html")).expect("normalize failed");

    assert_eq!(outcome.rejected, 0);
    let summary: Vec<(&str, &str, &str, u8, u32, u32)> = outcome
        .courses
        .iter()
        .map(|c| {
            (
                c.name.as_str(),
                c.teacher.as_str(),
                c.position.as_str(),
                c.day,
                c.start_section,
                c.end_section,
            )
        })
        .collect();
    assert_eq!(
        summary,
        vec![
            ("离散数学导论", "贾老师", "教C", 1, 1, 2),
            ("工程训练C", "刘老师", "格物楼D", 2, 2, 3),
            ("数据结构与算法", "秦老师", "教C", 2, 2, 3),
            ("体育选项课(一)", "", "操 场", 5, 3, 4),
        ]
    );
    assert_eq!(
        outcome.courses[3].weeks.iter().collect::<Vec<_>>(),
        (2..=18).collect::<Vec<_>>()
    );
}

#[test]
fn test_period_headers_become_time_slots() {
    let discovery = IMUT_ADAPTER.discover_from_document(&load_fixture("imut.html"));
    let slots = discovery.time_slots.expect("time slots");
    assert_eq!(slots.len(), 4);
    assert_eq!(slots[0], TimeSlot::new(1, "08:00", "08:45"));
    assert_eq!(slots[3], TimeSlot::new(4, "11:00", "11:40"));
}
