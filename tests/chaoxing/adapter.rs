use crate::common::load_fixture;
use schedule_ingest::normalize::canonical::MergeStrategy;
use schedule_ingest::runtime::orchestrator::normalize_document;
use schedule_ingest::sources::chaoxing::adapter::CHAOXING_ADAPTER;
use schedule_ingest::sources::chaoxing::parser::UNASSIGNED_ROOM;
use schedule_ingest::sources::SourceAdapter;

#[test]
fn test_adapter_rebuilds_blocks_from_single_sections() {
    let outcome = normalize_document(&CHAOXING_ADAPTER, &load_fixture("chaoxing.json"))
        .expect("normalize failed");

    assert_eq!(outcome.rejected, 1);
    let summary: Vec<(&str, u8, u32, u32)> = outcome
        .courses
        .iter()
        .map(|c| (c.name.as_str(), c.day, c.start_section, c.end_section))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("数据结构", 2, 3, 4),
            ("数据结构", 2, 6, 6),
            ("军事理论", 4, 1, 2),
        ]
    );

    assert_eq!(outcome.courses[0].teacher, "刘洋");
    assert_eq!(outcome.courses[0].position, "实验楼301");
    assert_eq!(outcome.courses[2].position, UNASSIGNED_ROOM);
    assert_eq!(
        outcome.courses[2].weeks.iter().collect::<Vec<_>>(),
        vec![3, 4, 5]
    );
}

#[test]
fn test_adapter_declares_section_adjacency() {
    assert_eq!(
        CHAOXING_ADAPTER.merge_strategy(),
        MergeStrategy::SectionAdjacency
    );
}

#[test]
fn test_error_envelope_is_rejected() {
    let document = r#"{"ret": 401, "msg": "会话已过期"}"#;
    let err = CHAOXING_ADAPTER.produce_occurrences(document).unwrap_err();
    assert!(err.contains("401"), "unexpected error: {err}");
}
