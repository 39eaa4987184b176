use crate::common::load_fixture;
use schedule_ingest::error::ImportError;
use schedule_ingest::normalize::canonical::MergeStrategy;
use schedule_ingest::runtime::orchestrator::normalize_document;
use schedule_ingest::sources::zhengfang::adapter::ZHENGFANG_ADAPTER;
use schedule_ingest::sources::SourceAdapter;

#[test]
fn test_adapter_unions_weeks_of_repeated_rows() {
    let outcome = normalize_document(&ZHENGFANG_ADAPTER, &load_fixture("zhengfang.json"))
        .expect("normalize failed");

    // The row without `zcd` is skipped while parsing; the weekday 9 row is
    // rejected by validation.
    assert_eq!(outcome.rejected, 1);
    assert_eq!(outcome.courses.len(), 3);

    let math = &outcome.courses[0];
    assert_eq!(math.name, "高等数学A(一)");
    assert_eq!(math.teacher, "王建国");
    assert_eq!(math.position, "A101");
    assert_eq!((math.day, math.start_section, math.end_section), (1, 1, 2));
    assert_eq!(math.weeks.iter().collect::<Vec<_>>(), (1..=16).collect::<Vec<_>>());

    let english = &outcome.courses[1];
    assert_eq!(english.name, "大学英语");
    assert_eq!(english.teacher, "李敏");
    assert_eq!(english.position, "B203");
    assert_eq!((english.day, english.start_section, english.end_section), (3, 3, 4));
    assert_eq!(
        english.weeks.iter().collect::<Vec<_>>(),
        vec![1, 3, 5, 7, 9, 11, 13, 15]
    );

    let sports = &outcome.courses[2];
    assert_eq!(sports.day, 5);
    assert_eq!(
        sports.weeks.iter().collect::<Vec<_>>(),
        vec![2, 4, 6, 8, 10, 12, 14, 16, 17]
    );
}

#[test]
fn test_adapter_declares_identity_union() {
    assert_eq!(ZHENGFANG_ADAPTER.merge_strategy(), MergeStrategy::IdentityUnion);
}

#[test]
fn test_missing_kb_list_is_no_data() {
    let result = normalize_document(&ZHENGFANG_ADAPTER, r#"{"xsxx": {}}"#);
    assert!(matches!(result, Err(ImportError::NoData(_))));

    let login_page = "<html><body>用户登录</body></html>";
    assert!(matches!(
        normalize_document(&ZHENGFANG_ADAPTER, login_page),
        Err(ImportError::NoData(_))
    ));
}

#[test]
fn test_empty_kb_list_is_no_data() {
    let result = normalize_document(&ZHENGFANG_ADAPTER, r#"{"kbList": []}"#);
    assert!(matches!(result, Err(ImportError::NoData(_))));
}
