use crate::common::load_fixture;
use schedule_ingest::error::ImportError;
use schedule_ingest::runtime::orchestrator::normalize_document;
use schedule_ingest::sources::mtt::adapter::MTT_ADAPTER;

#[test]
fn test_adapter_reads_grid_cells() {
    let outcome =
        normalize_document(&MTT_ADAPTER, &load_fixture("mtt.html")).expect("normalize failed");

    // 班会 has no week marker in its room line.
    assert_eq!(outcome.rejected, 1);
    assert_eq!(outcome.courses.len(), 2);

    let network = &outcome.courses[0];
    assert_eq!(network.name, "计算机网络");
    assert_eq!(network.teacher, "黄涛");
    assert_eq!(network.position, "305");
    assert_eq!((network.day, network.start_section, network.end_section), (1, 1, 2));
    let expected: Vec<u32> = (1..=8).chain(10..=16).collect();
    assert_eq!(network.weeks.iter().collect::<Vec<_>>(), expected);
}

#[test]
fn test_placeholder_units_fall_back_to_room_text() {
    let outcome =
        normalize_document(&MTT_ADAPTER, &load_fixture("mtt.html")).expect("normalize failed");

    let os = &outcome.courses[1];
    assert_eq!(os.name, "操作系统");
    assert_eq!(os.position, "信息楼 402");
    assert_eq!((os.day, os.start_section, os.end_section), (3, 5, 6));
    assert_eq!(
        os.weeks.iter().collect::<Vec<_>>(),
        vec![1, 3, 5, 7, 9, 11, 13, 15]
    );
}

#[test]
fn test_page_without_grid_is_no_data() {
    let result = normalize_document(&MTT_ADAPTER, "<html><body>统一身份认证</body></html>");
    assert!(matches!(result, Err(ImportError::NoData(_))));
}
