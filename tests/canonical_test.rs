mod common;

use common::{occurrence, weeks};
use schedule_ingest::normalize::canonical::{canonicalize, MergeStrategy};
use schedule_ingest::normalize::occurrence::{build_occurrences, RawOccurrence};
use schedule_ingest::normalize::{RawFields, SectionInfo, WeekInfo};
use schedule_ingest::types::CourseRecord;

fn as_occurrences(records: &[CourseRecord]) -> Vec<RawOccurrence> {
    records.iter().cloned().map(RawOccurrence::from).collect()
}

fn spans(records: &[CourseRecord]) -> Vec<(u32, u32)> {
    records
        .iter()
        .map(|record| (record.start_section, record.end_section))
        .collect()
}

#[test]
fn test_end_to_end_adjacent_sections() {
    let raw = |section: u32| RawFields {
        name: "Algorithms".to_string(),
        teacher: "Li".to_string(),
        room: "C101".to_string(),
        day: 2,
        sections: SectionInfo::single(section),
        weeks: WeekInfo::Expression("1-16".to_string()),
    };

    let built = build_occurrences(vec![raw(3), raw(4)]);
    assert_eq!(built.rejected, 0);
    let records = canonicalize(built.occurrences, MergeStrategy::SectionAdjacency);

    assert_eq!(
        records,
        vec![CourseRecord {
            name: "Algorithms".to_string(),
            teacher: "Li".to_string(),
            position: "C101".to_string(),
            day: 2,
            start_section: 3,
            end_section: 4,
            weeks: weeks(1..=16),
        }]
    );
}

#[test]
fn test_adjacency_stops_at_gaps() {
    let input = vec![
        occurrence("Algorithms", 1, 1, 1, weeks(1..=16)),
        occurrence("Algorithms", 1, 2, 2, weeks(1..=16)),
        occurrence("Algorithms", 1, 3, 3, weeks(1..=16)),
        occurrence("Algorithms", 1, 5, 5, weeks(1..=16)),
    ];
    let records = canonicalize(input, MergeStrategy::SectionAdjacency);
    assert_eq!(spans(&records), vec![(1, 3), (5, 5)]);
}

#[test]
fn test_adjacency_requires_equal_weeks() {
    let input = vec![
        occurrence("Algorithms", 1, 1, 1, weeks(1..=8)),
        occurrence("Algorithms", 1, 2, 2, weeks(9..=16)),
    ];
    let records = canonicalize(input, MergeStrategy::SectionAdjacency);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_adjacency_absorbs_duplicate_sections() {
    let input = vec![
        occurrence("Algorithms", 1, 1, 2, weeks(1..=16)),
        occurrence("Algorithms", 1, 2, 2, weeks(1..=16)),
        occurrence("Algorithms", 1, 3, 3, weeks(1..=16)),
    ];
    let records = canonicalize(input, MergeStrategy::SectionAdjacency);
    assert_eq!(spans(&records), vec![(1, 3)]);
}

#[test]
fn test_duplicate_identity_union() {
    let input = vec![
        occurrence("Algorithms", 3, 1, 2, weeks(1..=8)),
        occurrence("Algorithms", 3, 1, 2, weeks(9..=16)),
    ];
    let records = canonicalize(input, MergeStrategy::IdentityUnion);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].weeks, weeks(1..=16));
}

#[test]
fn test_identity_union_keeps_different_sections_apart() {
    let input = vec![
        occurrence("Algorithms", 3, 1, 2, weeks(1..=8)),
        occurrence("Algorithms", 3, 3, 4, weeks(1..=8)),
    ];
    let records = canonicalize(input, MergeStrategy::IdentityUnion);
    assert_eq!(spans(&records), vec![(1, 2), (3, 4)]);
}

#[test]
fn test_merge_is_idempotent() {
    let input = vec![
        occurrence("Algorithms", 2, 3, 3, weeks(1..=16)),
        occurrence("Algorithms", 2, 4, 4, weeks(1..=16)),
        occurrence("Algorithms", 2, 4, 4, weeks(1..=8)),
        occurrence("Algorithms", 2, 4, 4, weeks(9..=16)),
        occurrence("Networks", 5, 7, 7, weeks(2..=10)),
        occurrence("Networks", 5, 8, 8, weeks(2..=10)),
    ];

    for strategy in [MergeStrategy::IdentityUnion, MergeStrategy::SectionAdjacency] {
        let once = canonicalize(input.clone(), strategy);
        let twice = canonicalize(as_occurrences(&once), strategy);
        assert_eq!(once, twice, "{strategy:?} not idempotent");
    }
}

#[test]
fn test_output_order_is_permutation_independent() {
    let input = vec![
        occurrence("Networks", 5, 7, 7, weeks(2..=10)),
        occurrence("Algorithms", 2, 3, 3, weeks(1..=16)),
        occurrence("Databases", 2, 1, 2, weeks(1..=8)),
        occurrence("Algorithms", 2, 4, 4, weeks(1..=16)),
        occurrence("Databases", 2, 1, 2, weeks(9..=12)),
        occurrence("Networks", 5, 8, 8, weeks(2..=10)),
    ];

    let mut reversed = input.clone();
    reversed.reverse();
    let mut rotated = input.clone();
    rotated.rotate_left(2);

    for strategy in [MergeStrategy::IdentityUnion, MergeStrategy::SectionAdjacency] {
        let expected = canonicalize(input.clone(), strategy);
        assert_eq!(canonicalize(reversed.clone(), strategy), expected);
        assert_eq!(canonicalize(rotated.clone(), strategy), expected);
    }
}

#[test]
fn test_global_ordering() {
    let input = vec![
        occurrence("B", 2, 1, 2, weeks(1..=4)),
        occurrence("A", 2, 1, 2, weeks(1..=4)),
        occurrence("C", 1, 5, 6, weeks(1..=4)),
        occurrence("D", 1, 1, 2, weeks(1..=4)),
    ];
    let records = canonicalize(input, MergeStrategy::IdentityUnion);
    let names: Vec<&str> = records.iter().map(|record| record.name.as_str()).collect();
    assert_eq!(names, vec!["D", "C", "A", "B"]);
}

#[test]
fn test_empty_weeks_never_reach_output() {
    let raw = RawFields {
        name: "Algorithms".to_string(),
        teacher: "Li".to_string(),
        room: "C101".to_string(),
        day: 2,
        sections: SectionInfo::single(3),
        weeks: WeekInfo::Expression("待定".to_string()),
    };
    let built = build_occurrences(vec![raw]);
    assert_eq!(built.rejected, 1);
    assert!(canonicalize(built.occurrences, MergeStrategy::SectionAdjacency).is_empty());
}

#[test]
fn test_empty_input() {
    assert!(canonicalize(Vec::new(), MergeStrategy::IdentityUnion).is_empty());
    assert!(canonicalize(Vec::new(), MergeStrategy::SectionAdjacency).is_empty());
}
