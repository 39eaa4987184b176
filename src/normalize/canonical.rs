use crate::normalize::occurrence::RawOccurrence;
use crate::normalize::sections::SectionRange;
use crate::normalize::weeks::WeekSet;
use crate::types::CourseRecord;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// How a source's occurrences collapse into course records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeStrategy {
    /// One row per meeting pattern, possibly repeated across passes: union
    /// the weeks of rows with the same identity.
    IdentityUnion,
    /// One row per single period: rebuild multi-period blocks from runs of
    /// adjacent sections.
    SectionAdjacency,
}

type IdentityKey = (String, String, u8, u32, u32, String);
type AdjacencyKey = (u8, String, String, String, WeekSet);

impl From<RawOccurrence> for CourseRecord {
    fn from(occurrence: RawOccurrence) -> Self {
        CourseRecord {
            name: occurrence.name,
            teacher: occurrence.teacher,
            position: occurrence.room,
            day: occurrence.day,
            start_section: occurrence.sections.start,
            end_section: occurrence.sections.end,
            weeks: occurrence.weeks,
        }
    }
}

impl From<CourseRecord> for RawOccurrence {
    fn from(record: CourseRecord) -> Self {
        RawOccurrence {
            name: record.name,
            teacher: record.teacher,
            room: record.position,
            day: record.day,
            sections: SectionRange {
                start: record.start_section,
                end: record.end_section,
            },
            weeks: record.weeks,
        }
    }
}

pub fn canonicalize(occurrences: Vec<RawOccurrence>, strategy: MergeStrategy) -> Vec<CourseRecord> {
    let records: Vec<CourseRecord> = occurrences.into_iter().map(CourseRecord::from).collect();

    let mut merged = match strategy {
        MergeStrategy::IdentityUnion => identity_union(records),
        MergeStrategy::SectionAdjacency => {
            // A union can make two blocks share a week set and become
            // adjacent, so repeat until nothing merges.
            let mut current = records;
            loop {
                let before = current.len();
                current = identity_union(adjacency_merge(current));
                if current.len() == before {
                    break current;
                }
            }
        }
    };

    sort_records(&mut merged);
    merged
}

/// Strategy A: records sharing `(name, teacher, day, start, end, room)` keep
/// a single entry whose weeks are the union of all of them.
pub fn identity_union(records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut by_identity: BTreeMap<IdentityKey, WeekSet> = BTreeMap::new();

    for record in records {
        let key = (
            record.name,
            record.teacher,
            record.day,
            record.start_section,
            record.end_section,
            record.position,
        );
        by_identity
            .entry(key)
            .or_default()
            .union_with(&record.weeks);
    }

    by_identity
        .into_iter()
        .map(
            |((name, teacher, day, start_section, end_section, position), weeks)| CourseRecord {
                name,
                teacher,
                position,
                day,
                start_section,
                end_section,
                weeks,
            },
        )
        .collect()
}

/// Strategy B: within each `(day, name, teacher, room, weeks)` group, runs of
/// consecutive sections become one record. Repeated or overlapping sections
/// are absorbed into the running block.
pub fn adjacency_merge(records: Vec<CourseRecord>) -> Vec<CourseRecord> {
    let mut groups: BTreeMap<AdjacencyKey, Vec<(u32, u32)>> = BTreeMap::new();

    for record in records {
        let key = (
            record.day,
            record.name,
            record.teacher,
            record.position,
            record.weeks,
        );
        groups
            .entry(key)
            .or_default()
            .push((record.start_section, record.end_section));
    }

    let mut merged: Vec<CourseRecord> = Vec::new();
    for ((day, name, teacher, position, weeks), mut spans) in groups {
        spans.sort_unstable();

        let mut blocks: Vec<(u32, u32)> = Vec::new();
        let mut window: Option<(u32, u32)> = None;
        for (start, end) in spans {
            window = match window {
                Some((open_start, open_end)) if start <= open_end.saturating_add(1) => {
                    Some((open_start, open_end.max(end)))
                }
                Some(closed) => {
                    blocks.push(closed);
                    Some((start, end))
                }
                None => Some((start, end)),
            };
        }
        if let Some(last) = window {
            blocks.push(last);
        }

        for (start_section, end_section) in blocks {
            merged.push(CourseRecord {
                name: name.clone(),
                teacher: teacher.clone(),
                position: position.clone(),
                day,
                start_section,
                end_section,
                weeks: weeks.clone(),
            });
        }
    }

    merged
}

pub fn compare_records(a: &CourseRecord, b: &CourseRecord) -> Ordering {
    a.day
        .cmp(&b.day)
        .then_with(|| a.start_section.cmp(&b.start_section))
        .then_with(|| a.end_section.cmp(&b.end_section))
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.teacher.cmp(&b.teacher))
        .then_with(|| a.position.cmp(&b.position))
        .then_with(|| a.weeks.cmp(&b.weeks))
}

pub fn sort_records(records: &mut [CourseRecord]) {
    records.sort_by(compare_records);
}
