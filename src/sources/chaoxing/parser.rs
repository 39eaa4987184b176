use crate::normalize::fields::extract_anchor_text;
use crate::normalize::occurrence::{RawFields, WeekInfo};
use crate::normalize::sections::SectionInfo;
use crate::sources::common::{json_array, json_int, json_text, parse_json};
use serde_json::Value;

/// Room shown for rows the source leaves unassigned.
pub const UNASSIGNED_ROOM: &str = "待定";

/// Fails when the envelope reports a non-zero `ret` code.
pub fn check_ret(value: &Value, label: &str) -> Result<(), String> {
    match value.get("ret").and_then(Value::as_i64) {
        Some(0) | None => Ok(()),
        Some(code) => {
            let msg = value
                .get("msg")
                .and_then(Value::as_str)
                .unwrap_or("no message");
            Err(format!("{label} returned ret={code}: {msg}"))
        }
    }
}

/// Parses the `sdpkkbList` response. Each row covers a single section, so
/// consecutive rows of one class are merged later by section adjacency.
pub fn parse_course_data(document: &str) -> Result<Vec<RawFields>, String> {
    let value = parse_json(document, "Chaoxing course list")?;
    check_ret(&value, "Chaoxing course list")?;
    let rows = json_array(&value, "data")?;

    Ok(rows.iter().map(parse_row).collect())
}

fn parse_row(row: &Value) -> RawFields {
    let anchor = |key: &str| {
        json_text(row, key)
            .map(|text| extract_anchor_text(&text))
            .unwrap_or_default()
    };

    let room = anchor("croommc");
    let section = json_int(row, "djc")
        .and_then(|section| u32::try_from(section).ok())
        .unwrap_or(0);

    RawFields {
        name: anchor("kcmc"),
        teacher: anchor("tmc"),
        room: if room.is_empty() {
            UNASSIGNED_ROOM.to_string()
        } else {
            room
        },
        day: json_int(row, "xingqi").unwrap_or(0),
        sections: SectionInfo::single(section),
        weeks: WeekInfo::Expression(json_text(row, "zcstr").unwrap_or_default()),
    }
}
