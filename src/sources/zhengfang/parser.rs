use crate::normalize::occurrence::{RawFields, WeekInfo};
use crate::normalize::sections::SectionInfo;
use crate::sources::common::{json_array, json_int, json_text, parse_json};

/// Parses the personal timetable JSON (`kbList` rows keyed `kcmc` name, `xm`
/// teacher, `cdmc` room, `xqj` weekday, `jcs` sections, `zcd` weeks).
pub fn parse_kb_list(document: &str) -> Result<Vec<RawFields>, String> {
    let value = parse_json(document, "Zhengfang timetable")?;
    let rows = json_array(&value, "kbList")?;

    let mut fields: Vec<RawFields> = Vec::with_capacity(rows.len());
    for row in rows {
        let (Some(name), Some(teacher), Some(room), Some(sections), Some(weeks)) = (
            json_text(row, "kcmc"),
            json_text(row, "xm"),
            json_text(row, "cdmc"),
            json_text(row, "jcs"),
            json_text(row, "zcd"),
        ) else {
            tracing::debug!("[Import] Skipping kbList row with missing fields: {}", row);
            continue;
        };
        let Some(day) = json_int(row, "xqj") else {
            tracing::debug!("[Import] Skipping kbList row without weekday: {}", row);
            continue;
        };

        fields.push(RawFields {
            name,
            teacher,
            room,
            day,
            sections: SectionInfo::Text(sections),
            weeks: WeekInfo::Expression(weeks),
        });
    }

    Ok(fields)
}
