use crate::normalize::output::{parse_start_date, SemesterDiscovery};
use crate::sources::chaoxing::parser::check_ret;
use crate::sources::common::{json_int, json_text, parse_json};
use crate::types::TimeSlot;
use serde_json::Value;

/// Reads the `getZclistByXnxq` response: `jcsjszList` carries the period
/// clock times and `zclist` the calendar range of every teaching week.
pub fn parse_week_calendar(document: &str) -> Result<SemesterDiscovery, String> {
    let value = parse_json(document, "Chaoxing week calendar")?;
    check_ret(&value, "Chaoxing week calendar")?;
    let data = value
        .get("data")
        .ok_or_else(|| "Missing `data` in week calendar".to_string())?;

    let time_slots = data
        .get("jcsjszList")
        .and_then(Value::as_array)
        .map(|rows| rows.iter().filter_map(parse_slot).collect::<Vec<_>>())
        .filter(|slots| !slots.is_empty());

    let zclist = data.get("zclist").and_then(Value::as_array);
    let start_date = zclist
        .and_then(|weeks| weeks.iter().find(|week| json_int(week, "zc") == Some(1)))
        .and_then(|week| json_text(week, "minrq"))
        .and_then(|minrq| {
            // "2025-08-25 00:00:00"
            let day = minrq.split_whitespace().next().unwrap_or_default();
            match parse_start_date(day) {
                Ok(date) => Some(date),
                Err(err) => {
                    tracing::warn!("[Import] Ignoring week 1 start date: {}", err);
                    None
                }
            }
        });
    let total_weeks = zclist
        .and_then(|weeks| weeks.iter().filter_map(|week| json_int(week, "zc")).max())
        .and_then(|max| u32::try_from(max).ok());

    Ok(SemesterDiscovery {
        time_slots,
        start_date,
        total_weeks,
    })
}

fn parse_slot(row: &Value) -> Option<TimeSlot> {
    let number = u32::try_from(json_int(row, "jc")?).ok()?;
    Some(TimeSlot {
        number,
        start_time: json_text(row, "kssj")?,
        end_time: json_text(row, "jssj")?,
    })
}
