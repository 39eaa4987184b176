use crate::normalize::output::{parse_start_date, SemesterDiscovery};
use crate::sources::common::{attr, parse_dom, tag_name, tag_text};
use crate::sources::imut::parser::timetable_rows;
use crate::types::TimeSlot;
use regex::Regex;
use std::sync::LazyLock;

static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"第\s*(\d+)\s*节").unwrap());
static CLOCK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d{1,2}:\d{2}").unwrap());

const WEEK_SELECT_NAME: &str = "whichWeek";
const FIRST_DAY_CELL_NAME: &str = "td0";

/// Period clock times from the header column of the timetable
/// (`第1节 08:00 ┆ 08:45`).
pub fn parse_period_headers(document: &str) -> Vec<TimeSlot> {
    let Ok(rows) = timetable_rows(document) else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| row.header.as_deref())
        .filter_map(|header| {
            let number = PERIOD_RE.captures(header)?[1].parse::<u32>().ok()?;
            let mut clocks = CLOCK_RE.find_iter(header).map(|m| m.as_str());
            let start = clocks.next()?;
            let end = clocks.next()?;
            Some(TimeSlot::new(number, &zero_pad(start), &zero_pad(end)))
        })
        .collect()
}

fn zero_pad(clock: &str) -> String {
    if clock.len() == 4 {
        format!("0{clock}")
    } else {
        clock.to_string()
    }
}

/// Reads the weekly view: the highest `whichWeek` option is the semester
/// length and the first day cell holds the date of week 1.
pub fn parse_week_page(document: &str) -> Result<SemesterDiscovery, String> {
    let dom = parse_dom(document)?;
    let parser = dom.parser();

    let select = dom
        .nodes()
        .iter()
        .filter_map(|node| node.as_tag())
        .find(|tag| tag_name(tag) == "select" && attr(tag, "name").as_deref() == Some(WEEK_SELECT_NAME))
        .ok_or_else(|| format!("No select[name={WEEK_SELECT_NAME}] in week page"))?;

    let select_children = select.children();
    let total_weeks = select_children
        .all(parser)
        .iter()
        .filter_map(|node| node.as_tag())
        .filter(|tag| tag_name(tag) == "option")
        .filter_map(|option| attr(option, "value")?.parse::<u32>().ok())
        .filter(|week| *week > 0)
        .max();
    if total_weeks.is_none() {
        return Err("Week selector has no numeric options".to_string());
    }

    let start_date = dom
        .nodes()
        .iter()
        .filter_map(|node| node.as_tag())
        .find(|tag| tag_name(tag) == "td" && attr(tag, "name").as_deref() == Some(FIRST_DAY_CELL_NAME))
        .map(|cell| tag_text(cell, parser))
        .and_then(|text| match parse_start_date(&text) {
            Ok(date) => Some(date),
            Err(err) => {
                tracing::warn!("[Import] Ignoring first day cell: {}", err);
                None
            }
        });

    Ok(SemesterDiscovery {
        time_slots: None,
        start_date,
        total_weeks,
    })
}
