use crate::normalize::fields::normalize_text;
use crate::normalize::occurrence::{RawFields, WeekInfo};
use crate::normalize::sections::SectionInfo;
use crate::sources::common::{attr, decode_entities, parse_dom, tag_name, tag_text};
use regex::Regex;
use std::sync::LazyLock;

// Line breaks may come back as `<br>`, `<br/>` or `<br></br>`.
static BLOCK_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>(?:\s*</br\s*>)?\s*<br\s*/?>(?:\s*</br\s*>)?").unwrap()
});
static LINE_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>(?:\s*</br\s*>)?").unwrap());
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</?[A-Za-z][^>]*>").unwrap());

pub const TIMETABLE_ID: &str = "timetable";
const COURSE_MARKER: &str = "<<";

/// One row of `table#timetable` below the header: the `th` label and the
/// raw markup of each `td` cell.
pub(crate) struct TimetableRow {
    pub header: Option<String>,
    pub cells: Vec<String>,
}

pub(crate) fn timetable_rows(document: &str) -> Result<Vec<TimetableRow>, String> {
    let dom = parse_dom(document)?;
    let parser = dom.parser();
    let table = dom
        .nodes()
        .iter()
        .filter_map(|node| node.as_tag())
        .find(|tag| tag_name(tag) == "table" && attr(tag, "id").as_deref() == Some(TIMETABLE_ID))
        .ok_or_else(|| format!("No table#{TIMETABLE_ID} in document"))?;

    let mut rows = Vec::new();
    let table_children = table.children();
    let row_tags = table_children
        .all(parser)
        .iter()
        .filter_map(|node| node.as_tag())
        .filter(|tag| tag_name(tag) == "tr")
        .skip(1);

    for row in row_tags {
        let mut header = None;
        let mut cells = Vec::new();
        let row_children = row.children();
        for tag in row_children.all(parser).iter().filter_map(|node| node.as_tag()) {
            match tag_name(tag).as_str() {
                "th" if header.is_none() => header = Some(tag_text(tag, parser)),
                "td" => cells.push(tag.inner_html(parser).to_string()),
                _ => {}
            }
        }
        rows.push(TimetableRow { header, cells });
    }

    Ok(rows)
}

/// Parses the student timetable grid. The row below the header is the
/// section number and the cell position is the weekday; one cell can hold
/// several courses separated by blank lines.
pub fn parse_timetable(document: &str) -> Result<Vec<RawFields>, String> {
    let mut fields = Vec::new();
    for (row_index, row) in timetable_rows(document)?.into_iter().enumerate() {
        let section = row_index as u32 + 1;
        for (cell_index, html) in row.cells.iter().enumerate() {
            let day = cell_index as i64 + 1;
            for block in BLOCK_SPLIT_RE.split(html) {
                fields.extend(parse_block(block, day, section));
            }
        }
    }

    Ok(fields)
}

fn block_lines(block: &str) -> Vec<String> {
    LINE_SPLIT_RE
        .split(block)
        .map(|line| normalize_text(&decode_entities(&TAG_RE.replace_all(line, ""))))
        .filter(|line| !line.is_empty())
        .collect()
}

fn parse_block(block: &str, day: i64, section: u32) -> Vec<RawFields> {
    let lines = block_lines(block);
    let course_count = lines.iter().filter(|line| line.contains(COURSE_MARKER)).count();
    if course_count == 0 {
        return Vec::new();
    }
    if course_count == 1 && lines.len() < 4 {
        tracing::debug!("[Import] Skipping short course block: {:?}", lines);
        return Vec::new();
    }

    let mut courses = Vec::new();
    let mut current: Vec<String> = Vec::new();
    for line in lines {
        if line.contains(COURSE_MARKER) && !current.is_empty() {
            courses.extend(parse_course(&current, day, section));
            current.clear();
        }
        current.push(line);
    }
    if !current.is_empty() {
        courses.extend(parse_course(&current, day, section));
    }
    courses
}

/// `[<<name>>;n, room, teacher, weeks, kind]`, or without the teacher line
/// when the course has none.
fn parse_course(lines: &[String], day: i64, section: u32) -> Option<RawFields> {
    let name = lines.first().filter(|line| line.contains(COURSE_MARKER))?;
    let room = lines.get(1).cloned().unwrap_or_default();
    let (teacher, weeks) = if lines.len() > 4 {
        (lines[2].clone(), lines[3].clone())
    } else {
        (String::new(), lines.get(2).cloned().unwrap_or_default())
    };

    Some(RawFields {
        name: name.clone(),
        teacher,
        room,
        day,
        sections: SectionInfo::single(section),
        weeks: WeekInfo::Expression(weeks),
    })
}
