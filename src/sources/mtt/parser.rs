use crate::normalize::occurrence::{RawFields, WeekInfo};
use crate::normalize::sections::SectionInfo;
use crate::sources::common::{
    attr, descendant_text_by_class, first_text_child, has_class, parse_dom, tag_name,
};

const ITEM_ROLE: &str = "item";
const ARRANGE_CLASS: &str = "mtt_arrange_item";
const DETAIL_CLASS: &str = "mtt_item_kcmc";
const TEACHER_CLASS: &str = "mtt_item_jxbmc";
const ROOM_CLASS: &str = "mtt_item_room";

/// Parses the weekly grid. Every `td[data-role=item]` cell carries its day
/// and unit span as attributes; the room line mixes weeks, sections and room.
pub fn parse_grid(document: &str) -> Result<Vec<RawFields>, String> {
    let dom = parse_dom(document)?;
    let parser = dom.parser();

    let cells: Vec<&tl::HTMLTag> = dom
        .nodes()
        .iter()
        .filter_map(|node| node.as_tag())
        .filter(|tag| tag_name(tag) == "td" && attr(tag, "data-role").as_deref() == Some(ITEM_ROLE))
        .collect();
    if cells.is_empty() {
        return Err("No timetable cells (td[data-role=item]) in document".to_string());
    }

    let mut rows = Vec::new();
    for cell in cells {
        let day = attr(cell, "data-week")
            .and_then(|value| value.parse::<i64>().ok())
            .unwrap_or(1);
        let begin = attr(cell, "data-begin-unit")
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(1);
        let end = attr(cell, "data-end-unit")
            .and_then(|value| value.parse::<u32>().ok())
            .unwrap_or(begin);

        let children = cell.children();
        let items = children
            .all(parser)
            .iter()
            .filter_map(|node| node.as_tag())
            .filter(|tag| has_class(tag, ARRANGE_CLASS));

        for item in items {
            let item_children = item.children();
            let Some(detail) = item_children
                .all(parser)
                .iter()
                .filter_map(|node| node.as_tag())
                .find(|tag| has_class(tag, DETAIL_CLASS))
            else {
                continue;
            };

            let name = first_text_child(detail, parser);
            if name.is_empty() {
                continue;
            }
            let teacher = descendant_text_by_class(detail, parser, TEACHER_CLASS).unwrap_or_default();
            let room_text = descendant_text_by_class(detail, parser, ROOM_CLASS).unwrap_or_default();

            rows.push(RawFields {
                name,
                teacher,
                room: room_text.clone(),
                day,
                sections: SectionInfo::Indices {
                    start: begin,
                    end,
                    hint: Some(room_text.clone()),
                },
                weeks: WeekInfo::Marked(room_text),
            });
        }
    }

    Ok(rows)
}
