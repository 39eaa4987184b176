use crate::normalize::fields::normalize_text;
use serde_json::Value;
use tl::VDom;

pub fn parse_json(document: &str, label: &str) -> Result<Value, String> {
    serde_json::from_str(document.trim_start_matches('\u{feff}'))
        .map_err(|e| format!("{label} is not valid JSON (session may have expired): {e}"))
}

/// The array under `key`, or an error when the document has no such
/// collection.
pub fn json_array<'a>(value: &'a Value, key: &str) -> Result<&'a Vec<Value>, String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .ok_or_else(|| format!("Missing `{key}` array in response"))
}

/// A trimmed, non-empty text value. Numbers are rendered as text since
/// sources disagree on which fields are quoted.
pub fn json_text(row: &Value, key: &str) -> Option<String> {
    let text = match row.get(key)? {
        Value::String(text) => text.trim().to_string(),
        Value::Number(number) => number.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

pub fn json_int(row: &Value, key: &str) -> Option<i64> {
    match row.get(key)? {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

pub fn parse_dom(html: &str) -> Result<VDom<'_>, String> {
    tl::parse(html, tl::ParserOptions::default()).map_err(|e| format!("Failed to parse HTML: {e}"))
}

pub fn attr(tag: &tl::HTMLTag, name: &str) -> Option<String> {
    tag.attributes()
        .get(name)
        .flatten()
        .map(|value| value.as_utf8_str().trim().to_string())
}

pub fn has_class(tag: &tl::HTMLTag, class: &str) -> bool {
    tag.attributes()
        .class()
        .map(|classes| {
            classes
                .as_utf8_str()
                .split_whitespace()
                .any(|member| member == class)
        })
        .unwrap_or(false)
}

pub fn tag_name(tag: &tl::HTMLTag) -> String {
    tag.name().as_utf8_str().to_ascii_lowercase()
}

/// Text of the first descendant of `tag` carrying `class`.
pub fn descendant_text_by_class(
    tag: &tl::HTMLTag,
    parser: &tl::Parser,
    class: &str,
) -> Option<String> {
    let children = tag.children();
    let found = children
        .all(parser)
        .iter()
        .filter_map(|node| node.as_tag())
        .find(|child| has_class(child, class))?;
    Some(tag_text(found, parser))
}

/// Text of the tag's first child node when that node is bare text.
pub fn first_text_child(tag: &tl::HTMLTag, parser: &tl::Parser) -> String {
    let children = tag.children();
    children
        .top()
        .iter()
        .find_map(|handle| handle.get(parser))
        .and_then(|node| node.as_raw())
        .map(|raw| normalize_text(&decode_entities(&raw.as_utf8_str())))
        .unwrap_or_default()
}

pub fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace('\u{00A0}', " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

pub fn tag_text(tag: &tl::HTMLTag, parser: &tl::Parser) -> String {
    normalize_text(&decode_entities(&tag.inner_text(parser)))
}
