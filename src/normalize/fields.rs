use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static WRAPPED_NAME_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<<(.*?)>>").unwrap());
static LEADING_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^\[\]【】]+)").unwrap());
static FULLWIDTH_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"（[^）]*）").unwrap());
static HALFWIDTH_PAREN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\([^)]*\)").unwrap());
static ANCHOR_TEXT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r">([^<]+)<").unwrap());

const NAME_ITEM_SEPARATOR: char = ';';

pub fn normalize_text(input: &str) -> String {
    WHITESPACE_RE
        .replace_all(input.trim(), " ")
        .trim()
        .to_string()
}

/// `<<离散数学>>;1` → `离散数学`, `高等数学[03班]` → `高等数学`.
pub fn clean_course_name(raw: &str) -> String {
    let raw = raw.trim();
    if raw.contains("<<") || raw.contains(">>") {
        let inner = WRAPPED_NAME_RE
            .captures(raw)
            .map(|captures| captures[1].to_string())
            .unwrap_or_else(|| raw.replace("<<", "").replace(">>", ""));
        let name = inner.split(NAME_ITEM_SEPARATOR).next().unwrap_or_default();
        return normalize_text(name);
    }

    LEADING_NAME_RE
        .captures(raw)
        .map(|captures| normalize_text(&captures[1]))
        .unwrap_or_else(|| normalize_text(raw))
}

/// Drops parenthetical annotations such as titles or roles.
pub fn clean_teacher(raw: &str) -> String {
    let without_fullwidth = FULLWIDTH_PAREN_RE.replace_all(raw, "");
    let without_annotations = HALFWIDTH_PAREN_RE.replace_all(&without_fullwidth, "");
    normalize_text(without_annotations.trim().trim_end_matches([',', '，']))
}

/// Picks the room out of a `campus,building,room` style composite.
pub fn clean_position(raw: &str) -> String {
    let segments: Vec<&str> = raw.split(',').collect();
    match segments.len() {
        0 | 1 => raw.trim().to_string(),
        2 => segments[1].trim().to_string(),
        _ => segments[segments.len() - 1].trim().to_string(),
    }
}

/// Text content of the first element in an HTML fragment, or the trimmed
/// input when it carries no markup.
pub fn extract_anchor_text(fragment: &str) -> String {
    ANCHOR_TEXT_RE
        .captures(fragment)
        .map(|captures| captures[1].trim().to_string())
        .unwrap_or_else(|| fragment.trim().to_string())
}
