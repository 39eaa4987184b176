use crate::normalize::weeks::WEEK_UNIT;
use regex::Regex;
use std::sync::LazyLock;

pub const SECTION_UNIT: char = '节';

static FRAGMENT_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,，;；]").unwrap());
static SECTION_RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[-~～–—]\s*(\d+)").unwrap());
static SINGLE_SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"第?\s*(\d+)\s*节").unwrap());
static BARE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*$").unwrap());

/// Contiguous block of class periods within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionRange {
    pub start: u32,
    pub end: u32,
}

impl SectionRange {
    pub const FALLBACK: SectionRange = SectionRange { start: 1, end: 1 };

    /// Builds a range from two bounds in either order.
    pub fn spanning(a: u32, b: u32) -> Self {
        SectionRange {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(section: u32) -> Self {
        SectionRange {
            start: section,
            end: section,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.start >= 1 && self.start <= self.end
    }
}

/// What an adapter knows about the periods an occurrence occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionInfo {
    /// Indices read from structural markers. `hint` is free text consulted
    /// only when both indices sit on the `1` placeholder.
    Indices {
        start: u32,
        end: u32,
        hint: Option<String>,
    },
    Text(String),
}

impl SectionInfo {
    pub fn single(section: u32) -> Self {
        SectionInfo::Indices {
            start: section,
            end: section,
            hint: None,
        }
    }
}

pub fn resolve_sections(info: &SectionInfo) -> SectionRange {
    match info {
        SectionInfo::Indices { start, end, hint } => {
            let placeholder = *start == 1 && *end == 1;
            match hint {
                Some(text) if placeholder => resolve_section_text(text),
                _ => SectionRange::spanning(*start, *end),
            }
        }
        SectionInfo::Text(text) => resolve_section_text(text),
    }
}

/// Finds a section range in free text, skipping fragments that describe
/// weeks. Falls back to a single first period.
pub fn resolve_section_text(text: &str) -> SectionRange {
    let fragments: Vec<&str> = FRAGMENT_SPLIT_RE
        .split(text)
        .map(str::trim)
        .filter(|fragment| !fragment.is_empty() && !fragment.contains(WEEK_UNIT))
        .collect();

    let unit_range = fragments
        .iter()
        .rev()
        .filter(|fragment| fragment.contains(SECTION_UNIT))
        .find_map(|fragment| last_range(fragment));
    if let Some(range) = unit_range {
        return range;
    }

    if let Some(range) = fragments.iter().rev().find_map(|fragment| last_range(fragment)) {
        return range;
    }

    let single = fragments.iter().rev().find_map(|fragment| {
        SINGLE_SECTION_RE
            .captures_iter(fragment)
            .last()
            .and_then(|captures| captures[1].parse::<u32>().ok())
    });
    if let Some(section) = single {
        return SectionRange::single(section);
    }

    BARE_NUMBER_RE
        .captures(text)
        .and_then(|captures| captures[1].parse::<u32>().ok())
        .map(SectionRange::single)
        .unwrap_or(SectionRange::FALLBACK)
}

fn last_range(fragment: &str) -> Option<SectionRange> {
    let captures = SECTION_RANGE_RE.captures_iter(fragment).last()?;
    let start = captures[1].parse::<u32>().ok()?;
    let end = captures[2].parse::<u32>().ok()?;
    Some(SectionRange::spanning(start, end))
}
