use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::sync::LazyLock;

pub const WEEK_UNIT: char = '周';

/// Highest week number accepted. Tokens reaching past it are discarded whole.
pub const MAX_WEEK: u32 = 60;

static TOKEN_SPLIT_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[,，、;；]").unwrap());
static RANGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\s*[-~～–—]\s*(\d+)").unwrap());
static SINGLE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\d+)").unwrap());
static MARKED_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)(?:\s*[-~～–—]\s*(\d+))?\s*周\s*(?:[(（]\s*([单双])\s*[)）])?").unwrap()
});

/// Calendar weeks in which a meeting takes place. Always sorted and unique,
/// with every week in `1..=MAX_WEEK`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct WeekSet(BTreeSet<u32>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Parity {
    All,
    Odd,
    Even,
}

impl Parity {
    fn from_token(token: &str) -> Self {
        if token.contains('单') {
            Parity::Odd
        } else if token.contains('双') {
            Parity::Even
        } else {
            Parity::All
        }
    }

    fn from_marker(marker: Option<&str>) -> Self {
        match marker {
            Some("单") => Parity::Odd,
            Some("双") => Parity::Even,
            _ => Parity::All,
        }
    }

    fn admits(self, week: u32) -> bool {
        match self {
            Parity::All => true,
            Parity::Odd => week % 2 == 1,
            Parity::Even => week % 2 == 0,
        }
    }
}

impl WeekSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a week expression such as `1-8周,10-16周(双)` or `1,2,3,5`.
    /// Every comma-separated token is evaluated on its own; tokens that carry
    /// no number contribute nothing.
    pub fn parse(expr: &str) -> Self {
        let mut weeks = WeekSet::new();
        for token in TOKEN_SPLIT_RE.split(expr) {
            let token = token.trim();
            if token.is_empty() {
                continue;
            }
            let parity = Parity::from_token(token);
            if let Some(captures) = RANGE_RE.captures(token) {
                let (Ok(start), Ok(end)) = (captures[1].parse(), captures[2].parse()) else {
                    continue;
                };
                weeks.extend_range(start, end, parity);
            } else if let Some(captures) = SINGLE_RE.captures(token) {
                let Ok(week) = captures[1].parse() else {
                    continue;
                };
                weeks.extend_range(week, week, parity);
            }
        }
        weeks
    }

    /// Collects only the ranges followed by the week unit, so section ranges
    /// and room numbers sharing the same text are left alone.
    pub fn scan_marked(text: &str) -> Self {
        let mut weeks = WeekSet::new();
        for captures in MARKED_RE.captures_iter(text) {
            let Ok(start) = captures[1].parse::<u32>() else {
                continue;
            };
            let end = match captures.get(2) {
                Some(end) => match end.as_str().parse::<u32>() {
                    Ok(end) => end,
                    Err(_) => continue,
                },
                None => start,
            };
            let parity = Parity::from_marker(captures.get(3).map(|m| m.as_str()));
            weeks.extend_range(start, end, parity);
        }
        weeks
    }

    fn extend_range(&mut self, start: u32, end: u32, parity: Parity) {
        let (low, high) = if start <= end { (start, end) } else { (end, start) };
        if high > MAX_WEEK {
            return;
        }
        for week in low.max(1)..=high {
            if parity.admits(week) {
                self.0.insert(week);
            }
        }
    }

    pub fn insert(&mut self, week: u32) -> bool {
        week > 0 && week <= MAX_WEEK && self.0.insert(week)
    }

    pub fn union_with(&mut self, other: &WeekSet) {
        self.0.extend(other.0.iter().copied());
    }

    pub fn contains(&self, week: u32) -> bool {
        self.0.contains(&week)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn last_week(&self) -> Option<u32> {
        self.0.last().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.iter().copied()
    }

    /// Renders the set as compact ranges, e.g. `1-8周,10周,12-16周`.
    pub fn to_expression(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        let mut run: Option<(u32, u32)> = None;

        for week in self.iter() {
            run = match run {
                Some((start, end)) if week == end + 1 => Some((start, week)),
                Some((start, end)) => {
                    parts.push(render_run(start, end));
                    Some((week, week))
                }
                None => Some((week, week)),
            };
        }
        if let Some((start, end)) = run {
            parts.push(render_run(start, end));
        }

        parts.join(",")
    }
}

fn render_run(start: u32, end: u32) -> String {
    if start == end {
        format!("{start}{WEEK_UNIT}")
    } else {
        format!("{start}-{end}{WEEK_UNIT}")
    }
}

impl fmt::Display for WeekSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_expression())
    }
}

impl FromIterator<u32> for WeekSet {
    fn from_iter<I: IntoIterator<Item = u32>>(iter: I) -> Self {
        WeekSet(
            iter.into_iter()
                .filter(|week| (1..=MAX_WEEK).contains(week))
                .collect(),
        )
    }
}

impl TryFrom<Vec<u32>> for WeekSet {
    type Error = String;

    fn try_from(weeks: Vec<u32>) -> Result<Self, Self::Error> {
        if weeks.contains(&0) {
            return Err("week numbers start at 1".to_string());
        }
        if let Some(week) = weeks.iter().find(|week| **week > MAX_WEEK) {
            return Err(format!("week {week} is past week {MAX_WEEK}"));
        }
        Ok(weeks.into_iter().collect())
    }
}

impl From<WeekSet> for Vec<u32> {
    fn from(weeks: WeekSet) -> Self {
        weeks.0.into_iter().collect()
    }
}
